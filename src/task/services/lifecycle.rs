//! Service layer for task registration, assignment, and resignation.

use crate::pagination::{PageSource, PagedIterator, PaginationError, PaginationResult};
use crate::roster::{
    domain::{Contract, ProjectRef, Role, RosterDomainError},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{IssueNumber, Resignation, Task, TaskDomainError, TaskKey, WorkItemKind},
    ports::{
        ResignationLog, ResignationLogError, TaskRepository, TaskRepositoryError,
    },
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for registering a task from a tracker item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTaskRequest {
    provider: String,
    repo: String,
    issue_number: u64,
    pull_request: bool,
    role: String,
    estimation_minutes: u32,
}

impl RegisterTaskRequest {
    /// Creates a registration request for an issue-based task.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        repo: impl Into<String>,
        issue_number: u64,
        role: impl Into<String>,
        estimation_minutes: u32,
    ) -> Self {
        Self {
            provider: provider.into(),
            repo: repo.into(),
            issue_number,
            pull_request: false,
            role: role.into(),
            estimation_minutes,
        }
    }

    /// Marks the tracker item as a pull request.
    #[must_use]
    pub const fn as_pull_request(mut self) -> Self {
        self.pull_request = true;
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Roster value validation failed.
    #[error(transparent)]
    Roster(#[from] RosterDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Resignation persistence failed.
    #[error(transparent)]
    Resignations(#[from] ResignationLogError),
    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// The referenced project is not registered.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectRef),
    /// Paged listing failed.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, L, P, C>
where
    T: TaskRepository,
    L: ResignationLog,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    resignations: Arc<L>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<T, L, P, C> TaskLifecycleService<T, L, P, C>
where
    T: TaskRepository,
    L: ResignationLog,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, resignations: Arc<L>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            resignations,
            projects,
            clock,
        }
    }

    /// Registers a new, unassigned task from a tracker item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ProjectNotFound`] when the item's
    /// project is not registered, and validation or persistence variants
    /// otherwise.
    pub async fn register(&self, request: RegisterTaskRequest) -> TaskLifecycleResult<Task> {
        let project = ProjectRef::from_parts(&request.provider, &request.repo)?;
        if !self.projects.exists(&project).await? {
            return Err(TaskLifecycleError::ProjectNotFound(project));
        }

        let key = TaskKey::new(
            project,
            IssueNumber::new(request.issue_number)?,
            WorkItemKind::from_pull_request_flag(request.pull_request),
        );
        let role = Role::new(request.role)?;
        let task = Task::register(key, role, request.estimation_minutes)?;
        self.tasks.store(&task).await?;
        debug!(task = %task.key(), "task registered");
        Ok(task)
    }

    /// Retrieves a task by identity.
    ///
    /// Returns `Ok(None)` when no task matches.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find(&self, key: &TaskKey) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find(key).await?)
    }

    /// Assigns a task to a contract for `duration_days`.
    ///
    /// The contract must bind the task's project and role; on success the
    /// assignment fields are replaced as one unit and the fresh snapshot is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ContractMismatch`] (wrapped) when the
    /// contract does not match, [`TaskRepositoryError::NotFound`] (wrapped)
    /// when the task does not exist.
    pub async fn assign(
        &self,
        key: &TaskKey,
        contract: &Contract,
        duration_days: u16,
    ) -> TaskLifecycleResult<Task> {
        let task = self.require_task(key).await?;
        let assigned = task.assigned(contract, duration_days, &*self.clock)?;
        self.tasks.update(&assigned).await?;
        debug!(task = %key, contract = %contract.id(), "task assigned");
        Ok(assigned)
    }

    /// Clears a task's assignment.
    ///
    /// The clearing write is issued even when the task is already
    /// unassigned, so the operation is idempotent in effect.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// does not exist.
    pub async fn unassign(&self, key: &TaskKey) -> TaskLifecycleResult<Task> {
        let task = self.require_task(key).await?;
        let cleared = task.unassigned();
        self.tasks.update(&cleared).await?;
        debug!(task = %key, "task unassigned");
        Ok(cleared)
    }

    /// Deletes a task regardless of its assignment state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// does not exist.
    pub async fn remove(&self, key: &TaskKey) -> TaskLifecycleResult<()> {
        self.tasks.delete(key).await?;
        debug!(task = %key, "task removed");
        Ok(())
    }

    /// Records a resignation for the task's current assignee.
    ///
    /// The task stays assigned: resignation recording and unassignment are
    /// independent operations callers sequence explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssigned`] (wrapped) when the task has
    /// no assignee.
    pub async fn record_resignation(
        &self,
        key: &TaskKey,
        reason: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Resignation> {
        let task = self.require_task(key).await?;
        let assignment = task
            .assignment()
            .ok_or_else(|| TaskDomainError::NotAssigned(key.clone()))?;

        let resignation = Resignation::record(
            key.clone(),
            assignment.assignee().clone(),
            reason,
            &*self.clock,
        )?;
        self.resignations.append(&resignation).await?;
        debug!(task = %key, contributor = %resignation.contributor(), "resignation recorded");
        Ok(resignation)
    }

    /// Returns every resignation recorded for the task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Resignations`] when the lookup fails.
    pub async fn resignations_of(&self, key: &TaskKey) -> TaskLifecycleResult<Vec<Resignation>> {
        Ok(self.resignations.list_for(key).await?)
    }

    /// Opens a lazy iterator over the project's tasks.
    ///
    /// The task count is snapshotted when the iterator is opened; pages are
    /// fetched on demand as the caller drains it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Pagination`] when the page size is
    /// invalid or the count query fails.
    pub async fn tasks_of(
        &self,
        project: &ProjectRef,
        page_size: u32,
    ) -> TaskLifecycleResult<PagedIterator<TaskPages<T>>> {
        let source = TaskPages {
            repository: Arc::clone(&self.tasks),
            project: project.clone(),
        };
        Ok(PagedIterator::open(source, page_size).await?)
    }

    async fn require_task(&self, key: &TaskKey) -> TaskLifecycleResult<Task> {
        self.tasks
            .find(key)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(key.clone()).into())
    }
}

/// [`PageSource`] over one project's tasks.
pub struct TaskPages<T> {
    repository: Arc<T>,
    project: ProjectRef,
}

#[async_trait]
impl<T: TaskRepository> PageSource for TaskPages<T> {
    type Item = Task;

    async fn count(&self) -> PaginationResult<u64> {
        self.repository
            .count_by_project(&self.project)
            .await
            .map_err(PaginationError::fetch_failure)
    }

    async fn fetch(&self, offset: u64, limit: u32) -> PaginationResult<Vec<Task>> {
        self.repository
            .fetch_page(&self.project, offset, limit)
            .await
            .map_err(PaginationError::fetch_failure)
    }
}
