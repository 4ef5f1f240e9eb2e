//! `PostgreSQL` repository implementations for tasks and resignations.

use super::{
    models::{NewResignationRow, NewTaskRow, ResignationRow, TaskRow},
    schema::{resignations, tasks},
};
use crate::roster::domain::{ContractId, ContributorRef, ProjectRef, Role};
use crate::task::{
    domain::{
        Assignment, IssueNumber, PersistedResignationData, PersistedTaskData, Resignation,
        ResignationId, Task, TaskKey, WorkItemKind,
    },
    ports::{
        ResignationLog, ResignationLogError, ResignationLogResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Composite primary key tuple for task rows.
type TaskRowKey = (String, String, i64, bool);

/// Raised when only some of a row's assignment columns are set.
#[derive(Debug, Error)]
#[error("assignment columns are partially set for task {0}")]
struct PartialAssignmentRow(String);

/// Raised when a persisted issue number is outside the domain range.
#[derive(Debug, Error)]
#[error("invalid issue number column for task {0}")]
struct BadIssueNumberRow(String);

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let key = task.key().clone();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(key.clone())
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let key = task.key().clone();
        let row_key = task_row_key(task.key())?;
        let changeset = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(row_key))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            check_single_row(affected, || TaskRepositoryError::NotFound(key.clone()))
        })
        .await
    }

    async fn find(&self, key: &TaskKey) -> TaskRepositoryResult<Option<Task>> {
        let row_key = task_row_key(key)?;
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(row_key)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, key: &TaskKey) -> TaskRepositoryResult<()> {
        let target = key.clone();
        let row_key = task_row_key(key)?;
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(row_key))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            check_single_row(affected, || TaskRepositoryError::NotFound(target.clone()))
        })
        .await
    }

    async fn count_by_project(&self, project: &ProjectRef) -> TaskRepositoryResult<u64> {
        let scope = project.clone();
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::project_provider.eq(scope.provider().as_str()))
                .filter(tasks::repo.eq(scope.repo().as_str()))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(count).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn fetch_page(
        &self,
        project: &ProjectRef,
        offset: u64,
        limit: u32,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let scope = project.clone();
        self.run_blocking(move |connection| {
            let offset = i64::try_from(offset).map_err(TaskRepositoryError::persistence)?;
            let rows = tasks::table
                .filter(tasks::project_provider.eq(scope.provider().as_str()))
                .filter(tasks::repo.eq(scope.repo().as_str()))
                .order((tasks::issue_number.asc(), tasks::pull_request.asc()))
                .offset(offset)
                .limit(i64::from(limit))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed resignation log.
#[derive(Debug, Clone)]
pub struct PostgresResignationLog {
    pool: TaskPgPool,
}

impl PostgresResignationLog {
    /// Creates a new log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ResignationLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ResignationLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ResignationLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ResignationLogError::persistence)?
    }
}

#[async_trait]
impl ResignationLog for PostgresResignationLog {
    async fn append(&self, resignation: &Resignation) -> ResignationLogResult<()> {
        let new_row = to_new_resignation_row(resignation)
            .map_err(ResignationLogError::persistence)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(resignations::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ResignationLogError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for(&self, task: &TaskKey) -> ResignationLogResult<Vec<Resignation>> {
        let issue_number = i64::try_from(task.issue_number().value())
            .map_err(ResignationLogError::persistence)?;
        let scope = task.clone();
        self.run_blocking(move |connection| {
            let rows = resignations::table
                .filter(resignations::project_provider.eq(scope.project().provider().as_str()))
                .filter(resignations::repo.eq(scope.project().repo().as_str()))
                .filter(resignations::issue_number.eq(issue_number))
                .filter(resignations::pull_request.eq(scope.kind().is_pull_request()))
                .order(resignations::resigned_at.asc())
                .select(ResignationRow::as_select())
                .load::<ResignationRow>(connection)
                .map_err(ResignationLogError::persistence)?;
            rows.into_iter()
                .map(|row| row_to_resignation(row).map_err(|e| ResignationLogError::Persistence(e.into())))
                .collect()
        })
        .await
    }
}

/// Enforces the one-row contract of single-row writes.
fn check_single_row(
    affected: usize,
    not_found: impl FnOnce() -> TaskRepositoryError,
) -> TaskRepositoryResult<()> {
    match affected {
        0 => Err(not_found()),
        1 => Ok(()),
        _ => Err(TaskRepositoryError::UnexpectedRowCount {
            expected: 1,
            affected,
        }),
    }
}

fn task_row_key(key: &TaskKey) -> TaskRepositoryResult<TaskRowKey> {
    let issue_number =
        i64::try_from(key.issue_number().value()).map_err(TaskRepositoryError::persistence)?;
    Ok((
        key.project().provider().as_str().to_owned(),
        key.project().repo().as_str().to_owned(),
        issue_number,
        key.kind().is_pull_request(),
    ))
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let (project_provider, repo, issue_number, pull_request) = task_row_key(task.key())?;
    let estimation_minutes =
        i32::try_from(task.estimation_minutes()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        project_provider,
        repo,
        issue_number,
        pull_request,
        role: task.role().as_str().to_owned(),
        estimation_minutes,
        assignee_provider: task
            .assignment()
            .map(|a| a.assignee().provider().as_str().to_owned()),
        assignee_username: task
            .assignment()
            .map(|a| a.assignee().username().as_str().to_owned()),
        assigned_at: task.assignment().map(Assignment::assigned_at),
        deadline: task.assignment().map(Assignment::deadline),
    })
}

pub(crate) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let project = ProjectRef::from_parts(&row.project_provider, &row.repo)
        .map_err(TaskRepositoryError::persistence)?;
    let issue_number = u64::try_from(row.issue_number)
        .ok()
        .and_then(|value| IssueNumber::new(value).ok())
        .ok_or_else(|| {
            TaskRepositoryError::persistence(BadIssueNumberRow(format!(
                "{}/{} #{}",
                row.project_provider, row.repo, row.issue_number
            )))
        })?;
    let key = TaskKey::new(
        project,
        issue_number,
        WorkItemKind::from_pull_request_flag(row.pull_request),
    );
    let role = Role::new(row.role).map_err(TaskRepositoryError::persistence)?;
    let estimation_minutes =
        u32::try_from(row.estimation_minutes).map_err(TaskRepositoryError::persistence)?;

    let assignment = match (
        row.assignee_provider,
        row.assignee_username,
        row.assigned_at,
        row.deadline,
    ) {
        (None, None, None, None) => None,
        (Some(provider), Some(username), Some(assigned_at), Some(deadline)) => {
            let assignee = ContributorRef::from_parts(&provider, &username)
                .map_err(TaskRepositoryError::persistence)?;
            let contract =
                ContractId::new(key.project().clone(), assignee, role.clone());
            Some(Assignment::from_persisted(contract, assigned_at, deadline))
        }
        _ => {
            return Err(TaskRepositoryError::persistence(PartialAssignmentRow(
                key.to_string(),
            )));
        }
    };

    Ok(Task::from_persisted(PersistedTaskData {
        key,
        role,
        estimation_minutes,
        assignment,
    }))
}

fn to_new_resignation_row(
    resignation: &Resignation,
) -> Result<NewResignationRow, std::num::TryFromIntError> {
    let issue_number = i64::try_from(resignation.task().issue_number().value())?;
    Ok(NewResignationRow {
        id: resignation.id().into_inner(),
        project_provider: resignation.task().project().provider().as_str().to_owned(),
        repo: resignation.task().project().repo().as_str().to_owned(),
        issue_number,
        pull_request: resignation.task().kind().is_pull_request(),
        contributor_provider: resignation.contributor().provider().as_str().to_owned(),
        contributor_username: resignation.contributor().username().as_str().to_owned(),
        resigned_at: resignation.resigned_at(),
        reason: resignation.reason().to_owned(),
    })
}

fn row_to_resignation(row: ResignationRow) -> Result<Resignation, Box<dyn std::error::Error + Send + Sync>> {
    let project = ProjectRef::from_parts(&row.project_provider, &row.repo)?;
    let issue_number = IssueNumber::new(u64::try_from(row.issue_number)?)?;
    let task = TaskKey::new(
        project,
        issue_number,
        WorkItemKind::from_pull_request_flag(row.pull_request),
    );
    let contributor =
        ContributorRef::from_parts(&row.contributor_provider, &row.contributor_username)?;

    Ok(Resignation::from_persisted(PersistedResignationData {
        id: ResignationId::from_uuid(row.id),
        task,
        contributor,
        resigned_at: row.resigned_at,
        reason: row.reason,
    }))
}
