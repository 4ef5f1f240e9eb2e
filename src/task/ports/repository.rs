//! Repository ports for task and resignation persistence.

use crate::roster::domain::ProjectRef;
use crate::task::domain::{Resignation, Task, TaskKey};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Paged listing (`count_by_project` + `fetch_page`) supplies the
/// count-snapshot and page-fetch halves of the lazy pagination protocol;
/// `fetch_page` must impose a stable ordering across calls.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the key already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (assignment fields).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::UnexpectedRowCount`] when the
    /// update touches anything but exactly one row.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identity.
    ///
    /// Returns `None` when the task does not exist.
    async fn find(&self, key: &TaskKey) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes a task regardless of its assignment state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, key: &TaskKey) -> TaskRepositoryResult<()>;

    /// Counts the tasks of a project.
    async fn count_by_project(&self, project: &ProjectRef) -> TaskRepositoryResult<u64>;

    /// Returns at most `limit` of the project's tasks starting at the
    /// zero-based `offset`, in a stable order.
    async fn fetch_page(
        &self,
        project: &ProjectRef,
        offset: u64,
        limit: u32,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identity already exists.
    #[error("duplicate task: {0}")]
    DuplicateTask(TaskKey),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskKey),

    /// A single-row write touched an unexpected number of rows.
    #[error("write affected {affected} rows, expected {expected}")]
    UnexpectedRowCount {
        /// Rows the statement was expected to touch.
        expected: usize,
        /// Rows the statement actually touched.
        affected: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for resignation log operations.
pub type ResignationLogResult<T> = Result<T, ResignationLogError>;

/// Append-only store of resignation records.
#[async_trait]
pub trait ResignationLog: Send + Sync {
    /// Appends a resignation record.
    async fn append(&self, resignation: &Resignation) -> ResignationLogResult<()>;

    /// Returns every resignation recorded for the task, oldest first.
    async fn list_for(&self, task: &TaskKey) -> ResignationLogResult<Vec<Resignation>>;
}

/// Errors returned by resignation log implementations.
#[derive(Debug, Clone, Error)]
pub enum ResignationLogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResignationLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
