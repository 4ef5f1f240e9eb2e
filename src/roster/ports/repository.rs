//! Repository ports for project and contract persistence.

use crate::roster::domain::{Contract, ContractId, Project, ProjectRef};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// Registration is strict: a key that already exists is a conflict on
    /// every backend, never an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the project
    /// reference is already registered.
    async fn register(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by reference.
    ///
    /// Returns `None` when the project does not exist.
    async fn find(&self, id: &ProjectRef) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns true when the project is registered.
    async fn exists(&self, id: &ProjectRef) -> ProjectRepositoryResult<bool>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same reference already exists.
    #[error("duplicate project: {0}")]
    DuplicateProject(ProjectRef),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for contract repository operations.
pub type ContractRepositoryResult<T> = Result<T, ContractRepositoryError>;

/// Contract persistence contract.
///
/// Paged listing (`count_by_project` + `fetch_page`) supplies the
/// count-snapshot and page-fetch halves of the lazy pagination protocol;
/// `fetch_page` must impose a stable ordering across calls.
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Stores a new contract.
    ///
    /// Registration is strict: a key that already exists is a conflict on
    /// every backend, never an idempotent no-op. A contract marked for
    /// removal still occupies its key.
    ///
    /// # Errors
    ///
    /// Returns [`ContractRepositoryError::DuplicateContract`] when the
    /// identity is already registered.
    async fn register(&self, contract: &Contract) -> ContractRepositoryResult<()>;

    /// Finds a contract by identity.
    ///
    /// Returns `None` when the contract does not exist.
    async fn find(&self, id: &ContractId) -> ContractRepositoryResult<Option<Contract>>;

    /// Stamps a contract for removal and returns the fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ContractRepositoryError::NotFound`] when the contract does
    /// not exist, or [`ContractRepositoryError::UnexpectedRowCount`] when
    /// the update touches anything but exactly one row.
    async fn mark_for_removal(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> ContractRepositoryResult<Contract>;

    /// Deletes a contract.
    ///
    /// # Errors
    ///
    /// Returns [`ContractRepositoryError::NotFound`] when the contract does
    /// not exist.
    async fn delete(&self, id: &ContractId) -> ContractRepositoryResult<()>;

    /// Counts the contracts of a project.
    async fn count_by_project(&self, project: &ProjectRef) -> ContractRepositoryResult<u64>;

    /// Returns at most `limit` of the project's contracts starting at the
    /// zero-based `offset`, in a stable order.
    async fn fetch_page(
        &self,
        project: &ProjectRef,
        offset: u64,
        limit: u32,
    ) -> ContractRepositoryResult<Vec<Contract>>;
}

/// Errors returned by contract repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ContractRepositoryError {
    /// A contract with the same identity already exists.
    #[error("duplicate contract: {0}")]
    DuplicateContract(ContractId),

    /// The contract was not found.
    #[error("contract not found: {0}")]
    NotFound(ContractId),

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

impl ContractRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
