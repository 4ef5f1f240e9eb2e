//! Port contracts for project and contract persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by roster services.

pub mod repository;

pub use repository::{
    ContractRepository, ContractRepositoryError, ContractRepositoryResult, ProjectRepository,
    ProjectRepositoryError, ProjectRepositoryResult,
};
