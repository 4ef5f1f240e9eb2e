//! Port contracts for task lifecycle persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    ResignationLog, ResignationLogError, ResignationLogResult, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};
