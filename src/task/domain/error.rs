//! Error types for task domain validation and transitions.

use super::TaskKey;
use crate::roster::domain::ContractId;
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The issue number is invalid.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(u64),

    /// The estimation is zero minutes.
    #[error("task estimation must be at least one minute")]
    ZeroEstimation,

    /// The assignment duration is zero days.
    #[error("assignment duration must be at least one day")]
    ZeroAssignmentDuration,

    /// The contract does not bind the task's project and role.
    #[error("contract {contract} does not match task {task}")]
    ContractMismatch {
        /// The task an assignment was attempted on.
        task: TaskKey,
        /// The contract whose identity failed to match.
        contract: ContractId,
    },

    /// The task has no assignee.
    #[error("task {0} is not assigned")]
    NotAssigned(TaskKey),

    /// The resignation reason is empty after trimming.
    #[error("resignation reason must not be empty")]
    EmptyResignationReason,
}
