//! Error types for roster domain validation.

use thiserror::Error;

/// Errors returned while constructing roster domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterDomainError {
    /// The provider value is unsupported.
    #[error("unsupported provider: {0}")]
    InvalidProvider(String),

    /// The repository name does not follow `owner/repo` format.
    #[error("invalid repository name '{0}', expected owner/repo")]
    InvalidRepoName(String),

    /// The username is empty or contains whitespace.
    #[error("invalid username '{0}'")]
    InvalidUsername(String),

    /// The role is empty or contains whitespace.
    #[error("invalid role '{0}'")]
    InvalidRole(String),

    /// The hourly rate is not a positive amount of minor currency units.
    #[error("invalid hourly rate {0}, expected a positive amount in minor units")]
    InvalidHourlyRate(i64),

    /// The project title is empty after trimming.
    #[error("project title must not be empty")]
    EmptyProjectTitle,
}
