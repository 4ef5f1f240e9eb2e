//! Identifier types for the task domain.

use super::TaskDomainError;
use crate::roster::domain::ProjectRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive issue or pull-request number from an external tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Largest number representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u64 = i64::MAX as u64;

    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIssueNumber`] when the value is
    /// zero or exceeds the schema-backed maximum (`i64::MAX`).
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(TaskDomainError::InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of tracker item a task was registered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    /// Task registered from an issue.
    Issue,
    /// Task registered from a pull request.
    PullRequest,
}

impl WorkItemKind {
    /// Returns the kind for a raw pull-request flag.
    #[must_use]
    pub const fn from_pull_request_flag(is_pull_request: bool) -> Self {
        if is_pull_request {
            Self::PullRequest
        } else {
            Self::Issue
        }
    }

    /// Returns true for pull-request tasks.
    #[must_use]
    pub const fn is_pull_request(self) -> bool {
        matches!(self, Self::PullRequest)
    }
}

impl fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => write!(f, "issue"),
            Self::PullRequest => write!(f, "pull request"),
        }
    }
}

/// Composite task identity: a tracker item within a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskKey {
    project: ProjectRef,
    issue_number: IssueNumber,
    kind: WorkItemKind,
}

impl TaskKey {
    /// Creates a task key from validated components.
    #[must_use]
    pub const fn new(project: ProjectRef, issue_number: IssueNumber, kind: WorkItemKind) -> Self {
        Self {
            project,
            issue_number,
            kind,
        }
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> &ProjectRef {
        &self.project
    }

    /// Returns the tracker item number.
    #[must_use]
    pub const fn issue_number(&self) -> IssueNumber {
        self.issue_number
    }

    /// Returns the tracker item kind.
    #[must_use]
    pub const fn kind(&self) -> WorkItemKind {
        self.kind
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} ({})", self.project, self.issue_number, self.kind)
    }
}
