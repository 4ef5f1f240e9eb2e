//! Immutable resignation records.

use super::{TaskDomainError, TaskKey};
use crate::roster::domain::ContributorRef;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a resignation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResignationId(Uuid);

impl ResignationId {
    /// Creates a new random resignation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a resignation identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ResignationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResignationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Historical record of a contributor resigning from a task.
///
/// Recording a resignation never unassigns the task; the two operations are
/// sequenced explicitly by callers when both are wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resignation {
    id: ResignationId,
    task: TaskKey,
    contributor: ContributorRef,
    resigned_at: DateTime<Utc>,
    reason: String,
}

/// Parameter object for reconstructing a persisted resignation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedResignationData {
    /// Persisted record identifier.
    pub id: ResignationId,
    /// Persisted task identity.
    pub task: TaskKey,
    /// Persisted resigning contributor.
    pub contributor: ContributorRef,
    /// Persisted resignation timestamp.
    pub resigned_at: DateTime<Utc>,
    /// Persisted reason.
    pub reason: String,
}

impl Resignation {
    /// Records a new resignation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyResignationReason`] when the reason
    /// is empty after trimming.
    pub fn record(
        task: TaskKey,
        contributor: ContributorRef,
        reason: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_reason = reason.into();
        let normalized_reason = raw_reason.trim();
        if normalized_reason.is_empty() {
            return Err(TaskDomainError::EmptyResignationReason);
        }

        Ok(Self {
            id: ResignationId::new(),
            task,
            contributor,
            resigned_at: clock.utc(),
            reason: normalized_reason.to_owned(),
        })
    }

    /// Reconstructs a resignation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedResignationData) -> Self {
        Self {
            id: data.id,
            task: data.task,
            contributor: data.contributor,
            resigned_at: data.resigned_at,
            reason: data.reason,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ResignationId {
        self.id
    }

    /// Returns the task resigned from.
    #[must_use]
    pub const fn task(&self) -> &TaskKey {
        &self.task
    }

    /// Returns the resigning contributor.
    #[must_use]
    pub const fn contributor(&self) -> &ContributorRef {
        &self.contributor
    }

    /// Returns the resignation timestamp.
    #[must_use]
    pub const fn resigned_at(&self) -> DateTime<Utc> {
        self.resigned_at
    }

    /// Returns the resignation reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
