//! Task aggregate root and assignment transitions.

use super::{TaskDomainError, TaskKey};
use crate::roster::domain::{Contract, ContractId, ContributorRef, Role};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Assignment of a task to a contract.
///
/// Existence of this value implies every assignment field is set; clearing
/// an assignment drops the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    contract: ContractId,
    assigned_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
}

impl Assignment {
    /// Reconstructs an assignment from persisted fields.
    #[must_use]
    pub const fn from_persisted(
        contract: ContractId,
        assigned_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            contract,
            assigned_at,
            deadline,
        }
    }

    /// Returns the assigned contract identity.
    #[must_use]
    pub const fn contract(&self) -> &ContractId {
        &self.contract
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &ContributorRef {
        self.contract.contributor()
    }

    /// Returns the assignment timestamp.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns the completion deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    key: TaskKey,
    role: Role,
    estimation_minutes: u32,
    assignment: Option<Assignment>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identity.
    pub key: TaskKey,
    /// Persisted role the task is offered under.
    pub role: Role,
    /// Persisted estimation in minutes.
    pub estimation_minutes: u32,
    /// Persisted assignment, if any.
    pub assignment: Option<Assignment>,
}

impl Task {
    /// Registers a new, unassigned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ZeroEstimation`] when the estimation is
    /// zero minutes.
    pub fn register(
        key: TaskKey,
        role: Role,
        estimation_minutes: u32,
    ) -> Result<Self, TaskDomainError> {
        if estimation_minutes == 0 {
            return Err(TaskDomainError::ZeroEstimation);
        }
        Ok(Self {
            key,
            role,
            estimation_minutes,
            assignment: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            key: data.key,
            role: data.role,
            estimation_minutes: data.estimation_minutes,
            assignment: data.assignment,
        }
    }

    /// Returns the task identity.
    #[must_use]
    pub const fn key(&self) -> &TaskKey {
        &self.key
    }

    /// Returns the role the task is offered under.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the estimation in minutes.
    #[must_use]
    pub const fn estimation_minutes(&self) -> u32 {
        self.estimation_minutes
    }

    /// Returns the current assignment, if any.
    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Returns true when the task has an assignee.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    /// Returns true when the contract binds this task's project and role.
    ///
    /// The rule is exact-match identity reconstruction: substituting the
    /// contract's contributor into this task's (project, role) must equal
    /// the contract's own identity.
    #[must_use]
    pub fn accepts(&self, contract: &Contract) -> bool {
        contract.id().binds(self.key.project(), &self.role)
    }

    /// Returns a copy of this task assigned to `contract`.
    ///
    /// The whole assignment is replaced, never merged: assignee, timestamp,
    /// and deadline are all taken from this call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ContractMismatch`] when the contract does
    /// not bind this task's project and role, or
    /// [`TaskDomainError::ZeroAssignmentDuration`] for a zero duration.
    pub fn assigned(
        &self,
        contract: &Contract,
        duration_days: u16,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        if duration_days == 0 {
            return Err(TaskDomainError::ZeroAssignmentDuration);
        }
        if !self.accepts(contract) {
            return Err(TaskDomainError::ContractMismatch {
                task: self.key.clone(),
                contract: contract.id().clone(),
            });
        }

        let assigned_at = clock.utc();
        let deadline = assigned_at + Duration::days(i64::from(duration_days));
        Ok(Self {
            key: self.key.clone(),
            role: self.role.clone(),
            estimation_minutes: self.estimation_minutes,
            assignment: Some(Assignment {
                contract: contract.id().clone(),
                assigned_at,
                deadline,
            }),
        })
    }

    /// Returns a copy of this task with the assignment cleared.
    ///
    /// Clearing an unassigned task yields an equal value; callers issue the
    /// write regardless.
    #[must_use]
    pub fn unassigned(&self) -> Self {
        Self {
            key: self.key.clone(),
            role: self.role.clone(),
            estimation_minutes: self.estimation_minutes,
            assignment: None,
        }
    }
}
