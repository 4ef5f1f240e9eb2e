//! Contract aggregate and identity.

use super::{ContributorRef, ProjectRef, Role, RosterDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite contract identity: a contributor holding a role in a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId {
    project: ProjectRef,
    contributor: ContributorRef,
    role: Role,
}

impl ContractId {
    /// Creates a contract identity from validated components.
    #[must_use]
    pub const fn new(project: ProjectRef, contributor: ContributorRef, role: Role) -> Self {
        Self {
            project,
            contributor,
            role,
        }
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> &ProjectRef {
        &self.project
    }

    /// Returns the contracted contributor.
    #[must_use]
    pub const fn contributor(&self) -> &ContributorRef {
        &self.contributor
    }

    /// Returns the contracted role.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Returns true when this identity binds the given project and role.
    ///
    /// Substituting this contract's contributor into `(project, role)` must
    /// reproduce the identity exactly, which reduces to an equality check on
    /// the two remaining fields. This is the assignment-matching rule used
    /// by the task lifecycle.
    #[must_use]
    pub fn binds(&self, project: &ProjectRef, role: &Role) -> bool {
        &self.project == project && &self.role == role
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as {} on {}", self.contributor, self.role, self.project)
    }
}

/// Positive hourly rate in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyRate(i64);

impl HourlyRate {
    /// Creates a validated hourly rate.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::InvalidHourlyRate`] when the amount is
    /// not positive.
    pub const fn new(minor_units: i64) -> Result<Self, RosterDomainError> {
        if minor_units <= 0 {
            return Err(RosterDomainError::InvalidHourlyRate(minor_units));
        }
        Ok(Self(minor_units))
    }

    /// Returns the rate in minor currency units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HourlyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contract aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    id: ContractId,
    hourly_rate: HourlyRate,
    marked_for_removal: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedContractData {
    /// Persisted contract identity.
    pub id: ContractId,
    /// Persisted hourly rate.
    pub hourly_rate: HourlyRate,
    /// Persisted removal mark, if any.
    pub marked_for_removal: Option<DateTime<Utc>>,
}

impl Contract {
    /// Creates a new contract with no removal mark.
    #[must_use]
    pub const fn new(id: ContractId, hourly_rate: HourlyRate) -> Self {
        Self {
            id,
            hourly_rate,
            marked_for_removal: None,
        }
    }

    /// Reconstructs a contract from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedContractData) -> Self {
        Self {
            id: data.id,
            hourly_rate: data.hourly_rate,
            marked_for_removal: data.marked_for_removal,
        }
    }

    /// Returns the contract identity.
    #[must_use]
    pub const fn id(&self) -> &ContractId {
        &self.id
    }

    /// Returns the hourly rate.
    #[must_use]
    pub const fn hourly_rate(&self) -> HourlyRate {
        self.hourly_rate
    }

    /// Returns the removal mark timestamp, if any.
    #[must_use]
    pub const fn marked_for_removal(&self) -> Option<DateTime<Utc>> {
        self.marked_for_removal
    }

    /// Returns a copy of this contract stamped for removal at `at`.
    ///
    /// A marked contract still occupies its identity; re-registration stays
    /// a conflict until the contract is deleted.
    #[must_use]
    pub fn with_removal_mark(&self, at: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            hourly_rate: self.hourly_rate,
            marked_for_removal: Some(at),
        }
    }
}
