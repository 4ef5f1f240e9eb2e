//! Project aggregate.

use super::{ProjectRef, RosterDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Registered project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectRef,
    title: String,
    registered_at: DateTime<Utc>,
}

impl Project {
    /// Registers a new project.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyProjectTitle`] if the title is
    /// empty after trimming.
    pub fn register(
        id: ProjectRef,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, RosterDomainError> {
        let raw_title = title.into();
        let normalized_title = raw_title.trim();
        if normalized_title.is_empty() {
            return Err(RosterDomainError::EmptyProjectTitle);
        }

        Ok(Self {
            id,
            title: normalized_title.to_owned(),
            registered_at: clock.utc(),
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ProjectRef,
        title: String,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            registered_at,
        }
    }

    /// Returns the project identity.
    #[must_use]
    pub const fn id(&self) -> &ProjectRef {
        &self.id
    }

    /// Returns the project title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
