//! Identifier and validated scalar types shared across the roster domain.

use super::RosterDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported version-control providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// GitHub-hosted projects and accounts.
    #[serde(rename = "github")]
    GitHub,
    /// GitLab-hosted projects and accounts.
    #[serde(rename = "gitlab")]
    GitLab,
}

impl Provider {
    /// Returns the provider name in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        }
    }
}

impl TryFrom<&str> for Provider {
    type Error = RosterDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "github" => Ok(Self::GitHub),
            "gitlab" => Ok(Self::GitLab),
            _ => Err(RosterDomainError::InvalidProvider(value.to_owned())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized repository identifier in `owner/repo` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(String);

impl RepoName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::InvalidRepoName`] if the value does not
    /// contain exactly one slash-delimited owner and repository segment.
    pub fn new(value: impl Into<String>) -> Result<Self, RosterDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut segments = normalized.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !owner.is_empty()
            && !repo.is_empty()
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(RosterDomainError::InvalidRepoName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the repository name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical project identity: a repository on a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
    provider: Provider,
    repo: RepoName,
}

impl ProjectRef {
    /// Creates a project reference from validated components.
    #[must_use]
    pub const fn new(provider: Provider, repo: RepoName) -> Self {
        Self { provider, repo }
    }

    /// Creates a project reference from raw external values.
    ///
    /// # Errors
    ///
    /// Returns a [`RosterDomainError`] when either component is invalid.
    pub fn from_parts(provider: &str, repo: &str) -> Result<Self, RosterDomainError> {
        Ok(Self::new(Provider::try_from(provider)?, RepoName::new(repo)?))
    }

    /// Returns the hosting provider.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// Returns the repository name.
    #[must_use]
    pub const fn repo(&self) -> &RepoName {
        &self.repo
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.repo)
    }
}

/// Validated contributor account name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::InvalidUsername`] when the value is
    /// empty after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, RosterDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(RosterDomainError::InvalidUsername(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contributor identity: an account on a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContributorRef {
    provider: Provider,
    username: Username,
}

impl ContributorRef {
    /// Creates a contributor reference from validated components.
    #[must_use]
    pub const fn new(provider: Provider, username: Username) -> Self {
        Self { provider, username }
    }

    /// Creates a contributor reference from raw external values.
    ///
    /// # Errors
    ///
    /// Returns a [`RosterDomainError`] when either component is invalid.
    pub fn from_parts(provider: &str, username: &str) -> Result<Self, RosterDomainError> {
        Ok(Self::new(
            Provider::try_from(provider)?,
            Username::new(username)?,
        ))
    }

    /// Returns the account provider.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// Returns the account name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

impl fmt::Display for ContributorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.provider)
    }
}

/// Validated contract role, stored in canonical upper-case form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Creates a validated role.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::InvalidRole`] when the value is empty
    /// after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, RosterDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(RosterDomainError::InvalidRole(raw));
        }
        Ok(Self(normalized.to_ascii_uppercase()))
    }

    /// Returns the role as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
