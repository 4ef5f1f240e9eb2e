//! Diesel row models for project and contract persistence.

use super::schema::{contracts, projects};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Hosting provider.
    pub provider: String,
    /// Repository name.
    pub repo: String,
    /// Project title.
    pub title: String,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Hosting provider.
    pub provider: String,
    /// Repository name.
    pub repo: String,
    /// Project title.
    pub title: String,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Query result row for contract records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contracts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContractRow {
    /// Hosting provider of the project.
    pub project_provider: String,
    /// Repository name of the project.
    pub repo: String,
    /// Provider of the contributor account.
    pub contributor_provider: String,
    /// Contributor account name.
    pub username: String,
    /// Contracted role.
    pub role: String,
    /// Hourly rate in minor currency units.
    pub hourly_rate: i64,
    /// Removal mark timestamp, if stamped.
    pub marked_for_removal: Option<DateTime<Utc>>,
}

/// Insert model for contract records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contracts)]
pub struct NewContractRow {
    /// Hosting provider of the project.
    pub project_provider: String,
    /// Repository name of the project.
    pub repo: String,
    /// Provider of the contributor account.
    pub contributor_provider: String,
    /// Contributor account name.
    pub username: String,
    /// Contracted role.
    pub role: String,
    /// Hourly rate in minor currency units.
    pub hourly_rate: i64,
    /// Removal mark timestamp, if stamped.
    pub marked_for_removal: Option<DateTime<Utc>>,
}
