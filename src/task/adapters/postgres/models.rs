//! Diesel row models for task and resignation persistence.

use super::schema::{resignations, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Hosting provider of the project.
    pub project_provider: String,
    /// Repository name of the project.
    pub repo: String,
    /// Tracker item number.
    pub issue_number: i64,
    /// Whether the tracker item is a pull request.
    pub pull_request: bool,
    /// Role the task is offered under.
    pub role: String,
    /// Estimation in minutes.
    pub estimation_minutes: i32,
    /// Provider of the assignee account, when assigned.
    pub assignee_provider: Option<String>,
    /// Assignee account name, when assigned.
    pub assignee_username: Option<String>,
    /// Assignment timestamp, when assigned.
    pub assigned_at: Option<DateTime<Utc>>,
    /// Completion deadline, when assigned.
    pub deadline: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Hosting provider of the project.
    pub project_provider: String,
    /// Repository name of the project.
    pub repo: String,
    /// Tracker item number.
    pub issue_number: i64,
    /// Whether the tracker item is a pull request.
    pub pull_request: bool,
    /// Role the task is offered under.
    pub role: String,
    /// Estimation in minutes.
    pub estimation_minutes: i32,
    /// Provider of the assignee account, when assigned.
    pub assignee_provider: Option<String>,
    /// Assignee account name, when assigned.
    pub assignee_username: Option<String>,
    /// Assignment timestamp, when assigned.
    pub assigned_at: Option<DateTime<Utc>>,
    /// Completion deadline, when assigned.
    pub deadline: Option<DateTime<Utc>>,
}

/// Query result row for resignation records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = resignations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResignationRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Hosting provider of the task's project.
    pub project_provider: String,
    /// Repository name of the task's project.
    pub repo: String,
    /// Tracker item number of the task.
    pub issue_number: i64,
    /// Whether the task's tracker item is a pull request.
    pub pull_request: bool,
    /// Provider of the resigning contributor's account.
    pub contributor_provider: String,
    /// Resigning contributor's account name.
    pub contributor_username: String,
    /// Resignation timestamp.
    pub resigned_at: DateTime<Utc>,
    /// Resignation reason.
    pub reason: String,
}

/// Insert model for resignation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resignations)]
pub struct NewResignationRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Hosting provider of the task's project.
    pub project_provider: String,
    /// Repository name of the task's project.
    pub repo: String,
    /// Tracker item number of the task.
    pub issue_number: i64,
    /// Whether the task's tracker item is a pull request.
    pub pull_request: bool,
    /// Provider of the resigning contributor's account.
    pub contributor_provider: String,
    /// Resigning contributor's account name.
    pub contributor_username: String,
    /// Resignation timestamp.
    pub resigned_at: DateTime<Utc>,
    /// Resignation reason.
    pub reason: String,
}
