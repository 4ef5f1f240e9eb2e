//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records keyed by tracker item within a project.
    tasks (project_provider, repo, issue_number, pull_request) {
        /// Hosting provider of the project.
        #[max_length = 50]
        project_provider -> Varchar,
        /// Repository name of the project.
        #[max_length = 255]
        repo -> Varchar,
        /// Tracker item number.
        issue_number -> BigInt,
        /// Whether the tracker item is a pull request.
        pull_request -> Bool,
        /// Role the task is offered under.
        #[max_length = 50]
        role -> Varchar,
        /// Estimation in minutes.
        estimation_minutes -> Integer,
        /// Provider of the assignee account, when assigned.
        #[max_length = 50]
        assignee_provider -> Nullable<Varchar>,
        /// Assignee account name, when assigned.
        #[max_length = 255]
        assignee_username -> Nullable<Varchar>,
        /// Assignment timestamp, when assigned.
        assigned_at -> Nullable<Timestamptz>,
        /// Completion deadline, when assigned.
        deadline -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only resignation records.
    resignations (id) {
        /// Record identifier.
        id -> Uuid,
        /// Hosting provider of the task's project.
        #[max_length = 50]
        project_provider -> Varchar,
        /// Repository name of the task's project.
        #[max_length = 255]
        repo -> Varchar,
        /// Tracker item number of the task.
        issue_number -> BigInt,
        /// Whether the task's tracker item is a pull request.
        pull_request -> Bool,
        /// Provider of the resigning contributor's account.
        #[max_length = 50]
        contributor_provider -> Varchar,
        /// Resigning contributor's account name.
        #[max_length = 255]
        contributor_username -> Varchar,
        /// Resignation timestamp.
        resigned_at -> Timestamptz,
        /// Resignation reason.
        reason -> Text,
    }
}
