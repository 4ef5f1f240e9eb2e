//! Diesel schema for project and contract persistence.

diesel::table! {
    /// Registered projects.
    projects (provider, repo) {
        /// Hosting provider.
        #[max_length = 50]
        provider -> Varchar,
        /// Repository name in `owner/repo` format.
        #[max_length = 255]
        repo -> Varchar,
        /// Project title.
        #[max_length = 255]
        title -> Varchar,
        /// Registration timestamp.
        registered_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contracts binding a contributor to a project role.
    contracts (project_provider, repo, contributor_provider, username, role) {
        /// Hosting provider of the project.
        #[max_length = 50]
        project_provider -> Varchar,
        /// Repository name of the project.
        #[max_length = 255]
        repo -> Varchar,
        /// Provider of the contributor account.
        #[max_length = 50]
        contributor_provider -> Varchar,
        /// Contributor account name.
        #[max_length = 255]
        username -> Varchar,
        /// Contracted role.
        #[max_length = 50]
        role -> Varchar,
        /// Hourly rate in minor currency units.
        hourly_rate -> BigInt,
        /// Removal mark timestamp, if stamped.
        marked_for_removal -> Nullable<Timestamptz>,
    }
}
