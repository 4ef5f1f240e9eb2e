//! `PostgreSQL` adapters for project and contract persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresContractRepository, PostgresProjectRepository, RosterPgPool};
