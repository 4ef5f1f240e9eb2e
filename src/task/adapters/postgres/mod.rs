//! `PostgreSQL` adapters for task and resignation persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresResignationLog, PostgresTaskRepository, TaskPgPool};
