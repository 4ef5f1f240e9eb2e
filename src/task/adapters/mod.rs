//! Persistence adapters for the task module.
//!
//! Concrete implementations of the task ports:
//!
//! - [`memory`]: thread-safe in-memory storage for tests
//! - [`postgres`]: `PostgreSQL` persistence using Diesel ORM

pub mod memory;
pub mod postgres;
