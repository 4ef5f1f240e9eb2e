//! Persistence adapters for the roster module.
//!
//! Concrete implementations of the roster ports:
//!
//! - [`memory`]: thread-safe in-memory storage for tests
//! - [`postgres`]: `PostgreSQL` persistence using Diesel ORM

pub mod memory;
pub mod postgres;
