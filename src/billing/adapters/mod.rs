//! Persistence adapters for the billing module.
//!
//! Concrete implementations of the billing ports:
//!
//! - [`memory`]: thread-safe in-memory storage for tests
//! - [`postgres`]: `PostgreSQL` persistence using Diesel ORM

pub mod memory;
pub mod postgres;
