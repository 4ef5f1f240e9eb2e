//! Task lifecycle management.
//!
//! Tasks are units of work registered from a project's issues and pull
//! requests. A task is either unassigned or assigned to a contract, with
//! the assignment fields (contract, timestamp, deadline) set and cleared as
//! one unit. Resignations are immutable records appended alongside a task
//! and never transition it. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
