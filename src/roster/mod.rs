//! Project and contract management.
//!
//! The roster module owns the identities everything else hangs off: which
//! projects exist, and which contributors hold a contract (project, role,
//! hourly rate) within them. Contract registration enforces a strict
//! conflict policy, removal is a two-step mark-then-delete, and contract
//! listings stream through the lazy pagination layer. The module follows
//! hexagonal architecture:
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
