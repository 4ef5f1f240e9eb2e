//! Bartleby: data-access core for a project, contract, and invoicing
//! backend.
//!
//! This crate provides the persistence-facing core of the backend: lazy
//! pagination over relational result sets, project and contract
//! registration, the task assignment lifecycle, and exclusive activation of
//! funding wallets and payment methods.
//!
//! # Architecture
//!
//! Bartleby follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`,
//!   in-memory)
//!
//! # Modules
//!
//! - [`pagination`]: page-window math and the lazy page-fetching iterator
//! - [`roster`]: projects and contracts
//! - [`task`]: task registration, assignment, and resignation records
//! - [`billing`]: wallets and payment methods with exclusive activation

pub mod billing;
pub mod pagination;
pub mod roster;
pub mod task;
