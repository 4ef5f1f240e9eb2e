//! Wallet and payment-method management.
//!
//! Each project funds work through wallets, and each wallet pays out
//! through payment methods. Both families carry the same exclusivity rule:
//! within a scope (a project's wallets, a wallet's payment methods) at most
//! one member is active at any instant observable between transactions.
//! Activation swaps the active member atomically; deactivation may leave a
//! scope with zero active members, which is a valid state. The module
//! follows hexagonal architecture:
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
