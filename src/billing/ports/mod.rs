//! Port contracts for wallet and payment-method persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by billing
//! services.

pub mod repository;

pub use repository::{
    PaymentMethodRepository, PaymentMethodRepositoryError, PaymentMethodRepositoryResult,
    WalletRepository, WalletRepositoryError, WalletRepositoryResult,
};
