//! `PostgreSQL` adapters for wallet and payment-method persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{
    BillingPgPool, PostgresPaymentMethodRepository, PostgresWalletRepository,
};
