//! Diesel row models for wallet and payment-method persistence.

use super::schema::{payment_methods, wallets};
use diesel::prelude::*;

/// Query result row for wallet records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wallets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WalletRow {
    /// Hosting provider of the owning project.
    pub project_provider: String,
    /// Repository name of the owning project.
    pub repo: String,
    /// Wallet kind.
    pub kind: String,
    /// Wallet identifier.
    pub identifier: String,
    /// Cash balance in minor currency units.
    pub balance: i64,
    /// Active flag.
    pub active: bool,
}

/// Insert model for wallet records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wallets)]
pub struct NewWalletRow {
    /// Hosting provider of the owning project.
    pub project_provider: String,
    /// Repository name of the owning project.
    pub repo: String,
    /// Wallet kind.
    pub kind: String,
    /// Wallet identifier.
    pub identifier: String,
    /// Cash balance in minor currency units.
    pub balance: i64,
    /// Active flag.
    pub active: bool,
}

/// Query result row for payment method records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payment_methods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentMethodRow {
    /// Hosting provider of the owning project.
    pub project_provider: String,
    /// Repository name of the owning project.
    pub repo: String,
    /// Kind of the owning wallet.
    pub wallet_kind: String,
    /// Method identifier.
    pub identifier: String,
    /// Active flag.
    pub active: bool,
}

/// Insert model for payment method records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_methods)]
pub struct NewPaymentMethodRow {
    /// Hosting provider of the owning project.
    pub project_provider: String,
    /// Repository name of the owning project.
    pub repo: String,
    /// Kind of the owning wallet.
    pub wallet_kind: String,
    /// Method identifier.
    pub identifier: String,
    /// Active flag.
    pub active: bool,
}
