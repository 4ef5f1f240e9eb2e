//! Error types for billing domain validation.

use thiserror::Error;

/// Errors returned while constructing billing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BillingDomainError {
    /// The wallet kind is empty or contains whitespace.
    #[error("invalid wallet kind '{0}'")]
    InvalidWalletKind(String),

    /// The wallet identifier is empty after trimming.
    #[error("wallet identifier must not be empty")]
    EmptyWalletIdentifier,

    /// The payment method identifier is empty after trimming.
    #[error("payment method identifier must not be empty")]
    EmptyMethodIdentifier,

    /// The deposit amount is not positive.
    #[error("invalid deposit amount {0}, expected a positive amount in minor units")]
    NonPositiveDeposit(i64),

    /// The deposit would overflow the wallet balance.
    #[error("deposit overflows the wallet balance")]
    BalanceOverflow,
}
