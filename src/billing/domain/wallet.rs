//! Wallet aggregate.

use super::{BillingDomainError, WalletKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated wallet identifier (account number, address, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletIdentifier(String);

impl WalletIdentifier {
    /// Creates a validated wallet identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::EmptyWalletIdentifier`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BillingDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BillingDomainError::EmptyWalletIdentifier);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for WalletIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for WalletIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wallet aggregate root.
///
/// Wallets are immutable snapshots; state changes build new values via the
/// copy-with constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    key: WalletKey,
    identifier: WalletIdentifier,
    balance_minor: i64,
    active: bool,
}

/// Parameter object for reconstructing a persisted wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWalletData {
    /// Persisted wallet identity.
    pub key: WalletKey,
    /// Persisted wallet identifier.
    pub identifier: WalletIdentifier,
    /// Persisted balance in minor currency units.
    pub balance_minor: i64,
    /// Persisted active flag.
    pub active: bool,
}

impl Wallet {
    /// Registers a new, inactive wallet with a zero balance.
    #[must_use]
    pub const fn register(key: WalletKey, identifier: WalletIdentifier) -> Self {
        Self {
            key,
            identifier,
            balance_minor: 0,
            active: false,
        }
    }

    /// Reconstructs a wallet from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWalletData) -> Self {
        Self {
            key: data.key,
            identifier: data.identifier,
            balance_minor: data.balance_minor,
            active: data.active,
        }
    }

    /// Returns the wallet identity.
    #[must_use]
    pub const fn key(&self) -> &WalletKey {
        &self.key
    }

    /// Returns the wallet identifier.
    #[must_use]
    pub const fn identifier(&self) -> &WalletIdentifier {
        &self.identifier
    }

    /// Returns the balance in minor currency units.
    #[must_use]
    pub const fn balance_minor(&self) -> i64 {
        self.balance_minor
    }

    /// Returns the active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns a copy of this wallet with the active flag set to `active`.
    #[must_use]
    pub fn with_active(&self, active: bool) -> Self {
        Self {
            key: self.key.clone(),
            identifier: self.identifier.clone(),
            balance_minor: self.balance_minor,
            active,
        }
    }

    /// Returns a copy of this wallet credited with `amount_minor`.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::NonPositiveDeposit`] for a zero or
    /// negative amount and [`BillingDomainError::BalanceOverflow`] when the
    /// balance would overflow.
    pub fn credited(&self, amount_minor: i64) -> Result<Self, BillingDomainError> {
        if amount_minor <= 0 {
            return Err(BillingDomainError::NonPositiveDeposit(amount_minor));
        }
        let balance_minor = self
            .balance_minor
            .checked_add(amount_minor)
            .ok_or(BillingDomainError::BalanceOverflow)?;
        Ok(Self {
            key: self.key.clone(),
            identifier: self.identifier.clone(),
            balance_minor,
            active: self.active,
        })
    }
}
