//! Identifier types for wallets and payment methods.

use super::BillingDomainError;
use crate::roster::domain::ProjectRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated wallet kind, stored in canonical lower-case form.
///
/// Kinds are an open set ("paypal", "bank", "crypto", ...); each project
/// holds at most one wallet per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletKind(String);

impl WalletKind {
    /// Creates a validated wallet kind.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::InvalidWalletKind`] when the value is
    /// empty after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, BillingDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(BillingDomainError::InvalidWalletKind(raw));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Returns the kind as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for WalletKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite wallet identity: one kind of wallet within a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletKey {
    project: ProjectRef,
    kind: WalletKind,
}

impl WalletKey {
    /// Creates a wallet key from validated components.
    #[must_use]
    pub const fn new(project: ProjectRef, kind: WalletKind) -> Self {
        Self { project, kind }
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> &ProjectRef {
        &self.project
    }

    /// Returns the wallet kind.
    #[must_use]
    pub const fn kind(&self) -> &WalletKind {
        &self.kind
    }
}

impl fmt::Display for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wallet of {}", self.kind, self.project)
    }
}

/// Validated payment method identifier (account number, address, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodIdentifier(String);

impl MethodIdentifier {
    /// Creates a validated method identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::EmptyMethodIdentifier`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BillingDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BillingDomainError::EmptyMethodIdentifier);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MethodIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MethodIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite payment method identity within a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentMethodKey {
    wallet: WalletKey,
    identifier: MethodIdentifier,
}

impl PaymentMethodKey {
    /// Creates a payment method key from validated components.
    #[must_use]
    pub const fn new(wallet: WalletKey, identifier: MethodIdentifier) -> Self {
        Self { wallet, identifier }
    }

    /// Returns the owning wallet.
    #[must_use]
    pub const fn wallet(&self) -> &WalletKey {
        &self.wallet
    }

    /// Returns the method identifier.
    #[must_use]
    pub const fn identifier(&self) -> &MethodIdentifier {
        &self.identifier
    }
}

impl fmt::Display for PaymentMethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method {} of {}", self.identifier, self.wallet)
    }
}
