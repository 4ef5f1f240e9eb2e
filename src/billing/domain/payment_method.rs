//! Payment method aggregate.

use super::PaymentMethodKey;
use serde::{Deserialize, Serialize};

/// Payment method attached to a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    key: PaymentMethodKey,
    active: bool,
}

impl PaymentMethod {
    /// Registers a new, inactive payment method.
    #[must_use]
    pub const fn register(key: PaymentMethodKey) -> Self {
        Self { key, active: false }
    }

    /// Reconstructs a payment method from persisted storage.
    #[must_use]
    pub const fn from_persisted(key: PaymentMethodKey, active: bool) -> Self {
        Self { key, active }
    }

    /// Returns the payment method identity.
    #[must_use]
    pub const fn key(&self) -> &PaymentMethodKey {
        &self.key
    }

    /// Returns the active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns a copy of this payment method with the active flag set.
    #[must_use]
    pub fn with_active(&self, active: bool) -> Self {
        Self {
            key: self.key.clone(),
            active,
        }
    }
}
