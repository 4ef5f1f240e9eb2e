//! Domain model for wallets and payment methods.

mod activation;
mod error;
mod ids;
mod payment_method;
mod wallet;

pub use activation::{ExclusiveResource, activate_in_scope};
pub use error::BillingDomainError;
pub use ids::{MethodIdentifier, PaymentMethodKey, WalletKey, WalletKind};
pub use payment_method::PaymentMethod;
pub use wallet::{PersistedWalletData, Wallet, WalletIdentifier};
