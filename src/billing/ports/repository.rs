//! Repository ports for wallet and payment-method persistence.
//!
//! `activate` is the only multi-statement operation in the crate: it must
//! run as one transactional unit so that deactivating the scope siblings
//! and activating the target are visible atomically or not at all. The
//! store's transaction isolation serializes concurrent activations in the
//! same scope.

use crate::billing::domain::{PaymentMethod, PaymentMethodKey, Wallet, WalletKey};
use crate::roster::domain::ProjectRef;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for wallet repository operations.
pub type WalletRepositoryResult<T> = Result<T, WalletRepositoryError>;

/// Wallet persistence contract.
#[async_trait]
pub trait WalletRepository: Send + Sync {
    /// Stores a new wallet.
    ///
    /// Registration is strict: a key that already exists is a conflict on
    /// every backend, never an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WalletRepositoryError::DuplicateWallet`] when the key is
    /// already registered.
    async fn register(&self, wallet: &Wallet) -> WalletRepositoryResult<()>;

    /// Finds a wallet by key.
    ///
    /// Returns `None` when the wallet does not exist.
    async fn find(&self, key: &WalletKey) -> WalletRepositoryResult<Option<Wallet>>;

    /// Returns every wallet of the project in a stable order.
    ///
    /// An empty list means the scope has no wallets at all, which is
    /// distinct from a scope whose members are all inactive.
    async fn list_by_project(&self, project: &ProjectRef) -> WalletRepositoryResult<Vec<Wallet>>;

    /// Returns the project's active wallet, if any.
    ///
    /// `Ok(None)` covers both an empty scope and a scope with zero active
    /// members; callers distinguish the two via [`Self::list_by_project`].
    async fn active_in(&self, project: &ProjectRef) -> WalletRepositoryResult<Option<Wallet>>;

    /// Makes the wallet the only active one in its project, atomically.
    ///
    /// Every scope sibling is deactivated and the target activated inside
    /// one transactional unit; on failure the transaction rolls back and no
    /// partial activation state is observable. Re-activating the already
    /// active wallet is a no-op with the same outcome. Returns the fresh
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WalletRepositoryError::NotFound`] when the wallet does not
    /// exist, or [`WalletRepositoryError::UnexpectedRowCount`] when the
    /// target write touches anything but exactly one row.
    async fn activate(&self, key: &WalletKey) -> WalletRepositoryResult<Wallet>;

    /// Deactivates the wallet alone, without a scope scan.
    ///
    /// A scope with zero active wallets is a valid state. Returns the fresh
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WalletRepositoryError::NotFound`] when the wallet does not
    /// exist.
    async fn deactivate(&self, key: &WalletKey) -> WalletRepositoryResult<Wallet>;

    /// Credits the wallet balance and returns the fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WalletRepositoryError::NotFound`] when the wallet does not
    /// exist.
    async fn credit(&self, key: &WalletKey, amount_minor: i64) -> WalletRepositoryResult<Wallet>;

    /// Deletes a wallet.
    ///
    /// # Errors
    ///
    /// Returns [`WalletRepositoryError::RemoveActive`] when the wallet is
    /// active: a scope may only lose its active member through explicit
    /// deactivation, never through deletion. Returns
    /// [`WalletRepositoryError::NotFound`] when the wallet does not exist.
    async fn remove(&self, key: &WalletKey) -> WalletRepositoryResult<()>;
}

/// Errors returned by wallet repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WalletRepositoryError {
    /// A wallet with the same key already exists.
    #[error("duplicate wallet: {0}")]
    DuplicateWallet(WalletKey),

    /// The wallet was not found.
    #[error("wallet not found: {0}")]
    NotFound(WalletKey),

    /// The wallet is active and cannot be removed.
    #[error("cannot remove active wallet: {0}")]
    RemoveActive(WalletKey),

    /// A single-row write touched an unexpected number of rows.
    #[error("write affected {affected} rows, expected {expected}")]
    UnexpectedRowCount {
        /// Rows the statement was expected to touch.
        expected: usize,
        /// Rows the statement actually touched.
        affected: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WalletRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for WalletRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

/// Result type for payment method repository operations.
pub type PaymentMethodRepositoryResult<T> = Result<T, PaymentMethodRepositoryError>;

/// Payment method persistence contract.
///
/// Mirrors [`WalletRepository`] with the scope narrowed to one wallet.
#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    /// Stores a new payment method.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentMethodRepositoryError::DuplicateMethod`] when the
    /// key is already registered.
    async fn register(&self, method: &PaymentMethod) -> PaymentMethodRepositoryResult<()>;

    /// Finds a payment method by key.
    ///
    /// Returns `None` when the method does not exist.
    async fn find(&self, key: &PaymentMethodKey)
    -> PaymentMethodRepositoryResult<Option<PaymentMethod>>;

    /// Returns every payment method of the wallet in a stable order.
    async fn list_for_wallet(
        &self,
        wallet: &WalletKey,
    ) -> PaymentMethodRepositoryResult<Vec<PaymentMethod>>;

    /// Returns the wallet's active payment method, if any.
    async fn active_for(
        &self,
        wallet: &WalletKey,
    ) -> PaymentMethodRepositoryResult<Option<PaymentMethod>>;

    /// Makes the method the only active one in its wallet, atomically.
    ///
    /// Same transactional contract as [`WalletRepository::activate`].
    ///
    /// # Errors
    ///
    /// Returns [`PaymentMethodRepositoryError::NotFound`] when the method
    /// does not exist.
    async fn activate(&self, key: &PaymentMethodKey)
    -> PaymentMethodRepositoryResult<PaymentMethod>;

    /// Deactivates the method alone, without a scope scan.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentMethodRepositoryError::NotFound`] when the method
    /// does not exist.
    async fn deactivate(
        &self,
        key: &PaymentMethodKey,
    ) -> PaymentMethodRepositoryResult<PaymentMethod>;

    /// Deletes a payment method.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentMethodRepositoryError::RemoveActive`] when the
    /// method is active, [`PaymentMethodRepositoryError::NotFound`] when it
    /// does not exist.
    async fn remove(&self, key: &PaymentMethodKey) -> PaymentMethodRepositoryResult<()>;
}

/// Errors returned by payment method repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PaymentMethodRepositoryError {
    /// A payment method with the same key already exists.
    #[error("duplicate payment method: {0}")]
    DuplicateMethod(PaymentMethodKey),

    /// The payment method was not found.
    #[error("payment method not found: {0}")]
    NotFound(PaymentMethodKey),

    /// The payment method is active and cannot be removed.
    #[error("cannot remove active payment method: {0}")]
    RemoveActive(PaymentMethodKey),

    /// A single-row write touched an unexpected number of rows.
    #[error("write affected {affected} rows, expected {expected}")]
    UnexpectedRowCount {
        /// Rows the statement was expected to touch.
        expected: usize,
        /// Rows the statement actually touched.
        affected: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PaymentMethodRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for PaymentMethodRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
