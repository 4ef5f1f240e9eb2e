//! Service layer for wallet and payment-method operations.

use crate::billing::{
    domain::{
        BillingDomainError, MethodIdentifier, PaymentMethod, PaymentMethodKey, Wallet,
        WalletIdentifier, WalletKey, WalletKind,
    },
    ports::{
        PaymentMethodRepository, PaymentMethodRepositoryError, WalletRepository,
        WalletRepositoryError,
    },
};
use crate::roster::domain::{ProjectRef, RosterDomainError};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for registering a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterWalletRequest {
    provider: String,
    repo: String,
    kind: String,
    identifier: String,
}

impl RegisterWalletRequest {
    /// Creates a wallet registration request.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        repo: impl Into<String>,
        kind: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            repo: repo.into(),
            kind: kind.into(),
            identifier: identifier.into(),
        }
    }
}

/// Request payload for registering a payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPaymentMethodRequest {
    provider: String,
    repo: String,
    wallet_kind: String,
    identifier: String,
}

impl RegisterPaymentMethodRequest {
    /// Creates a payment method registration request.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        repo: impl Into<String>,
        wallet_kind: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            repo: repo.into(),
            wallet_kind: wallet_kind.into(),
            identifier: identifier.into(),
        }
    }
}

/// Service-level errors for billing operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BillingDomainError),
    /// Roster value validation failed.
    #[error(transparent)]
    Roster(#[from] RosterDomainError),
    /// Wallet persistence failed.
    #[error(transparent)]
    Wallet(#[from] WalletRepositoryError),
    /// Payment method persistence failed.
    #[error(transparent)]
    PaymentMethod(#[from] PaymentMethodRepositoryError),
}

/// Result type for billing service operations.
pub type BillingResult<T> = Result<T, BillingError>;

/// Wallet and payment-method orchestration service.
#[derive(Clone)]
pub struct BillingService<W, M>
where
    W: WalletRepository,
    M: PaymentMethodRepository,
{
    wallets: Arc<W>,
    methods: Arc<M>,
}

impl<W, M> BillingService<W, M>
where
    W: WalletRepository,
    M: PaymentMethodRepository,
{
    /// Creates a new billing service.
    #[must_use]
    pub const fn new(wallets: Arc<W>, methods: Arc<M>) -> Self {
        Self { wallets, methods }
    }

    /// Registers a new, inactive wallet with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError`] when validation fails or the key is already
    /// registered.
    pub async fn register_wallet(&self, request: RegisterWalletRequest) -> BillingResult<Wallet> {
        let key = WalletKey::new(
            ProjectRef::from_parts(&request.provider, &request.repo)?,
            WalletKind::new(request.kind)?,
        );
        let wallet = Wallet::register(key, WalletIdentifier::new(request.identifier)?);
        self.wallets.register(&wallet).await?;
        debug!(wallet = %wallet.key(), "wallet registered");
        Ok(wallet)
    }

    /// Retrieves a wallet by key.
    ///
    /// Returns `Ok(None)` when no wallet matches.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Wallet`] when the lookup fails.
    pub async fn find_wallet(&self, key: &WalletKey) -> BillingResult<Option<Wallet>> {
        Ok(self.wallets.find(key).await?)
    }

    /// Returns every wallet of the project in a stable order.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Wallet`] when the lookup fails.
    pub async fn wallets_of(&self, project: &ProjectRef) -> BillingResult<Vec<Wallet>> {
        Ok(self.wallets.list_by_project(project).await?)
    }

    /// Returns the project's active wallet, if any.
    ///
    /// `Ok(None)` covers both an empty scope and a fully inactive one;
    /// [`Self::wallets_of`] distinguishes the two.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Wallet`] when the lookup fails.
    pub async fn active_wallet(&self, project: &ProjectRef) -> BillingResult<Option<Wallet>> {
        Ok(self.wallets.active_in(project).await?)
    }

    /// Makes the wallet the only active one in its project, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Wallet`] when the wallet does not exist or
    /// the transaction fails.
    pub async fn activate_wallet(&self, key: &WalletKey) -> BillingResult<Wallet> {
        let wallet = self.wallets.activate(key).await?;
        debug!(wallet = %key, "wallet activated");
        Ok(wallet)
    }

    /// Deactivates the wallet alone; the scope may end with zero actives.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Wallet`] when the wallet does not exist.
    pub async fn deactivate_wallet(&self, key: &WalletKey) -> BillingResult<Wallet> {
        let wallet = self.wallets.deactivate(key).await?;
        debug!(wallet = %key, "wallet deactivated");
        Ok(wallet)
    }

    /// Credits the wallet balance.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::NonPositiveDeposit`] (wrapped) for a
    /// zero or negative amount, [`BillingError::Wallet`] when the wallet
    /// does not exist.
    pub async fn credit_wallet(
        &self,
        key: &WalletKey,
        amount_minor: i64,
    ) -> BillingResult<Wallet> {
        if amount_minor <= 0 {
            return Err(BillingDomainError::NonPositiveDeposit(amount_minor).into());
        }
        let wallet = self.wallets.credit(key, amount_minor).await?;
        debug!(wallet = %key, amount = amount_minor, "wallet credited");
        Ok(wallet)
    }

    /// Deletes a wallet; active wallets must be deactivated first.
    ///
    /// # Errors
    ///
    /// Returns [`WalletRepositoryError::RemoveActive`] (wrapped) when the
    /// wallet is active.
    pub async fn remove_wallet(&self, key: &WalletKey) -> BillingResult<()> {
        self.wallets.remove(key).await?;
        debug!(wallet = %key, "wallet removed");
        Ok(())
    }

    /// Registers a new, inactive payment method.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError`] when validation fails or the key is already
    /// registered.
    pub async fn register_payment_method(
        &self,
        request: RegisterPaymentMethodRequest,
    ) -> BillingResult<PaymentMethod> {
        let wallet = WalletKey::new(
            ProjectRef::from_parts(&request.provider, &request.repo)?,
            WalletKind::new(request.wallet_kind)?,
        );
        let key = PaymentMethodKey::new(wallet, MethodIdentifier::new(request.identifier)?);
        let method = PaymentMethod::register(key);
        self.methods.register(&method).await?;
        debug!(method = %method.key(), "payment method registered");
        Ok(method)
    }

    /// Returns every payment method of the wallet in a stable order.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::PaymentMethod`] when the lookup fails.
    pub async fn payment_methods_of(
        &self,
        wallet: &WalletKey,
    ) -> BillingResult<Vec<PaymentMethod>> {
        Ok(self.methods.list_for_wallet(wallet).await?)
    }

    /// Returns the wallet's active payment method, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::PaymentMethod`] when the lookup fails.
    pub async fn active_payment_method(
        &self,
        wallet: &WalletKey,
    ) -> BillingResult<Option<PaymentMethod>> {
        Ok(self.methods.active_for(wallet).await?)
    }

    /// Makes the method the only active one in its wallet, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::PaymentMethod`] when the method does not
    /// exist or the transaction fails.
    pub async fn activate_payment_method(
        &self,
        key: &PaymentMethodKey,
    ) -> BillingResult<PaymentMethod> {
        let method = self.methods.activate(key).await?;
        debug!(method = %key, "payment method activated");
        Ok(method)
    }

    /// Deactivates the method alone; the scope may end with zero actives.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::PaymentMethod`] when the method does not
    /// exist.
    pub async fn deactivate_payment_method(
        &self,
        key: &PaymentMethodKey,
    ) -> BillingResult<PaymentMethod> {
        let method = self.methods.deactivate(key).await?;
        debug!(method = %key, "payment method deactivated");
        Ok(method)
    }

    /// Deletes a payment method; active methods must be deactivated first.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentMethodRepositoryError::RemoveActive`] (wrapped)
    /// when the method is active.
    pub async fn remove_payment_method(&self, key: &PaymentMethodKey) -> BillingResult<()> {
        self.methods.remove(key).await?;
        debug!(method = %key, "payment method removed");
        Ok(())
    }
}
