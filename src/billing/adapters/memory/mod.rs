//! In-memory repositories for billing tests.
//!
//! Activation applies the domain rule [`activate_in_scope`] under one write
//! lock, which gives the same atomicity the `PostgreSQL` adapter gets from
//! a transaction.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::billing::{
    domain::{PaymentMethod, PaymentMethodKey, Wallet, WalletKey, activate_in_scope},
    ports::{
        PaymentMethodRepository, PaymentMethodRepositoryError, PaymentMethodRepositoryResult,
        WalletRepository, WalletRepositoryError, WalletRepositoryResult,
    },
};
use crate::roster::domain::ProjectRef;

/// Thread-safe in-memory wallet repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWalletRepository {
    state: Arc<RwLock<Vec<Wallet>>>,
}

impl InMemoryWalletRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> WalletRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<Wallet>>> {
        self.state.read().map_err(|err| {
            WalletRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> WalletRepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<Wallet>>> {
        self.state.write().map_err(|err| {
            WalletRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl WalletRepository for InMemoryWalletRepository {
    async fn register(&self, wallet: &Wallet) -> WalletRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.iter().any(|existing| existing.key() == wallet.key()) {
            return Err(WalletRepositoryError::DuplicateWallet(wallet.key().clone()));
        }
        state.push(wallet.clone());
        Ok(())
    }

    async fn find(&self, key: &WalletKey) -> WalletRepositoryResult<Option<Wallet>> {
        let state = self.read_state()?;
        Ok(state.iter().find(|wallet| wallet.key() == key).cloned())
    }

    async fn list_by_project(&self, project: &ProjectRef) -> WalletRepositoryResult<Vec<Wallet>> {
        let state = self.read_state()?;
        let mut wallets: Vec<Wallet> = state
            .iter()
            .filter(|wallet| wallet.key().project() == project)
            .cloned()
            .collect();
        wallets.sort_by_key(|wallet| wallet.key().to_string());
        Ok(wallets)
    }

    async fn active_in(&self, project: &ProjectRef) -> WalletRepositoryResult<Option<Wallet>> {
        let state = self.read_state()?;
        Ok(state
            .iter()
            .find(|wallet| wallet.key().project() == project && wallet.is_active())
            .cloned())
    }

    async fn activate(&self, key: &WalletKey) -> WalletRepositoryResult<Wallet> {
        let mut state = self.write_state()?;
        if !activate_in_scope(&mut state, key.project(), key.kind()) {
            return Err(WalletRepositoryError::NotFound(key.clone()));
        }
        state
            .iter()
            .find(|wallet| wallet.key() == key)
            .cloned()
            .ok_or_else(|| WalletRepositoryError::NotFound(key.clone()))
    }

    async fn deactivate(&self, key: &WalletKey) -> WalletRepositoryResult<Wallet> {
        let mut state = self.write_state()?;
        let wallet = state
            .iter_mut()
            .find(|wallet| wallet.key() == key)
            .ok_or_else(|| WalletRepositoryError::NotFound(key.clone()))?;
        *wallet = wallet.with_active(false);
        Ok(wallet.clone())
    }

    async fn credit(&self, key: &WalletKey, amount_minor: i64) -> WalletRepositoryResult<Wallet> {
        let mut state = self.write_state()?;
        let wallet = state
            .iter_mut()
            .find(|wallet| wallet.key() == key)
            .ok_or_else(|| WalletRepositoryError::NotFound(key.clone()))?;
        let credited = wallet
            .credited(amount_minor)
            .map_err(WalletRepositoryError::persistence)?;
        *wallet = credited.clone();
        Ok(credited)
    }

    async fn remove(&self, key: &WalletKey) -> WalletRepositoryResult<()> {
        let mut state = self.write_state()?;
        let position = state
            .iter()
            .position(|wallet| wallet.key() == key)
            .ok_or_else(|| WalletRepositoryError::NotFound(key.clone()))?;
        if state
            .get(position)
            .is_some_and(Wallet::is_active)
        {
            return Err(WalletRepositoryError::RemoveActive(key.clone()));
        }
        state.remove(position);
        Ok(())
    }
}

/// Thread-safe in-memory payment method repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentMethodRepository {
    state: Arc<RwLock<Vec<PaymentMethod>>>,
}

impl InMemoryPaymentMethodRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(
        &self,
    ) -> PaymentMethodRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<PaymentMethod>>> {
        self.state.read().map_err(|err| {
            PaymentMethodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> PaymentMethodRepositoryResult<std::sync::RwLockWriteGuard<'_, Vec<PaymentMethod>>> {
        self.state.write().map_err(|err| {
            PaymentMethodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl PaymentMethodRepository for InMemoryPaymentMethodRepository {
    async fn register(&self, method: &PaymentMethod) -> PaymentMethodRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.iter().any(|existing| existing.key() == method.key()) {
            return Err(PaymentMethodRepositoryError::DuplicateMethod(
                method.key().clone(),
            ));
        }
        state.push(method.clone());
        Ok(())
    }

    async fn find(
        &self,
        key: &PaymentMethodKey,
    ) -> PaymentMethodRepositoryResult<Option<PaymentMethod>> {
        let state = self.read_state()?;
        Ok(state.iter().find(|method| method.key() == key).cloned())
    }

    async fn list_for_wallet(
        &self,
        wallet: &WalletKey,
    ) -> PaymentMethodRepositoryResult<Vec<PaymentMethod>> {
        let state = self.read_state()?;
        let mut methods: Vec<PaymentMethod> = state
            .iter()
            .filter(|method| method.key().wallet() == wallet)
            .cloned()
            .collect();
        methods.sort_by_key(|method| method.key().to_string());
        Ok(methods)
    }

    async fn active_for(
        &self,
        wallet: &WalletKey,
    ) -> PaymentMethodRepositoryResult<Option<PaymentMethod>> {
        let state = self.read_state()?;
        Ok(state
            .iter()
            .find(|method| method.key().wallet() == wallet && method.is_active())
            .cloned())
    }

    async fn activate(
        &self,
        key: &PaymentMethodKey,
    ) -> PaymentMethodRepositoryResult<PaymentMethod> {
        let mut state = self.write_state()?;
        if !activate_in_scope(&mut state, key.wallet(), key.identifier()) {
            return Err(PaymentMethodRepositoryError::NotFound(key.clone()));
        }
        state
            .iter()
            .find(|method| method.key() == key)
            .cloned()
            .ok_or_else(|| PaymentMethodRepositoryError::NotFound(key.clone()))
    }

    async fn deactivate(
        &self,
        key: &PaymentMethodKey,
    ) -> PaymentMethodRepositoryResult<PaymentMethod> {
        let mut state = self.write_state()?;
        let method = state
            .iter_mut()
            .find(|method| method.key() == key)
            .ok_or_else(|| PaymentMethodRepositoryError::NotFound(key.clone()))?;
        *method = method.with_active(false);
        Ok(method.clone())
    }

    async fn remove(&self, key: &PaymentMethodKey) -> PaymentMethodRepositoryResult<()> {
        let mut state = self.write_state()?;
        let position = state
            .iter()
            .position(|method| method.key() == key)
            .ok_or_else(|| PaymentMethodRepositoryError::NotFound(key.clone()))?;
        if state
            .get(position)
            .is_some_and(PaymentMethod::is_active)
        {
            return Err(PaymentMethodRepositoryError::RemoveActive(key.clone()));
        }
        state.remove(position);
        Ok(())
    }
}
