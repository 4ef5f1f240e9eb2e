//! `PostgreSQL` repository implementations for wallets and payment methods.
//!
//! Activation runs deactivate-siblings and activate-target inside one
//! `PostgreSQL` transaction, so concurrent activations in the same scope
//! serialize on the database and no partial state is ever visible.

use super::{
    models::{NewPaymentMethodRow, NewWalletRow, PaymentMethodRow, WalletRow},
    schema::{payment_methods, wallets},
};
use crate::billing::{
    domain::{
        MethodIdentifier, PaymentMethod, PaymentMethodKey, PersistedWalletData, Wallet,
        WalletIdentifier, WalletKey, WalletKind,
    },
    ports::{
        PaymentMethodRepository, PaymentMethodRepositoryError, PaymentMethodRepositoryResult,
        WalletRepository, WalletRepositoryError, WalletRepositoryResult,
    },
};
use crate::roster::domain::ProjectRef;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by billing adapters.
pub type BillingPgPool = Pool<ConnectionManager<PgConnection>>;

/// Composite primary key tuple for wallet rows.
type WalletRowKey = (String, String, String);

/// Composite primary key tuple for payment method rows.
type MethodRowKey = (String, String, String, String);

/// `PostgreSQL`-backed wallet repository.
#[derive(Debug, Clone)]
pub struct PostgresWalletRepository {
    pool: BillingPgPool,
}

impl PostgresWalletRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BillingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WalletRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WalletRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WalletRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WalletRepositoryError::persistence)?
    }
}

#[async_trait]
impl WalletRepository for PostgresWalletRepository {
    async fn register(&self, wallet: &Wallet) -> WalletRepositoryResult<()> {
        let key = wallet.key().clone();
        let new_row = NewWalletRow {
            project_provider: wallet.key().project().provider().as_str().to_owned(),
            repo: wallet.key().project().repo().as_str().to_owned(),
            kind: wallet.key().kind().as_str().to_owned(),
            identifier: wallet.identifier().as_str().to_owned(),
            balance: wallet.balance_minor(),
            active: wallet.is_active(),
        };

        self.run_blocking(move |connection| {
            // Registration is strict on every backend: a conflicting key is
            // surfaced as a duplicate, never absorbed by an insert-or-ignore.
            diesel::insert_into(wallets::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WalletRepositoryError::DuplicateWallet(key.clone())
                    }
                    _ => WalletRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(&self, key: &WalletKey) -> WalletRepositoryResult<Option<Wallet>> {
        let row_key = wallet_row_key(key);
        self.run_blocking(move |connection| {
            let row = wallets::table
                .find(row_key)
                .select(WalletRow::as_select())
                .first::<WalletRow>(connection)
                .optional()
                .map_err(WalletRepositoryError::persistence)?;
            row.map(row_to_wallet)
                .transpose()
                .map_err(|e| WalletRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn list_by_project(&self, project: &ProjectRef) -> WalletRepositoryResult<Vec<Wallet>> {
        let scope = project.clone();
        self.run_blocking(move |connection| {
            let rows = wallets::table
                .filter(wallets::project_provider.eq(scope.provider().as_str()))
                .filter(wallets::repo.eq(scope.repo().as_str()))
                .order(wallets::kind.asc())
                .select(WalletRow::as_select())
                .load::<WalletRow>(connection)
                .map_err(WalletRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| row_to_wallet(row).map_err(|e| WalletRepositoryError::Persistence(e.into())))
                .collect()
        })
        .await
    }

    async fn active_in(&self, project: &ProjectRef) -> WalletRepositoryResult<Option<Wallet>> {
        let scope = project.clone();
        self.run_blocking(move |connection| {
            let row = wallets::table
                .filter(wallets::project_provider.eq(scope.provider().as_str()))
                .filter(wallets::repo.eq(scope.repo().as_str()))
                .filter(wallets::active.eq(true))
                .select(WalletRow::as_select())
                .first::<WalletRow>(connection)
                .optional()
                .map_err(WalletRepositoryError::persistence)?;
            row.map(row_to_wallet)
                .transpose()
                .map_err(|e| WalletRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn activate(&self, key: &WalletKey) -> WalletRepositoryResult<Wallet> {
        let target = key.clone();
        let row_key = wallet_row_key(key);
        self.run_blocking(move |connection| {
            connection.transaction::<_, WalletRepositoryError, _>(|tx| {
                // Both writes commit together or not at all; a failure in
                // either rolls the scope back to its previous state.
                diesel::update(
                    wallets::table
                        .filter(wallets::project_provider.eq(row_key.0.clone()))
                        .filter(wallets::repo.eq(row_key.1.clone()))
                        .filter(wallets::kind.ne(row_key.2.clone())),
                )
                .set(wallets::active.eq(false))
                .execute(tx)?;

                let affected = diesel::update(wallets::table.find(row_key.clone()))
                    .set(wallets::active.eq(true))
                    .execute(tx)?;
                check_wallet_row(affected, || {
                    WalletRepositoryError::NotFound(target.clone())
                })
            })?;

            let row = wallets::table
                .find(row_key)
                .select(WalletRow::as_select())
                .first::<WalletRow>(connection)
                .map_err(WalletRepositoryError::persistence)?;
            row_to_wallet(row).map_err(|e| WalletRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn deactivate(&self, key: &WalletKey) -> WalletRepositoryResult<Wallet> {
        let target = key.clone();
        let row_key = wallet_row_key(key);
        self.run_blocking(move |connection| {
            let affected = diesel::update(wallets::table.find(row_key.clone()))
                .set(wallets::active.eq(false))
                .execute(connection)
                .map_err(WalletRepositoryError::persistence)?;
            check_wallet_row(affected, || {
                WalletRepositoryError::NotFound(target.clone())
            })?;

            let row = wallets::table
                .find(row_key)
                .select(WalletRow::as_select())
                .first::<WalletRow>(connection)
                .map_err(WalletRepositoryError::persistence)?;
            row_to_wallet(row).map_err(|e| WalletRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn credit(&self, key: &WalletKey, amount_minor: i64) -> WalletRepositoryResult<Wallet> {
        let target = key.clone();
        let row_key = wallet_row_key(key);
        self.run_blocking(move |connection| {
            let affected = diesel::update(wallets::table.find(row_key.clone()))
                .set(wallets::balance.eq(wallets::balance + amount_minor))
                .execute(connection)
                .map_err(WalletRepositoryError::persistence)?;
            check_wallet_row(affected, || {
                WalletRepositoryError::NotFound(target.clone())
            })?;

            let row = wallets::table
                .find(row_key)
                .select(WalletRow::as_select())
                .first::<WalletRow>(connection)
                .map_err(WalletRepositoryError::persistence)?;
            row_to_wallet(row).map_err(|e| WalletRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn remove(&self, key: &WalletKey) -> WalletRepositoryResult<()> {
        let target = key.clone();
        let row_key = wallet_row_key(key);
        self.run_blocking(move |connection| {
            connection.transaction::<_, WalletRepositoryError, _>(|tx| {
                let active: bool = wallets::table
                    .find(row_key.clone())
                    .select(wallets::active)
                    .first(tx)
                    .optional()?
                    .ok_or_else(|| WalletRepositoryError::NotFound(target.clone()))?;
                if active {
                    return Err(WalletRepositoryError::RemoveActive(target.clone()));
                }

                let affected = diesel::delete(wallets::table.find(row_key.clone())).execute(tx)?;
                check_wallet_row(affected, || {
                    WalletRepositoryError::NotFound(target.clone())
                })
            })
        })
        .await
    }
}

/// `PostgreSQL`-backed payment method repository.
#[derive(Debug, Clone)]
pub struct PostgresPaymentMethodRepository {
    pool: BillingPgPool,
}

impl PostgresPaymentMethodRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BillingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PaymentMethodRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PaymentMethodRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(PaymentMethodRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PaymentMethodRepositoryError::persistence)?
    }
}

#[async_trait]
impl PaymentMethodRepository for PostgresPaymentMethodRepository {
    async fn register(&self, method: &PaymentMethod) -> PaymentMethodRepositoryResult<()> {
        let key = method.key().clone();
        let new_row = NewPaymentMethodRow {
            project_provider: method
                .key()
                .wallet()
                .project()
                .provider()
                .as_str()
                .to_owned(),
            repo: method.key().wallet().project().repo().as_str().to_owned(),
            wallet_kind: method.key().wallet().kind().as_str().to_owned(),
            identifier: method.key().identifier().as_str().to_owned(),
            active: method.is_active(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(payment_methods::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PaymentMethodRepositoryError::DuplicateMethod(key.clone())
                    }
                    _ => PaymentMethodRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(
        &self,
        key: &PaymentMethodKey,
    ) -> PaymentMethodRepositoryResult<Option<PaymentMethod>> {
        let row_key = method_row_key(key);
        self.run_blocking(move |connection| {
            let row = payment_methods::table
                .find(row_key)
                .select(PaymentMethodRow::as_select())
                .first::<PaymentMethodRow>(connection)
                .optional()
                .map_err(PaymentMethodRepositoryError::persistence)?;
            row.map(row_to_method)
                .transpose()
                .map_err(|e| PaymentMethodRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn list_for_wallet(
        &self,
        wallet: &WalletKey,
    ) -> PaymentMethodRepositoryResult<Vec<PaymentMethod>> {
        let scope = wallet.clone();
        self.run_blocking(move |connection| {
            let rows = payment_methods::table
                .filter(payment_methods::project_provider.eq(scope.project().provider().as_str()))
                .filter(payment_methods::repo.eq(scope.project().repo().as_str()))
                .filter(payment_methods::wallet_kind.eq(scope.kind().as_str()))
                .order(payment_methods::identifier.asc())
                .select(PaymentMethodRow::as_select())
                .load::<PaymentMethodRow>(connection)
                .map_err(PaymentMethodRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| row_to_method(row).map_err(|e| PaymentMethodRepositoryError::Persistence(e.into())))
                .collect()
        })
        .await
    }

    async fn active_for(
        &self,
        wallet: &WalletKey,
    ) -> PaymentMethodRepositoryResult<Option<PaymentMethod>> {
        let scope = wallet.clone();
        self.run_blocking(move |connection| {
            let row = payment_methods::table
                .filter(payment_methods::project_provider.eq(scope.project().provider().as_str()))
                .filter(payment_methods::repo.eq(scope.project().repo().as_str()))
                .filter(payment_methods::wallet_kind.eq(scope.kind().as_str()))
                .filter(payment_methods::active.eq(true))
                .select(PaymentMethodRow::as_select())
                .first::<PaymentMethodRow>(connection)
                .optional()
                .map_err(PaymentMethodRepositoryError::persistence)?;
            row.map(row_to_method)
                .transpose()
                .map_err(|e| PaymentMethodRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn activate(
        &self,
        key: &PaymentMethodKey,
    ) -> PaymentMethodRepositoryResult<PaymentMethod> {
        let target = key.clone();
        let row_key = method_row_key(key);
        self.run_blocking(move |connection| {
            connection.transaction::<_, PaymentMethodRepositoryError, _>(|tx| {
                diesel::update(
                    payment_methods::table
                        .filter(payment_methods::project_provider.eq(row_key.0.clone()))
                        .filter(payment_methods::repo.eq(row_key.1.clone()))
                        .filter(payment_methods::wallet_kind.eq(row_key.2.clone()))
                        .filter(payment_methods::identifier.ne(row_key.3.clone())),
                )
                .set(payment_methods::active.eq(false))
                .execute(tx)?;

                let affected = diesel::update(payment_methods::table.find(row_key.clone()))
                    .set(payment_methods::active.eq(true))
                    .execute(tx)?;
                check_method_row(affected, || {
                    PaymentMethodRepositoryError::NotFound(target.clone())
                })
            })?;

            let row = payment_methods::table
                .find(row_key)
                .select(PaymentMethodRow::as_select())
                .first::<PaymentMethodRow>(connection)
                .map_err(PaymentMethodRepositoryError::persistence)?;
            row_to_method(row).map_err(|e| PaymentMethodRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn deactivate(
        &self,
        key: &PaymentMethodKey,
    ) -> PaymentMethodRepositoryResult<PaymentMethod> {
        let target = key.clone();
        let row_key = method_row_key(key);
        self.run_blocking(move |connection| {
            let affected = diesel::update(payment_methods::table.find(row_key.clone()))
                .set(payment_methods::active.eq(false))
                .execute(connection)
                .map_err(PaymentMethodRepositoryError::persistence)?;
            check_method_row(affected, || {
                PaymentMethodRepositoryError::NotFound(target.clone())
            })?;

            let row = payment_methods::table
                .find(row_key)
                .select(PaymentMethodRow::as_select())
                .first::<PaymentMethodRow>(connection)
                .map_err(PaymentMethodRepositoryError::persistence)?;
            row_to_method(row).map_err(|e| PaymentMethodRepositoryError::Persistence(e.into()))
        })
        .await
    }

    async fn remove(&self, key: &PaymentMethodKey) -> PaymentMethodRepositoryResult<()> {
        let target = key.clone();
        let row_key = method_row_key(key);
        self.run_blocking(move |connection| {
            connection.transaction::<_, PaymentMethodRepositoryError, _>(|tx| {
                let active: bool = payment_methods::table
                    .find(row_key.clone())
                    .select(payment_methods::active)
                    .first(tx)
                    .optional()?
                    .ok_or_else(|| PaymentMethodRepositoryError::NotFound(target.clone()))?;
                if active {
                    return Err(PaymentMethodRepositoryError::RemoveActive(target.clone()));
                }

                let affected =
                    diesel::delete(payment_methods::table.find(row_key.clone())).execute(tx)?;
                check_method_row(affected, || {
                    PaymentMethodRepositoryError::NotFound(target.clone())
                })
            })
        })
        .await
    }
}

/// Enforces the one-row contract of single-row wallet writes.
fn check_wallet_row(
    affected: usize,
    not_found: impl FnOnce() -> WalletRepositoryError,
) -> WalletRepositoryResult<()> {
    match affected {
        0 => Err(not_found()),
        1 => Ok(()),
        _ => Err(WalletRepositoryError::UnexpectedRowCount {
            expected: 1,
            affected,
        }),
    }
}

/// Enforces the one-row contract of single-row payment method writes.
fn check_method_row(
    affected: usize,
    not_found: impl FnOnce() -> PaymentMethodRepositoryError,
) -> PaymentMethodRepositoryResult<()> {
    match affected {
        0 => Err(not_found()),
        1 => Ok(()),
        _ => Err(PaymentMethodRepositoryError::UnexpectedRowCount {
            expected: 1,
            affected,
        }),
    }
}

fn wallet_row_key(key: &WalletKey) -> WalletRowKey {
    (
        key.project().provider().as_str().to_owned(),
        key.project().repo().as_str().to_owned(),
        key.kind().as_str().to_owned(),
    )
}

fn method_row_key(key: &PaymentMethodKey) -> MethodRowKey {
    (
        key.wallet().project().provider().as_str().to_owned(),
        key.wallet().project().repo().as_str().to_owned(),
        key.wallet().kind().as_str().to_owned(),
        key.identifier().as_str().to_owned(),
    )
}

fn row_to_wallet(row: WalletRow) -> Result<Wallet, Box<dyn std::error::Error + Send + Sync>> {
    let project = ProjectRef::from_parts(&row.project_provider, &row.repo)?;
    let key = WalletKey::new(project, WalletKind::new(row.kind)?);
    Ok(Wallet::from_persisted(PersistedWalletData {
        key,
        identifier: WalletIdentifier::new(row.identifier)?,
        balance_minor: row.balance,
        active: row.active,
    }))
}

fn row_to_method(
    row: PaymentMethodRow,
) -> Result<PaymentMethod, Box<dyn std::error::Error + Send + Sync>> {
    let project = ProjectRef::from_parts(&row.project_provider, &row.repo)?;
    let wallet = WalletKey::new(project, WalletKind::new(row.wallet_kind)?);
    let key = PaymentMethodKey::new(wallet, MethodIdentifier::new(row.identifier)?);
    Ok(PaymentMethod::from_persisted(key, row.active))
}
