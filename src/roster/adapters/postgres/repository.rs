//! `PostgreSQL` repository implementations for projects and contracts.

use super::{
    models::{ContractRow, NewContractRow, NewProjectRow, ProjectRow},
    schema::{contracts, projects},
};
use crate::roster::{
    domain::{
        Contract, ContractId, ContributorRef, HourlyRate, PersistedContractData, Project,
        ProjectRef, Provider, Role, RosterDomainError, Username,
    },
    ports::{
        ContractRepository, ContractRepositoryError, ContractRepositoryResult, ProjectRepository,
        ProjectRepositoryError, ProjectRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by roster adapters.
pub type RosterPgPool = Pool<ConnectionManager<PgConnection>>;

/// Composite primary key tuple for contract rows.
type ContractKey = (String, String, String, String, String);

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: RosterPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RosterPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn register(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let id = project.id().clone();
        let new_row = NewProjectRow {
            provider: project.id().provider().as_str().to_owned(),
            repo: project.id().repo().as_str().to_owned(),
            title: project.title().to_owned(),
            registered_at: project.registered_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(id.clone())
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(&self, id: &ProjectRef) -> ProjectRepositoryResult<Option<Project>> {
        let key = project_key(id);
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(key)
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project)
                .transpose()
                .map_err(ProjectRepositoryError::persistence)
        })
        .await
    }

    async fn exists(&self, id: &ProjectRef) -> ProjectRepositoryResult<bool> {
        let key = project_key(id);
        self.run_blocking(move |connection| {
            let count: i64 = projects::table
                .find(key)
                .count()
                .get_result(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(count > 0)
        })
        .await
    }
}

/// `PostgreSQL`-backed contract repository.
#[derive(Debug, Clone)]
pub struct PostgresContractRepository {
    pool: RosterPgPool,
}

impl PostgresContractRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RosterPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ContractRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ContractRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ContractRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ContractRepositoryError::persistence)?
    }
}

#[async_trait]
impl ContractRepository for PostgresContractRepository {
    async fn register(&self, contract: &Contract) -> ContractRepositoryResult<()> {
        let id = contract.id().clone();
        let new_row = to_new_row(contract);

        self.run_blocking(move |connection| {
            // Registration is strict on every backend: a conflicting key is
            // surfaced as a duplicate, never absorbed by an insert-or-ignore.
            diesel::insert_into(contracts::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ContractRepositoryError::DuplicateContract(id.clone())
                    }
                    _ => ContractRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(&self, id: &ContractId) -> ContractRepositoryResult<Option<Contract>> {
        let key = contract_key(id);
        self.run_blocking(move |connection| {
            let row = contracts::table
                .find(key)
                .select(ContractRow::as_select())
                .first::<ContractRow>(connection)
                .optional()
                .map_err(ContractRepositoryError::persistence)?;
            row.map(row_to_contract)
                .transpose()
                .map_err(ContractRepositoryError::persistence)
        })
        .await
    }

    async fn mark_for_removal(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> ContractRepositoryResult<Contract> {
        let target = id.clone();
        let key = contract_key(id);
        self.run_blocking(move |connection| {
            let affected = diesel::update(contracts::table.find(key.clone()))
                .set(contracts::marked_for_removal.eq(Some(at)))
                .execute(connection)
                .map_err(ContractRepositoryError::persistence)?;
            check_single_row(affected, || ContractRepositoryError::NotFound(target.clone()))?;

            let row = contracts::table
                .find(key)
                .select(ContractRow::as_select())
                .first::<ContractRow>(connection)
                .map_err(ContractRepositoryError::persistence)?;
            row_to_contract(row).map_err(ContractRepositoryError::persistence)
        })
        .await
    }

    async fn delete(&self, id: &ContractId) -> ContractRepositoryResult<()> {
        let target = id.clone();
        let key = contract_key(id);
        self.run_blocking(move |connection| {
            let affected = diesel::delete(contracts::table.find(key))
                .execute(connection)
                .map_err(ContractRepositoryError::persistence)?;
            check_single_row(affected, || ContractRepositoryError::NotFound(target.clone()))
        })
        .await
    }

    async fn count_by_project(&self, project: &ProjectRef) -> ContractRepositoryResult<u64> {
        let scope = project.clone();
        self.run_blocking(move |connection| {
            let count: i64 = contracts::table
                .filter(contracts::project_provider.eq(scope.provider().as_str()))
                .filter(contracts::repo.eq(scope.repo().as_str()))
                .count()
                .get_result(connection)
                .map_err(ContractRepositoryError::persistence)?;
            u64::try_from(count).map_err(ContractRepositoryError::persistence)
        })
        .await
    }

    async fn fetch_page(
        &self,
        project: &ProjectRef,
        offset: u64,
        limit: u32,
    ) -> ContractRepositoryResult<Vec<Contract>> {
        let scope = project.clone();
        self.run_blocking(move |connection| {
            let offset = i64::try_from(offset).map_err(ContractRepositoryError::persistence)?;
            let rows = contracts::table
                .filter(contracts::project_provider.eq(scope.provider().as_str()))
                .filter(contracts::repo.eq(scope.repo().as_str()))
                .order((
                    contracts::contributor_provider.asc(),
                    contracts::username.asc(),
                    contracts::role.asc(),
                ))
                .offset(offset)
                .limit(i64::from(limit))
                .select(ContractRow::as_select())
                .load::<ContractRow>(connection)
                .map_err(ContractRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| row_to_contract(row).map_err(ContractRepositoryError::persistence))
                .collect()
        })
        .await
    }
}

/// Enforces the one-row contract of single-row writes.
fn check_single_row(
    affected: usize,
    not_found: impl FnOnce() -> ContractRepositoryError,
) -> ContractRepositoryResult<()> {
    match affected {
        0 => Err(not_found()),
        1 => Ok(()),
        _ => Err(ContractRepositoryError::UnexpectedRowCount {
            expected: 1,
            affected,
        }),
    }
}

fn project_key(id: &ProjectRef) -> (String, String) {
    (
        id.provider().as_str().to_owned(),
        id.repo().as_str().to_owned(),
    )
}

fn contract_key(id: &ContractId) -> ContractKey {
    (
        id.project().provider().as_str().to_owned(),
        id.project().repo().as_str().to_owned(),
        id.contributor().provider().as_str().to_owned(),
        id.contributor().username().as_str().to_owned(),
        id.role().as_str().to_owned(),
    )
}

fn to_new_row(contract: &Contract) -> NewContractRow {
    NewContractRow {
        project_provider: contract.id().project().provider().as_str().to_owned(),
        repo: contract.id().project().repo().as_str().to_owned(),
        contributor_provider: contract.id().contributor().provider().as_str().to_owned(),
        username: contract.id().contributor().username().as_str().to_owned(),
        role: contract.id().role().as_str().to_owned(),
        hourly_rate: contract.hourly_rate().minor_units(),
        marked_for_removal: contract.marked_for_removal(),
    }
}

fn row_to_project(row: ProjectRow) -> Result<Project, RosterDomainError> {
    let id = ProjectRef::from_parts(&row.provider, &row.repo)?;
    Ok(Project::from_persisted(id, row.title, row.registered_at))
}

pub(crate) fn row_to_contract(row: ContractRow) -> Result<Contract, RosterDomainError> {
    let project = ProjectRef::from_parts(&row.project_provider, &row.repo)?;
    let contributor = ContributorRef::new(
        Provider::try_from(row.contributor_provider.as_str())?,
        Username::new(row.username)?,
    );
    let role = Role::new(row.role)?;
    let data = PersistedContractData {
        id: ContractId::new(project, contributor, role),
        hourly_rate: HourlyRate::new(row.hourly_rate)?,
        marked_for_removal: row.marked_for_removal,
    };
    Ok(Contract::from_persisted(data))
}
