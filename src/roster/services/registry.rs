//! Service layer for project and contract registration.

use crate::pagination::{Page, PageSource, PagedIterator, PaginationError, PaginationResult};
use crate::roster::{
    domain::{
        Contract, ContractId, ContributorRef, HourlyRate, Project, ProjectRef, Role,
        RosterDomainError,
    },
    ports::{
        ContractRepository, ContractRepositoryError, ProjectRepository, ProjectRepositoryError,
    },
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for registering a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterProjectRequest {
    provider: String,
    repo: String,
    title: String,
}

impl RegisterProjectRequest {
    /// Creates a project registration request.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        repo: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            repo: repo.into(),
            title: title.into(),
        }
    }
}

/// Request payload for registering a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterContractRequest {
    project_provider: String,
    repo: String,
    contributor_provider: String,
    username: String,
    role: String,
    hourly_rate_minor: i64,
}

impl RegisterContractRequest {
    /// Creates a contract registration request.
    #[must_use]
    pub fn new(
        project_provider: impl Into<String>,
        repo: impl Into<String>,
        username: impl Into<String>,
        role: impl Into<String>,
        hourly_rate_minor: i64,
    ) -> Self {
        let project_provider = project_provider.into();
        Self {
            contributor_provider: project_provider.clone(),
            project_provider,
            repo: repo.into(),
            username: username.into(),
            role: role.into(),
            hourly_rate_minor,
        }
    }

    /// Sets a contributor provider differing from the project's.
    #[must_use]
    pub fn with_contributor_provider(mut self, provider: impl Into<String>) -> Self {
        self.contributor_provider = provider.into();
        self
    }
}

/// Service-level errors for roster operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RosterDomainError),
    /// Project persistence failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// Contract persistence failed.
    #[error(transparent)]
    Contract(#[from] ContractRepositoryError),
    /// The referenced project is not registered.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectRef),
    /// Paged listing failed.
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

/// Result type for roster service operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Project and contract registration service.
#[derive(Clone)]
pub struct ContractRegistry<P, R, C>
where
    P: ProjectRepository,
    R: ContractRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    contracts: Arc<R>,
    clock: Arc<C>,
}

impl<P, R, C> ContractRegistry<P, R, C>
where
    P: ProjectRepository,
    R: ContractRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new contract registry service.
    #[must_use]
    pub const fn new(projects: Arc<P>, contracts: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            projects,
            contracts,
            clock,
        }
    }

    /// Registers a new project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when validation fails or the reference is
    /// already registered.
    pub async fn register_project(
        &self,
        request: RegisterProjectRequest,
    ) -> RegistryResult<Project> {
        let id = ProjectRef::from_parts(&request.provider, &request.repo)?;
        let project = Project::register(id, request.title, &*self.clock)?;
        self.projects.register(&project).await?;
        debug!(project = %project.id(), "project registered");
        Ok(project)
    }

    /// Registers a new contract for an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ProjectNotFound`] when the project is not
    /// registered, and [`RegistryError::Contract`] with a duplicate variant
    /// when the identity is already taken.
    pub async fn register_contract(
        &self,
        request: RegisterContractRequest,
    ) -> RegistryResult<Contract> {
        let project = ProjectRef::from_parts(&request.project_provider, &request.repo)?;
        if !self.projects.exists(&project).await? {
            return Err(RegistryError::ProjectNotFound(project));
        }

        let contributor =
            ContributorRef::from_parts(&request.contributor_provider, &request.username)?;
        let role = Role::new(request.role)?;
        let rate = HourlyRate::new(request.hourly_rate_minor)?;
        let contract = Contract::new(ContractId::new(project, contributor, role), rate);
        self.contracts.register(&contract).await?;
        debug!(contract = %contract.id(), "contract registered");
        Ok(contract)
    }

    /// Retrieves a contract by identity.
    ///
    /// Returns `Ok(None)` when no contract matches.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Contract`] when the lookup fails.
    pub async fn find_contract(&self, id: &ContractId) -> RegistryResult<Option<Contract>> {
        Ok(self.contracts.find(id).await?)
    }

    /// Stamps a contract for removal at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Contract`] when the contract does not exist
    /// or the write fails.
    pub async fn mark_contract_for_removal(&self, id: &ContractId) -> RegistryResult<Contract> {
        let marked = self
            .contracts
            .mark_for_removal(id, self.clock.utc())
            .await?;
        debug!(contract = %id, "contract marked for removal");
        Ok(marked)
    }

    /// Deletes a contract.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Contract`] when the contract does not exist.
    pub async fn delete_contract(&self, id: &ContractId) -> RegistryResult<()> {
        self.contracts.delete(id).await?;
        Ok(())
    }

    /// Opens a lazy iterator over the project's contracts.
    ///
    /// The contract count is snapshotted when the iterator is opened; pages
    /// are fetched on demand as the caller drains it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Pagination`] when the page size is invalid
    /// or the count query fails.
    pub async fn contracts_of(
        &self,
        project: &ProjectRef,
        page_size: u32,
    ) -> RegistryResult<PagedIterator<ContractPages<R>>> {
        let source = ContractPages {
            repository: Arc::clone(&self.contracts),
            project: project.clone(),
        };
        Ok(PagedIterator::open(source, page_size).await?)
    }

    /// Fetches a single page of the project's contracts.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Contract`] when the page query fails.
    pub async fn contracts_page(
        &self,
        project: &ProjectRef,
        page: Page,
    ) -> RegistryResult<Vec<Contract>> {
        let window = page.window();
        Ok(self
            .contracts
            .fetch_page(project, window.offset, window.limit)
            .await?)
    }

    /// Returns how many pages of `size` rows cover the project's contracts.
    ///
    /// An empty listing still counts as one (empty) page.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Contract`] when the count query fails.
    pub async fn contract_page_count(
        &self,
        project: &ProjectRef,
        size: u32,
    ) -> RegistryResult<u64> {
        let total = self.contracts.count_by_project(project).await?;
        Ok(Page::total_pages(total, size))
    }
}

/// [`PageSource`] over one project's contracts.
pub struct ContractPages<R> {
    repository: Arc<R>,
    project: ProjectRef,
}

#[async_trait]
impl<R: ContractRepository> PageSource for ContractPages<R> {
    type Item = Contract;

    async fn count(&self) -> PaginationResult<u64> {
        self.repository
            .count_by_project(&self.project)
            .await
            .map_err(PaginationError::fetch_failure)
    }

    async fn fetch(&self, offset: u64, limit: u32) -> PaginationResult<Vec<Contract>> {
        self.repository
            .fetch_page(&self.project, offset, limit)
            .await
            .map_err(PaginationError::fetch_failure)
    }
}
