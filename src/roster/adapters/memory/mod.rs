//! In-memory repositories for roster tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::roster::{
    domain::{Contract, ContractId, Project, ProjectRef},
    ports::{
        ContractRepository, ContractRepositoryError, ContractRepositoryResult, ProjectRepository,
        ProjectRepositoryError, ProjectRepositoryResult,
    },
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<HashMap<ProjectRef, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn register(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id().clone()));
        }
        state.insert(project.id().clone(), project.clone());
        Ok(())
    }

    async fn find(&self, id: &ProjectRef) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(id).cloned())
    }

    async fn exists(&self, id: &ProjectRef) -> ProjectRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.contains_key(id))
    }
}

/// Thread-safe in-memory contract repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContractRepository {
    state: Arc<RwLock<HashMap<ContractId, Contract>>>,
}

impl InMemoryContractRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(
        &self,
    ) -> ContractRepositoryResult<std::sync::RwLockReadGuard<'_, HashMap<ContractId, Contract>>>
    {
        self.state.read().map_err(|err| {
            ContractRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> ContractRepositoryResult<std::sync::RwLockWriteGuard<'_, HashMap<ContractId, Contract>>>
    {
        self.state.write().map_err(|err| {
            ContractRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Returns the project's contracts sorted by rendered identity.
    ///
    /// Paging needs a stable order across calls.
    fn sorted_by_project(
        state: &HashMap<ContractId, Contract>,
        project: &ProjectRef,
    ) -> Vec<Contract> {
        let mut contracts: Vec<Contract> = state
            .values()
            .filter(|contract| contract.id().project() == project)
            .cloned()
            .collect();
        contracts.sort_by_key(|contract| contract.id().to_string());
        contracts
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn register(&self, contract: &Contract) -> ContractRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.contains_key(contract.id()) {
            return Err(ContractRepositoryError::DuplicateContract(
                contract.id().clone(),
            ));
        }
        state.insert(contract.id().clone(), contract.clone());
        Ok(())
    }

    async fn find(&self, id: &ContractId) -> ContractRepositoryResult<Option<Contract>> {
        let state = self.read_state()?;
        Ok(state.get(id).cloned())
    }

    async fn mark_for_removal(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> ContractRepositoryResult<Contract> {
        let mut state = self.write_state()?;
        let contract = state
            .get(id)
            .ok_or_else(|| ContractRepositoryError::NotFound(id.clone()))?;
        let marked = contract.with_removal_mark(at);
        state.insert(id.clone(), marked.clone());
        Ok(marked)
    }

    async fn delete(&self, id: &ContractId) -> ContractRepositoryResult<()> {
        let mut state = self.write_state()?;
        state
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ContractRepositoryError::NotFound(id.clone()))
    }

    async fn count_by_project(&self, project: &ProjectRef) -> ContractRepositoryResult<u64> {
        let state = self.read_state()?;
        let count = state
            .values()
            .filter(|contract| contract.id().project() == project)
            .count();
        Ok(count as u64)
    }

    async fn fetch_page(
        &self,
        project: &ProjectRef,
        offset: u64,
        limit: u32,
    ) -> ContractRepositoryResult<Vec<Contract>> {
        let state = self.read_state()?;
        let start = usize::try_from(offset).map_err(ContractRepositoryError::persistence)?;
        Ok(Self::sorted_by_project(&state, project)
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect())
    }
}
