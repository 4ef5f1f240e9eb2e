//! In-memory repositories for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::roster::domain::ProjectRef;
use crate::task::{
    domain::{Resignation, Task, TaskKey},
    ports::{
        ResignationLog, ResignationLogError, ResignationLogResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskKey, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, HashMap<TaskKey, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, HashMap<TaskKey, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Returns the project's tasks sorted by rendered identity.
    ///
    /// Paging needs a stable order across calls.
    fn sorted_by_project(state: &HashMap<TaskKey, Task>, project: &ProjectRef) -> Vec<Task> {
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| task.key().project() == project)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.key().to_string());
        tasks
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.contains_key(task.key()) {
            return Err(TaskRepositoryError::DuplicateTask(task.key().clone()));
        }
        state.insert(task.key().clone(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.contains_key(task.key()) {
            return Err(TaskRepositoryError::NotFound(task.key().clone()));
        }
        state.insert(task.key().clone(), task.clone());
        Ok(())
    }

    async fn find(&self, key: &TaskKey) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.get(key).cloned())
    }

    async fn delete(&self, key: &TaskKey) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        state
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| TaskRepositoryError::NotFound(key.clone()))
    }

    async fn count_by_project(&self, project: &ProjectRef) -> TaskRepositoryResult<u64> {
        let state = self.read_state()?;
        let count = state
            .values()
            .filter(|task| task.key().project() == project)
            .count();
        Ok(count as u64)
    }

    async fn fetch_page(
        &self,
        project: &ProjectRef,
        offset: u64,
        limit: u32,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        let start = usize::try_from(offset).map_err(TaskRepositoryError::persistence)?;
        Ok(Self::sorted_by_project(&state, project)
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect())
    }
}

/// Thread-safe in-memory resignation log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResignationLog {
    state: Arc<RwLock<Vec<Resignation>>>,
}

impl InMemoryResignationLog {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResignationLog for InMemoryResignationLog {
    async fn append(&self, resignation: &Resignation) -> ResignationLogResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ResignationLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.push(resignation.clone());
        Ok(())
    }

    async fn list_for(&self, task: &TaskKey) -> ResignationLogResult<Vec<Resignation>> {
        let state = self.state.read().map_err(|err| {
            ResignationLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .iter()
            .filter(|resignation| resignation.task() == task)
            .cloned()
            .collect())
    }
}
