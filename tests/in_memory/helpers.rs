//! Shared fixtures for the in-memory integration tests.

use std::sync::Arc;

use bartleby::billing::adapters::memory::{
    InMemoryPaymentMethodRepository, InMemoryWalletRepository,
};
use bartleby::billing::services::BillingService;
use bartleby::roster::adapters::memory::{InMemoryContractRepository, InMemoryProjectRepository};
use bartleby::roster::domain::ProjectRef;
use bartleby::roster::services::{ContractRegistry, RegisterProjectRequest};
use bartleby::task::adapters::memory::{InMemoryResignationLog, InMemoryTaskRepository};
use bartleby::task::services::TaskLifecycleService;
use mockable::DefaultClock;

pub type TestRegistry =
    ContractRegistry<InMemoryProjectRepository, InMemoryContractRepository, DefaultClock>;
pub type TestLifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryResignationLog,
    InMemoryProjectRepository,
    DefaultClock,
>;
pub type TestBilling = BillingService<InMemoryWalletRepository, InMemoryPaymentMethodRepository>;

/// Full service stack sharing one set of in-memory stores.
pub struct Stack {
    pub registry: TestRegistry,
    pub lifecycle: TestLifecycle,
    pub billing: TestBilling,
}

impl Stack {
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let contracts = Arc::new(InMemoryContractRepository::new());
        let clock = Arc::new(DefaultClock);

        let registry = ContractRegistry::new(
            Arc::clone(&projects),
            Arc::clone(&contracts),
            Arc::clone(&clock),
        );
        let lifecycle = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryResignationLog::new()),
            Arc::clone(&projects),
            clock,
        );
        let billing = BillingService::new(
            Arc::new(InMemoryWalletRepository::new()),
            Arc::new(InMemoryPaymentMethodRepository::new()),
        );

        Self {
            registry,
            lifecycle,
            billing,
        }
    }

    /// Registers a project and returns its reference.
    pub async fn seed_project(&self, repo: &str) -> ProjectRef {
        let project = self
            .registry
            .register_project(RegisterProjectRequest::new("github", repo, "Seeded project"))
            .await
            .expect("project registration should succeed");
        project.id().clone()
    }
}
