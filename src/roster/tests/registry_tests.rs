//! Service orchestration tests for project and contract registration.

use std::sync::Arc;

use crate::pagination::Page;
use crate::roster::{
    adapters::memory::{InMemoryContractRepository, InMemoryProjectRepository},
    domain::{ContractId, ContributorRef, ProjectRef, Role},
    ports::ContractRepositoryError,
    services::{
        ContractRegistry, RegisterContractRequest, RegisterProjectRequest, RegistryError,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestRegistry =
    ContractRegistry<InMemoryProjectRepository, InMemoryContractRepository, DefaultClock>;

#[fixture]
fn registry() -> TestRegistry {
    ContractRegistry::new(
        Arc::new(InMemoryProjectRepository::new()),
        Arc::new(InMemoryContractRepository::new()),
        Arc::new(DefaultClock),
    )
}

async fn register_project(registry: &TestRegistry, repo: &str) {
    registry
        .register_project(RegisterProjectRequest::new("github", repo, "Billing backend"))
        .await
        .expect("project registration should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contract_registration_requires_project(registry: TestRegistry) {
    let request = RegisterContractRequest::new("github", "owner/repo", "alice", "DEV", 2500);
    let result = registry.register_contract(request).await;
    assert!(matches!(result, Err(RegistryError::ProjectNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contract_registration_persists_and_is_retrievable(registry: TestRegistry) {
    register_project(&registry, "owner/repo").await;

    let created = registry
        .register_contract(RegisterContractRequest::new(
            "github",
            "owner/repo",
            "alice",
            "dev",
            2500,
        ))
        .await
        .expect("contract registration should succeed");

    let fetched = registry
        .find_contract(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(created));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_contract_registration_is_a_conflict(registry: TestRegistry) {
    register_project(&registry, "owner/repo").await;
    let request = RegisterContractRequest::new("github", "owner/repo", "alice", "DEV", 2500);

    registry
        .register_contract(request.clone())
        .await
        .expect("first registration should succeed");
    let result = registry.register_contract(request).await;

    assert!(matches!(
        result,
        Err(RegistryError::Contract(
            ContractRepositoryError::DuplicateContract(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removal_marked_contract_still_occupies_its_key(registry: TestRegistry) {
    register_project(&registry, "owner/repo").await;
    let request = RegisterContractRequest::new("github", "owner/repo", "alice", "DEV", 2500);
    let created = registry
        .register_contract(request.clone())
        .await
        .expect("registration should succeed");

    let marked = registry
        .mark_contract_for_removal(created.id())
        .await
        .expect("marking should succeed");
    assert!(marked.marked_for_removal().is_some());

    let result = registry.register_contract(request).await;
    assert!(matches!(
        result,
        Err(RegistryError::Contract(
            ContractRepositoryError::DuplicateContract(_)
        ))
    ));

    registry
        .delete_contract(created.id())
        .await
        .expect("deletion should succeed");
    let fetched = registry
        .find_contract(created.id())
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contracts_of_streams_every_contract_exactly_once(registry: TestRegistry) {
    register_project(&registry, "owner/repo").await;
    for n in 0..7 {
        registry
            .register_contract(RegisterContractRequest::new(
                "github",
                "owner/repo",
                format!("contributor{n}"),
                "DEV",
                2000 + n,
            ))
            .await
            .expect("registration should succeed");
    }

    let project = ProjectRef::from_parts("github", "owner/repo").expect("valid project");
    let iterator = registry
        .contracts_of(&project, 3)
        .await
        .expect("iterator should open");
    assert_eq!(iterator.total(), 7);

    let streamed = iterator.collect_remaining().await.expect("drain");
    assert_eq!(streamed.len(), 7);

    let mut usernames: Vec<String> = streamed
        .iter()
        .map(|contract| contract.id().contributor().username().as_str().to_owned())
        .collect();
    let rendered = usernames.clone();
    usernames.sort();
    // The in-memory adapter orders by rendered identity, so the stream is
    // already sorted and free of duplicates.
    assert_eq!(rendered, usernames);
    usernames.dedup();
    assert_eq!(usernames.len(), 7);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contracts_page_selects_the_requested_window(registry: TestRegistry) {
    register_project(&registry, "owner/repo").await;
    for n in 0..5 {
        registry
            .register_contract(RegisterContractRequest::new(
                "github",
                "owner/repo",
                format!("contributor{n}"),
                "DEV",
                2000,
            ))
            .await
            .expect("registration should succeed");
    }
    let project = ProjectRef::from_parts("github", "owner/repo").expect("valid project");

    let second_page = registry
        .contracts_page(&project, Page::new(2, 2).expect("valid page"))
        .await
        .expect("page fetch should succeed");
    let usernames: Vec<&str> = second_page
        .iter()
        .map(|contract| contract.id().contributor().username().as_str())
        .collect();
    assert_eq!(usernames, vec!["contributor2", "contributor3"]);

    let pages = registry
        .contract_page_count(&project, 2)
        .await
        .expect("count should succeed");
    assert_eq!(pages, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_for_removal_requires_existing_contract(registry: TestRegistry) {
    let id = ContractId::new(
        ProjectRef::from_parts("github", "owner/repo").expect("valid project"),
        ContributorRef::from_parts("github", "ghost").expect("valid contributor"),
        Role::new("DEV").expect("valid role"),
    );
    let result = registry.mark_contract_for_removal(&id).await;
    assert!(matches!(
        result,
        Err(RegistryError::Contract(ContractRepositoryError::NotFound(_)))
    ));
}
