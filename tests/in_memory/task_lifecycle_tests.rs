//! End-to-end task lifecycle journeys through the full service stack.

use super::helpers::Stack;
use bartleby::roster::domain::{ContractId, ContributorRef, ProjectRef, Role};
use bartleby::roster::services::RegisterContractRequest;
use bartleby::task::domain::{IssueNumber, TaskDomainError, TaskKey, WorkItemKind};
use bartleby::task::services::{RegisterTaskRequest, TaskLifecycleError};
use eyre::ensure;

fn task_key(repo: &str, number: u64) -> TaskKey {
    TaskKey::new(
        ProjectRef::from_parts("github", repo).expect("valid project"),
        IssueNumber::new(number).expect("valid number"),
        WorkItemKind::Issue,
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn full_journey_from_registration_to_removal() -> eyre::Result<()> {
    let stack = Stack::new();
    stack.seed_project("owner/repo").await;

    let contract = stack
        .registry
        .register_contract(RegisterContractRequest::new(
            "github",
            "owner/repo",
            "alice",
            "DEV",
            2_500,
        ))
        .await?;

    let task = stack
        .lifecycle
        .register(RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90))
        .await?;
    ensure!(!task.is_assigned(), "fresh tasks start unassigned");

    let key = task_key("owner/repo", 42);
    let assigned = stack.lifecycle.assign(&key, &contract, 10).await?;
    let assignment = assigned.assignment().expect("assigned");
    assert_eq!(assignment.contract(), contract.id());

    // Resignation is a historical record, not an unassignment.
    let resignation = stack
        .lifecycle
        .record_resignation(&key, "switching projects")
        .await?;
    assert_eq!(resignation.contributor(), contract.id().contributor());
    let still_assigned = stack
        .lifecycle
        .find(&key)
        .await?
        .expect("task should exist");
    ensure!(
        still_assigned.is_assigned(),
        "resignation must leave the task assigned"
    );

    let cleared = stack.lifecycle.unassign(&key).await?;
    ensure!(!cleared.is_assigned(), "unassignment clears every field");

    // The resignation outlives the unassignment.
    let recorded = stack.lifecycle.resignations_of(&key).await?;
    assert_eq!(recorded.len(), 1);

    stack.lifecycle.remove(&key).await?;
    ensure!(
        stack.lifecycle.find(&key).await?.is_none(),
        "removal is terminal"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn contract_from_a_different_project_is_rejected() {
    let stack = Stack::new();
    stack.seed_project("owner/repo").await;
    stack.seed_project("other/repo").await;

    stack
        .lifecycle
        .register(RegisterTaskRequest::new("github", "owner/repo", 7, "DEV", 60))
        .await
        .expect("task registration should succeed");
    let foreign = stack
        .registry
        .register_contract(RegisterContractRequest::new(
            "github",
            "other/repo",
            "alice",
            "DEV",
            2_500,
        ))
        .await
        .expect("contract registration should succeed");

    let result = stack
        .lifecycle
        .assign(&task_key("owner/repo", 7), &foreign, 10)
        .await;
    let Err(TaskLifecycleError::Domain(TaskDomainError::ContractMismatch { task, contract })) =
        result
    else {
        panic!("expected a contract mismatch");
    };
    assert_eq!(task, task_key("owner/repo", 7));
    let expected_contract = ContractId::new(
        ProjectRef::from_parts("github", "other/repo").expect("valid project"),
        ContributorRef::from_parts("github", "alice").expect("valid contributor"),
        Role::new("DEV").expect("valid role"),
    );
    assert_eq!(contract, expected_contract);
}

#[tokio::test(flavor = "multi_thread")]
async fn resignation_on_an_unassigned_task_is_rejected() {
    let stack = Stack::new();
    stack.seed_project("owner/repo").await;
    stack
        .lifecycle
        .register(RegisterTaskRequest::new("github", "owner/repo", 7, "DEV", 60))
        .await
        .expect("task registration should succeed");

    let result = stack
        .lifecycle
        .record_resignation(&task_key("owner/repo", 7), "no longer available")
        .await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::NotAssigned(_)))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn registration_against_an_unknown_project_is_rejected() {
    let stack = Stack::new();
    let result = stack
        .lifecycle
        .register(RegisterTaskRequest::new("github", "ghost/repo", 1, "DEV", 60))
        .await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::ProjectNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn task_listing_streams_lazily_per_project() {
    let stack = Stack::new();
    let project = stack.seed_project("owner/repo").await;
    for number in 1..=6 {
        stack
            .lifecycle
            .register(RegisterTaskRequest::new(
                "github",
                "owner/repo",
                number,
                "DEV",
                30,
            ))
            .await
            .expect("task registration should succeed");
    }

    let iterator = stack
        .lifecycle
        .tasks_of(&project, 4)
        .await
        .expect("iterator should open");
    assert_eq!(iterator.total(), 6);
    let streamed = iterator.collect_remaining().await.expect("drain");
    assert_eq!(streamed.len(), 6);
}
