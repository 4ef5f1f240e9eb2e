//! Service orchestration tests for the task lifecycle.

use std::sync::Arc;

use crate::roster::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Contract, ContractId, ContributorRef, HourlyRate, Project, ProjectRef, Role},
    ports::ProjectRepository,
};
use crate::task::{
    adapters::memory::{InMemoryResignationLog, InMemoryTaskRepository},
    domain::{IssueNumber, TaskDomainError, TaskKey, WorkItemKind},
    ports::TaskRepositoryError,
    services::{RegisterTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryResignationLog,
    InMemoryProjectRepository,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    projects: Arc<InMemoryProjectRepository>,
}

#[fixture]
fn harness() -> Harness {
    let projects = Arc::new(InMemoryProjectRepository::new());
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryResignationLog::new()),
        Arc::clone(&projects),
        Arc::new(DefaultClock),
    );
    Harness { service, projects }
}

fn project_ref(repo: &str) -> ProjectRef {
    ProjectRef::from_parts("github", repo).expect("valid project")
}

async fn seed_project(projects: &InMemoryProjectRepository, repo: &str) {
    let project = Project::register(project_ref(repo), "Seeded project", &DefaultClock)
        .expect("valid project");
    projects
        .register(&project)
        .await
        .expect("project registration should succeed");
}

fn dev_contract(repo: &str, username: &str) -> Contract {
    Contract::new(
        ContractId::new(
            project_ref(repo),
            ContributorRef::from_parts("github", username).expect("valid contributor"),
            Role::new("DEV").expect("valid role"),
        ),
        HourlyRate::new(2500).expect("valid rate"),
    )
}

fn task_key(repo: &str, number: u64) -> TaskKey {
    TaskKey::new(
        project_ref(repo),
        IssueNumber::new(number).expect("valid number"),
        WorkItemKind::Issue,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_requires_an_existing_project(harness: Harness) {
    let request = RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90);
    let result = harness.service.register(request).await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::ProjectNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_persists_an_unassigned_task(harness: Harness) {
    seed_project(&harness.projects, "owner/repo").await;

    let created = harness
        .service
        .register(RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90))
        .await
        .expect("registration should succeed");
    assert!(!created.is_assigned());

    let fetched = harness
        .service
        .find(created.key())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(created));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pull_requests_and_issues_are_distinct_tasks(harness: Harness) {
    seed_project(&harness.projects, "owner/repo").await;

    harness
        .service
        .register(RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90))
        .await
        .expect("issue task should register");
    let pr_task = harness
        .service
        .register(
            RegisterTaskRequest::new("github", "owner/repo", 42, "REV", 30).as_pull_request(),
        )
        .await
        .expect("pull request task should register");

    assert!(pr_task.key().kind().is_pull_request());
    let count = harness
        .service
        .tasks_of(&project_ref("owner/repo"), 10)
        .await
        .expect("iterator should open")
        .total();
    assert_eq!(count, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_rejects_contract_from_another_project(harness: Harness) {
    seed_project(&harness.projects, "owner/repo").await;
    harness
        .service
        .register(RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90))
        .await
        .expect("registration should succeed");

    let foreign = dev_contract("other/repo", "alice");
    let result = harness
        .service
        .assign(&task_key("owner/repo", 42), &foreign, 10)
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::ContractMismatch { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_then_unassign_round_trips_the_assignment_fields(harness: Harness) {
    seed_project(&harness.projects, "owner/repo").await;
    harness
        .service
        .register(RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90))
        .await
        .expect("registration should succeed");

    let contract = dev_contract("owner/repo", "alice");
    let key = task_key("owner/repo", 42);

    let assigned = harness
        .service
        .assign(&key, &contract, 10)
        .await
        .expect("assignment should succeed");
    assert!(assigned.is_assigned());

    let cleared = harness
        .service
        .unassign(&key)
        .await
        .expect("unassignment should succeed");
    assert!(!cleared.is_assigned());

    // Unassigning an already-unassigned task still issues the write.
    let cleared_again = harness
        .service
        .unassign(&key)
        .await
        .expect("repeat unassignment should succeed");
    assert_eq!(cleared, cleared_again);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resignation_requires_an_assignee(harness: Harness) {
    seed_project(&harness.projects, "owner/repo").await;
    harness
        .service
        .register(RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90))
        .await
        .expect("registration should succeed");
    let key = task_key("owner/repo", 42);

    let result = harness.service.record_resignation(&key, "too busy").await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::NotAssigned(_)))
    ));

    let contract = dev_contract("owner/repo", "alice");
    harness
        .service
        .assign(&key, &contract, 5)
        .await
        .expect("assignment should succeed");

    let resignation = harness
        .service
        .record_resignation(&key, "too busy")
        .await
        .expect("resignation should succeed");
    assert_eq!(resignation.contributor(), contract.id().contributor());

    // Recording a resignation never unassigns the task.
    let task = harness
        .service
        .find(&key)
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert!(task.is_assigned());

    let recorded = harness
        .service
        .resignations_of(&key)
        .await
        .expect("listing should succeed");
    assert_eq!(recorded, vec![resignation]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_assigned_tasks_without_constraint(harness: Harness) {
    seed_project(&harness.projects, "owner/repo").await;
    harness
        .service
        .register(RegisterTaskRequest::new("github", "owner/repo", 42, "DEV", 90))
        .await
        .expect("registration should succeed");
    let key = task_key("owner/repo", 42);
    harness
        .service
        .assign(&key, &dev_contract("owner/repo", "alice"), 5)
        .await
        .expect("assignment should succeed");

    harness
        .service
        .remove(&key)
        .await
        .expect("removal should succeed");
    let fetched = harness
        .service
        .find(&key)
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_on_missing_tasks_surface_not_found(harness: Harness) {
    let key = task_key("owner/repo", 404);
    let result = harness.service.unassign(&key).await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(
            TaskRepositoryError::NotFound(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_of_streams_the_project_scope_only(harness: Harness) {
    seed_project(&harness.projects, "owner/repo").await;
    seed_project(&harness.projects, "other/repo").await;
    for number in 1..=5 {
        harness
            .service
            .register(RegisterTaskRequest::new(
                "github",
                "owner/repo",
                number,
                "DEV",
                60,
            ))
            .await
            .expect("registration should succeed");
    }
    harness
        .service
        .register(RegisterTaskRequest::new("github", "other/repo", 9, "DEV", 60))
        .await
        .expect("registration should succeed");

    let iterator = harness
        .service
        .tasks_of(&project_ref("owner/repo"), 2)
        .await
        .expect("iterator should open");
    assert_eq!(iterator.total(), 5);

    let streamed = iterator.collect_remaining().await.expect("drain");
    assert_eq!(streamed.len(), 5);
    assert!(
        streamed
            .iter()
            .all(|task| task.key().project() == &project_ref("owner/repo"))
    );
}
