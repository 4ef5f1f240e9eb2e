//! Lazy paging over contract listings through the full service stack.

use super::helpers::Stack;
use bartleby::pagination::PaginationError;
use bartleby::roster::services::RegisterContractRequest;
use rstest::rstest;

#[rstest]
#[case(1)]
#[case(3)]
#[case(10)]
#[case(25)]
#[tokio::test(flavor = "multi_thread")]
async fn streaming_visits_every_contract_once_for_any_page_size(#[case] page_size: u32) {
    let stack = Stack::new();
    let project = stack.seed_project("owner/repo").await;

    for n in 0..10 {
        stack
            .registry
            .register_contract(RegisterContractRequest::new(
                "github",
                "owner/repo",
                format!("contributor{n:02}"),
                "DEV",
                2_000,
            ))
            .await
            .expect("contract registration should succeed");
    }

    let mut iterator = stack
        .registry
        .contracts_of(&project, page_size)
        .await
        .expect("iterator should open");
    assert_eq!(iterator.total(), 10);

    let mut seen = Vec::new();
    while iterator.has_next() {
        let contract = iterator.try_next().await.expect("element should stream");
        seen.push(contract.id().contributor().username().as_str().to_owned());
    }

    let expected: Vec<String> = (0..10).map(|n| format!("contributor{n:02}")).collect();
    assert_eq!(seen, expected);

    // The protocol keeps failing once drained, on every further call.
    assert!(matches!(
        iterator.try_next().await,
        Err(PaginationError::Exhausted)
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn snapshot_shields_the_iterator_from_later_registrations() {
    let stack = Stack::new();
    let project = stack.seed_project("owner/repo").await;

    for n in 0..4 {
        stack
            .registry
            .register_contract(RegisterContractRequest::new(
                "github",
                "owner/repo",
                format!("contributor{n}"),
                "DEV",
                2_000,
            ))
            .await
            .expect("contract registration should succeed");
    }

    let iterator = stack
        .registry
        .contracts_of(&project, 2)
        .await
        .expect("iterator should open");

    // A contract registered after the snapshot does not extend iteration.
    stack
        .registry
        .register_contract(RegisterContractRequest::new(
            "github",
            "owner/repo",
            "latecomer",
            "DEV",
            2_000,
        ))
        .await
        .expect("contract registration should succeed");

    let streamed = iterator.collect_remaining().await.expect("drain");
    assert_eq!(streamed.len(), 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_projects_stream_nothing(#[values(1, 7)] page_size: u32) {
    let stack = Stack::new();
    let project = stack.seed_project("owner/repo").await;

    let mut iterator = stack
        .registry
        .contracts_of(&project, page_size)
        .await
        .expect("iterator should open");
    assert_eq!(iterator.total(), 0);
    assert!(!iterator.has_next());
    assert!(matches!(
        iterator.try_next().await,
        Err(PaginationError::Exhausted)
    ));
}
