//! Service orchestration tests for wallets and payment methods.

use std::sync::Arc;

use crate::billing::{
    adapters::memory::{InMemoryPaymentMethodRepository, InMemoryWalletRepository},
    domain::{BillingDomainError, MethodIdentifier, PaymentMethodKey, WalletKey, WalletKind},
    ports::{PaymentMethodRepositoryError, WalletRepositoryError},
    services::{BillingError, BillingService, RegisterPaymentMethodRequest, RegisterWalletRequest},
};
use crate::roster::domain::ProjectRef;
use rstest::{fixture, rstest};

type TestService = BillingService<InMemoryWalletRepository, InMemoryPaymentMethodRepository>;

#[fixture]
fn service() -> TestService {
    BillingService::new(
        Arc::new(InMemoryWalletRepository::new()),
        Arc::new(InMemoryPaymentMethodRepository::new()),
    )
}

fn project_ref(repo: &str) -> ProjectRef {
    ProjectRef::from_parts("github", repo).expect("valid project")
}

fn wallet_key(repo: &str, kind: &str) -> WalletKey {
    WalletKey::new(project_ref(repo), WalletKind::new(kind).expect("valid kind"))
}

fn method_key(repo: &str, kind: &str, identifier: &str) -> PaymentMethodKey {
    PaymentMethodKey::new(
        wallet_key(repo, kind),
        MethodIdentifier::new(identifier).expect("valid identifier"),
    )
}

async fn seed_wallet(service: &TestService, repo: &str, kind: &str) {
    service
        .register_wallet(RegisterWalletRequest::new("github", repo, kind, "acct-1"))
        .await
        .expect("wallet registration should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_wallet_registration_is_a_conflict(service: TestService) {
    seed_wallet(&service, "owner/repo", "paypal").await;
    let result = service
        .register_wallet(RegisterWalletRequest::new(
            "github",
            "owner/repo",
            "paypal",
            "acct-2",
        ))
        .await;
    assert!(matches!(
        result,
        Err(BillingError::Wallet(
            WalletRepositoryError::DuplicateWallet(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activation_leaves_exactly_one_active_wallet(service: TestService) {
    seed_wallet(&service, "owner/repo", "paypal").await;
    seed_wallet(&service, "owner/repo", "bank").await;

    let bank = service
        .activate_wallet(&wallet_key("owner/repo", "bank"))
        .await
        .expect("activation should succeed");
    assert!(bank.is_active());

    // Activating the sibling swaps the active member.
    let paypal = service
        .activate_wallet(&wallet_key("owner/repo", "paypal"))
        .await
        .expect("activation should succeed");
    assert!(paypal.is_active());

    let wallets = service
        .wallets_of(&project_ref("owner/repo"))
        .await
        .expect("listing should succeed");
    let active: Vec<&str> = wallets
        .iter()
        .filter(|wallet| wallet.is_active())
        .map(|wallet| wallet.key().kind().as_str())
        .collect();
    assert_eq!(active, vec!["paypal"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_wallet_activation_is_idempotent(service: TestService) {
    seed_wallet(&service, "owner/repo", "paypal").await;
    seed_wallet(&service, "owner/repo", "bank").await;

    for _ in 0..3 {
        service
            .activate_wallet(&wallet_key("owner/repo", "paypal"))
            .await
            .expect("activation should succeed");
        let active = service
            .active_wallet(&project_ref("owner/repo"))
            .await
            .expect("lookup should succeed")
            .expect("one wallet should be active");
        assert_eq!(active.key().kind().as_str(), "paypal");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivation_may_leave_zero_active_wallets(service: TestService) {
    seed_wallet(&service, "owner/repo", "paypal").await;
    service
        .activate_wallet(&wallet_key("owner/repo", "paypal"))
        .await
        .expect("activation should succeed");

    service
        .deactivate_wallet(&wallet_key("owner/repo", "paypal"))
        .await
        .expect("deactivation should succeed");

    // Zero actives is a valid state, distinct from an empty scope.
    let active = service
        .active_wallet(&project_ref("owner/repo"))
        .await
        .expect("lookup should succeed");
    assert!(active.is_none());
    let wallets = service
        .wallets_of(&project_ref("owner/repo"))
        .await
        .expect("listing should succeed");
    assert_eq!(wallets.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_wallets_cannot_be_removed(service: TestService) {
    seed_wallet(&service, "owner/repo", "paypal").await;
    let key = wallet_key("owner/repo", "paypal");
    service
        .activate_wallet(&key)
        .await
        .expect("activation should succeed");

    let result = service.remove_wallet(&key).await;
    assert!(matches!(
        result,
        Err(BillingError::Wallet(WalletRepositoryError::RemoveActive(_)))
    ));

    service
        .deactivate_wallet(&key)
        .await
        .expect("deactivation should succeed");
    service
        .remove_wallet(&key)
        .await
        .expect("removal should succeed after deactivation");
    let fetched = service
        .find_wallet(&key)
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn credit_accumulates_in_minor_units(service: TestService) {
    seed_wallet(&service, "owner/repo", "paypal").await;
    let key = wallet_key("owner/repo", "paypal");

    service
        .credit_wallet(&key, 10_000)
        .await
        .expect("first credit should succeed");
    let wallet = service
        .credit_wallet(&key, 2_500)
        .await
        .expect("second credit should succeed");
    assert_eq!(wallet.balance_minor(), 12_500);

    let result = service.credit_wallet(&key, 0).await;
    assert!(matches!(
        result,
        Err(BillingError::Domain(
            BillingDomainError::NonPositiveDeposit(0)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payment_method_activation_is_scoped_to_its_wallet(service: TestService) {
    for identifier in ["card-1", "card-2"] {
        service
            .register_payment_method(RegisterPaymentMethodRequest::new(
                "github",
                "owner/repo",
                "paypal",
                identifier,
            ))
            .await
            .expect("method registration should succeed");
    }
    service
        .register_payment_method(RegisterPaymentMethodRequest::new(
            "github",
            "owner/repo",
            "bank",
            "card-1",
        ))
        .await
        .expect("method registration should succeed");
    service
        .activate_payment_method(&method_key("owner/repo", "bank", "card-1"))
        .await
        .expect("activation should succeed");

    service
        .activate_payment_method(&method_key("owner/repo", "paypal", "card-2"))
        .await
        .expect("activation should succeed");

    let active = service
        .active_payment_method(&wallet_key("owner/repo", "paypal"))
        .await
        .expect("lookup should succeed")
        .expect("one method should be active");
    assert_eq!(active.key().identifier().as_str(), "card-2");

    // The sibling wallet's scope is untouched.
    let bank_active = service
        .active_payment_method(&wallet_key("owner/repo", "bank"))
        .await
        .expect("lookup should succeed")
        .expect("bank method should stay active");
    assert_eq!(bank_active.key().identifier().as_str(), "card-1");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_payment_methods_cannot_be_removed(service: TestService) {
    service
        .register_payment_method(RegisterPaymentMethodRequest::new(
            "github",
            "owner/repo",
            "paypal",
            "card-1",
        ))
        .await
        .expect("method registration should succeed");
    let key = method_key("owner/repo", "paypal", "card-1");
    service
        .activate_payment_method(&key)
        .await
        .expect("activation should succeed");

    let result = service.remove_payment_method(&key).await;
    assert!(matches!(
        result,
        Err(BillingError::PaymentMethod(
            PaymentMethodRepositoryError::RemoveActive(_)
        ))
    ));

    service
        .deactivate_payment_method(&key)
        .await
        .expect("deactivation should succeed");
    service
        .remove_payment_method(&key)
        .await
        .expect("removal should succeed after deactivation");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activating_a_missing_wallet_surfaces_not_found(service: TestService) {
    let result = service
        .activate_wallet(&wallet_key("owner/repo", "ghost"))
        .await;
    assert!(matches!(
        result,
        Err(BillingError::Wallet(WalletRepositoryError::NotFound(_)))
    ));
}
