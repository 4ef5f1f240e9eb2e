//! Exclusive wallet and payment-method activation through the full stack.

use super::helpers::Stack;
use bartleby::billing::domain::{MethodIdentifier, PaymentMethodKey, WalletKey, WalletKind};
use bartleby::billing::ports::WalletRepositoryError;
use bartleby::billing::services::{
    BillingError, RegisterPaymentMethodRequest, RegisterWalletRequest,
};
use bartleby::roster::domain::ProjectRef;

fn project_ref(repo: &str) -> ProjectRef {
    ProjectRef::from_parts("github", repo).expect("valid project")
}

fn wallet_key(repo: &str, kind: &str) -> WalletKey {
    WalletKey::new(
        project_ref(repo),
        WalletKind::new(kind).expect("valid kind"),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn activation_swaps_between_sibling_wallets() {
    let stack = Stack::new();
    stack.seed_project("owner/repo").await;

    stack
        .billing
        .register_wallet(RegisterWalletRequest::new(
            "github",
            "owner/repo",
            "paypal",
            "acct-a",
        ))
        .await
        .expect("wallet registration should succeed");
    stack
        .billing
        .register_wallet(RegisterWalletRequest::new(
            "github",
            "owner/repo",
            "bank",
            "acct-b",
        ))
        .await
        .expect("wallet registration should succeed");
    stack
        .billing
        .activate_wallet(&wallet_key("owner/repo", "bank"))
        .await
        .expect("activation should succeed");

    // Wallet A inactive, wallet B active; activating A flips both.
    stack
        .billing
        .activate_wallet(&wallet_key("owner/repo", "paypal"))
        .await
        .expect("activation should succeed");

    let wallets = stack
        .billing
        .wallets_of(&project_ref("owner/repo"))
        .await
        .expect("listing should succeed");
    let states: Vec<(&str, bool)> = wallets
        .iter()
        .map(|wallet| (wallet.key().kind().as_str(), wallet.is_active()))
        .collect();
    assert_eq!(states, vec![("bank", false), ("paypal", true)]);
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_active_wallets_is_distinct_from_an_empty_scope() {
    let stack = Stack::new();
    stack.seed_project("owner/repo").await;

    // Empty scope: no wallets at all.
    let empty = stack
        .billing
        .wallets_of(&project_ref("owner/repo"))
        .await
        .expect("listing should succeed");
    assert!(empty.is_empty());

    stack
        .billing
        .register_wallet(RegisterWalletRequest::new(
            "github",
            "owner/repo",
            "paypal",
            "acct-a",
        ))
        .await
        .expect("wallet registration should succeed");

    // Populated scope with zero actives.
    let active = stack
        .billing
        .active_wallet(&project_ref("owner/repo"))
        .await
        .expect("lookup should succeed");
    assert!(active.is_none());
    let wallets = stack
        .billing
        .wallets_of(&project_ref("owner/repo"))
        .await
        .expect("listing should succeed");
    assert_eq!(wallets.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_requires_deactivation_first() {
    let stack = Stack::new();
    stack.seed_project("owner/repo").await;
    stack
        .billing
        .register_wallet(RegisterWalletRequest::new(
            "github",
            "owner/repo",
            "paypal",
            "acct-a",
        ))
        .await
        .expect("wallet registration should succeed");
    let key = wallet_key("owner/repo", "paypal");
    stack
        .billing
        .activate_wallet(&key)
        .await
        .expect("activation should succeed");

    let rejected = stack.billing.remove_wallet(&key).await;
    assert!(matches!(
        rejected,
        Err(BillingError::Wallet(WalletRepositoryError::RemoveActive(_)))
    ));

    stack
        .billing
        .deactivate_wallet(&key)
        .await
        .expect("deactivation should succeed");
    stack
        .billing
        .remove_wallet(&key)
        .await
        .expect("removal should succeed after deactivation");
}

#[tokio::test(flavor = "multi_thread")]
async fn payment_method_scopes_are_independent_per_wallet() {
    let stack = Stack::new();
    stack.seed_project("owner/repo").await;

    for (kind, identifier) in [("paypal", "m-1"), ("paypal", "m-2"), ("bank", "m-1")] {
        stack
            .billing
            .register_payment_method(RegisterPaymentMethodRequest::new(
                "github",
                "owner/repo",
                kind,
                identifier,
            ))
            .await
            .expect("method registration should succeed");
    }

    let paypal_m1 = PaymentMethodKey::new(
        wallet_key("owner/repo", "paypal"),
        MethodIdentifier::new("m-1").expect("valid identifier"),
    );
    let bank_m1 = PaymentMethodKey::new(
        wallet_key("owner/repo", "bank"),
        MethodIdentifier::new("m-1").expect("valid identifier"),
    );

    stack
        .billing
        .activate_payment_method(&paypal_m1)
        .await
        .expect("activation should succeed");
    stack
        .billing
        .activate_payment_method(&bank_m1)
        .await
        .expect("activation should succeed");

    // One active member per wallet scope, concurrently.
    let paypal_active = stack
        .billing
        .active_payment_method(&wallet_key("owner/repo", "paypal"))
        .await
        .expect("lookup should succeed")
        .expect("paypal method should be active");
    assert_eq!(paypal_active.key().identifier().as_str(), "m-1");
    let bank_active = stack
        .billing
        .active_payment_method(&wallet_key("owner/repo", "bank"))
        .await
        .expect("lookup should succeed")
        .expect("bank method should be active");
    assert_eq!(bank_active.key().identifier().as_str(), "m-1");
}
