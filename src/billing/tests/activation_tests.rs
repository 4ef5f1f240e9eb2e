//! Unit tests for the scope-exclusive activation rule.

use crate::billing::domain::{
    Wallet, WalletIdentifier, WalletKey, WalletKind, activate_in_scope,
};
use crate::roster::domain::ProjectRef;
use rstest::rstest;

fn wallet(repo: &str, kind: &str, active: bool) -> Wallet {
    let key = WalletKey::new(
        ProjectRef::from_parts("github", repo).expect("valid project"),
        WalletKind::new(kind).expect("valid kind"),
    );
    let registered = Wallet::register(key, WalletIdentifier::new("acct-1").expect("valid id"));
    registered.with_active(active)
}

fn active_kinds(wallets: &[Wallet]) -> Vec<&str> {
    wallets
        .iter()
        .filter(|wallet| wallet.is_active())
        .map(|wallet| wallet.key().kind().as_str())
        .collect()
}

#[test]
fn activation_swaps_the_active_member() {
    // The concrete two-wallet scenario: A inactive, B active; activating A
    // must flip both.
    let mut wallets = vec![
        wallet("owner/repo", "paypal", false),
        wallet("owner/repo", "bank", true),
    ];
    let project = ProjectRef::from_parts("github", "owner/repo").expect("valid project");
    let kind = WalletKind::new("paypal").expect("valid kind");

    assert!(activate_in_scope(&mut wallets, &project, &kind));
    assert_eq!(active_kinds(&wallets), vec!["paypal"]);
}

#[rstest]
#[case(true)]
#[case(false)]
fn repeated_activation_is_idempotent(#[case] initially_active: bool) {
    let mut wallets = vec![
        wallet("owner/repo", "paypal", initially_active),
        wallet("owner/repo", "bank", !initially_active),
    ];
    let project = ProjectRef::from_parts("github", "owner/repo").expect("valid project");
    let kind = WalletKind::new("paypal").expect("valid kind");

    for _ in 0..3 {
        assert!(activate_in_scope(&mut wallets, &project, &kind));
        assert_eq!(active_kinds(&wallets), vec!["paypal"]);
    }
}

#[test]
fn other_scopes_pass_through_untouched() {
    let mut wallets = vec![
        wallet("owner/repo", "paypal", false),
        wallet("other/repo", "paypal", true),
        wallet("other/repo", "bank", false),
    ];
    let project = ProjectRef::from_parts("github", "owner/repo").expect("valid project");
    let kind = WalletKind::new("paypal").expect("valid kind");

    assert!(activate_in_scope(&mut wallets, &project, &kind));

    let other = ProjectRef::from_parts("github", "other/repo").expect("valid project");
    let untouched: Vec<bool> = wallets
        .iter()
        .filter(|wallet| wallet.key().project() == &other)
        .map(Wallet::is_active)
        .collect();
    assert_eq!(untouched, vec![true, false]);
}

#[test]
fn missing_target_leaves_the_scope_unchanged() {
    let mut wallets = vec![
        wallet("owner/repo", "paypal", false),
        wallet("owner/repo", "bank", true),
    ];
    let project = ProjectRef::from_parts("github", "owner/repo").expect("valid project");
    let kind = WalletKind::new("crypto").expect("valid kind");

    assert!(!activate_in_scope(&mut wallets, &project, &kind));
    assert_eq!(active_kinds(&wallets), vec!["bank"]);
}
