//! Exclusive activation rule shared by wallets and payment methods.

use super::{MethodIdentifier, PaymentMethod, Wallet, WalletKey, WalletKind};
use crate::roster::domain::ProjectRef;

/// Resource belonging to a scope in which at most one member may be active.
///
/// Implementors expose their scope, their identity within the scope, and a
/// copy-with constructor; the activation rule never mutates a resource in
/// place.
pub trait ExclusiveResource: Clone {
    /// Scope key shared by sibling resources.
    type Scope: PartialEq;
    /// Identity distinguishing a resource within its scope.
    type Key: PartialEq;

    /// Returns the scope this resource belongs to.
    fn scope(&self) -> &Self::Scope;

    /// Returns the resource's identity within the scope.
    fn scoped_key(&self) -> &Self::Key;

    /// Returns the active flag.
    fn is_active(&self) -> bool;

    /// Returns a copy with the active flag set to `active`.
    #[must_use]
    fn with_active(&self, active: bool) -> Self;
}

/// Rewrites `resources` so the member of `scope` identified by `key` is the
/// only active member of that scope.
///
/// Resources outside the scope pass through untouched; applying the rule to
/// an already-activated target is a no-op. Returns false when no member of
/// the scope matches `key`, leaving every resource unchanged.
pub fn activate_in_scope<R: ExclusiveResource>(
    resources: &mut [R],
    scope: &R::Scope,
    key: &R::Key,
) -> bool {
    let target_present = resources
        .iter()
        .any(|resource| resource.scope() == scope && resource.scoped_key() == key);
    if !target_present {
        return false;
    }

    for resource in resources.iter_mut() {
        if resource.scope() != scope {
            continue;
        }
        let make_active = resource.scoped_key() == key;
        if resource.is_active() != make_active {
            *resource = resource.with_active(make_active);
        }
    }
    true
}

impl ExclusiveResource for Wallet {
    type Scope = ProjectRef;
    type Key = WalletKind;

    fn scope(&self) -> &ProjectRef {
        self.key().project()
    }

    fn scoped_key(&self) -> &WalletKind {
        self.key().kind()
    }

    fn is_active(&self) -> bool {
        Self::is_active(self)
    }

    fn with_active(&self, active: bool) -> Self {
        Self::with_active(self, active)
    }
}

impl ExclusiveResource for PaymentMethod {
    type Scope = WalletKey;
    type Key = MethodIdentifier;

    fn scope(&self) -> &WalletKey {
        self.key().wallet()
    }

    fn scoped_key(&self) -> &MethodIdentifier {
        self.key().identifier()
    }

    fn is_active(&self) -> bool {
        Self::is_active(self)
    }

    fn with_active(&self, active: bool) -> Self {
        Self::with_active(self, active)
    }
}
