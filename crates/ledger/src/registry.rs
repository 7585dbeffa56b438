//! Role-membership facts and authorization checks.

use std::collections::{HashMap, HashSet};

use facet_core::{Identity, LedgerError, Role};

/// Holds who may do what.
///
/// Exactly one admin identity exists, fixed at construction and
/// immutable thereafter. Stage roles (miner, cutter, certifier,
/// retailer) are granted by the admin, are non-exclusive, and never
/// expire. Not independently locked — lives inside the ledger's single
/// write-side critical section.
#[derive(Debug)]
pub struct RoleRegistry {
    admin: Identity,
    grants: HashMap<Identity, HashSet<Role>>,
}

impl RoleRegistry {
    /// Create a registry with `admin` as the one admin identity.
    pub fn new(admin: Identity) -> Self {
        RoleRegistry {
            admin,
            grants: HashMap::new(),
        }
    }

    /// The fixed admin identity.
    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    /// Grant `role` to `identity`, authorized by `actor`.
    ///
    /// Returns `Ok(true)` if the grant was newly added and `Ok(false)`
    /// if `identity` already held the role (idempotent, not an error).
    /// Fails with `Unauthorized` unless `actor` is the admin, and with
    /// `InvalidInput` for the admin role itself, which can never be
    /// granted.
    pub fn grant(
        &mut self,
        role: Role,
        identity: Identity,
        actor: &Identity,
    ) -> Result<bool, LedgerError> {
        if *actor != self.admin {
            return Err(LedgerError::Unauthorized {
                actor: actor.clone(),
                required: Role::Admin,
            });
        }
        if role == Role::Admin {
            return Err(LedgerError::InvalidInput(
                "the admin identity is fixed at ledger creation and cannot be granted".into(),
            ));
        }
        Ok(self.grants.entry(identity).or_default().insert(role))
    }

    /// Whether `identity` holds `role`. Pure query, never fails.
    pub fn has_role(&self, role: Role, identity: &Identity) -> bool {
        match role {
            Role::Admin => *identity == self.admin,
            _ => self
                .grants
                .get(identity)
                .is_some_and(|roles| roles.contains(&role)),
        }
    }

    /// Require that `actor` holds `role`, or fail with `Unauthorized`.
    pub fn require(&self, role: Role, actor: &Identity) -> Result<(), LedgerError> {
        if self.has_role(role, actor) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                actor: actor.clone(),
                required: role,
            })
        }
    }
}
