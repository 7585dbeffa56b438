//! Read-only projection over the ledger.

use std::sync::Arc;

use facet_core::{AssetId, AssetRecord, Identity, LedgerError, Role};

use crate::ledger::Ledger;

/// The narrow read surface external clients depend on.
///
/// Exposes asset lookup and role membership checks only; registry
/// internals and raw audit entries are reached through their own
/// surfaces, never through here.
#[derive(Clone)]
pub struct QueryService {
    ledger: Arc<Ledger>,
}

impl QueryService {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        QueryService { ledger }
    }

    /// The current record for `id`, or `NotFound` for zero/unknown ids.
    pub async fn get_asset(&self, id: AssetId) -> Result<AssetRecord, LedgerError> {
        self.ledger.get_asset(id).await
    }

    /// Whether `identity` holds `role`.
    pub async fn has_role(&self, role: Role, identity: &Identity) -> bool {
        self.ledger.has_role(role, identity).await
    }
}
