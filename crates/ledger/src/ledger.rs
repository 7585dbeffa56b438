//! The transition engine: the ledger's single writer.

use serde_json::json;
use tokio::sync::RwLock;

use facet_core::{AssetId, AssetRecord, CaratWeight, Identity, LedgerError, Role, Stage};
use facet_events::{AuditLog, Transition, TransitionEvent};

use crate::registry::RoleRegistry;
use crate::store::AssetStore;

/// Everything the writer mutates, behind one lock.
#[derive(Debug)]
struct LedgerState {
    roles: RoleRegistry,
    assets: AssetStore,
}

/// The permissioned state-transition ledger.
///
/// Every mutating operation follows the same protocol: authorize the
/// actor, fetch the current record, check the exact predecessor stage,
/// then commit the updated record and its audit event together — all
/// inside a single write-side critical section, so no reader ever
/// observes a record whose event has not been appended, identifier
/// allocation never gaps or duplicates, and a failed operation leaves
/// no state behind.
///
/// Designed to be shared via `Arc<Ledger>`.
pub struct Ledger {
    state: RwLock<LedgerState>,
    audit: AuditLog,
}

impl Ledger {
    /// Create a ledger with `admin` as the one fixed admin identity.
    pub fn new(admin: Identity) -> Self {
        Ledger::with_audit_capacity(admin, None)
    }

    /// Create a ledger with an explicit live-channel capacity for the
    /// audit log (`None` uses the default).
    pub fn with_audit_capacity(admin: Identity, capacity: Option<usize>) -> Self {
        let audit = match capacity {
            Some(capacity) => AuditLog::new(capacity),
            None => AuditLog::default(),
        };
        Ledger {
            state: RwLock::new(LedgerState {
                roles: RoleRegistry::new(admin),
                assets: AssetStore::new(),
            }),
            audit,
        }
    }

    /// The append-only audit trail, for subscription and replay.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Grant `role` to `identity`; only the admin may call this.
    ///
    /// Returns whether the grant was newly added. Role grants are
    /// administrative, not asset transitions, and never appear in the
    /// audit stream.
    pub async fn grant_role(
        &self,
        role: Role,
        identity: Identity,
        actor: &Identity,
    ) -> Result<bool, LedgerError> {
        let mut state = self.state.write().await;
        let granted = state.roles.grant(role, identity.clone(), actor)?;
        if granted {
            tracing::info!(%role, %identity, "role granted");
        } else {
            tracing::debug!(%role, %identity, "role already held, grant ignored");
        }
        Ok(granted)
    }

    // -----------------------------------------------------------------------
    // Stage operations
    // -----------------------------------------------------------------------

    /// Create a new asset in stage `Mined`, owned by the acting miner.
    ///
    /// Input is validated and the actor authorized before an identifier
    /// is allocated, so a failed mine never consumes an id.
    pub async fn mine(
        &self,
        carat: CaratWeight,
        location: String,
        actor: Identity,
    ) -> Result<AssetRecord, LedgerError> {
        let mut state = self.state.write().await;
        state.roles.require(Role::Miner, &actor)?;

        let id = state.assets.allocate();
        let record = AssetRecord::mined(id, actor.clone(), carat, location.clone());
        state.assets.put(record.clone());

        let event = self
            .audit
            .append(Transition::new(id, Stage::Mined, actor).with_detail(json!({
                "location": location,
                "carat_weight": carat.scaled(),
            })))
            .await;

        tracing::info!(
            asset_id = id,
            sequence = event.sequence,
            carat = %carat,
            "asset mined"
        );
        Ok(record)
    }

    /// Advance a mined asset to `CutAndPolished`, recording the finished
    /// weight, cut quality, and cutting location.
    ///
    /// Cutting removes material: a finished weight above the current
    /// rough weight is `InvalidInput`.
    pub async fn cut_and_polish(
        &self,
        id: AssetId,
        finished_carat: CaratWeight,
        quality: String,
        location: String,
        actor: Identity,
    ) -> Result<AssetRecord, LedgerError> {
        self.advance(
            id,
            Role::Cutter,
            Stage::CutAndPolished,
            actor,
            json!({ "quality": quality.clone(), "finished_carat": finished_carat.scaled() }),
            |record| {
                if finished_carat > record.carat_weight {
                    return Err(LedgerError::InvalidInput(format!(
                        "finished weight {finished_carat} exceeds rough weight {}",
                        record.carat_weight
                    )));
                }
                record.carat_weight = finished_carat;
                record.cut = Some(quality);
                record.last_location = location;
                Ok(())
            },
        )
        .await
    }

    /// Advance a cut asset to `Certified`, recording the grades and
    /// report notes.
    pub async fn certify(
        &self,
        id: AssetId,
        color: String,
        clarity: String,
        notes: String,
        actor: Identity,
    ) -> Result<AssetRecord, LedgerError> {
        self.advance(
            id,
            Role::Certifier,
            Stage::Certified,
            actor,
            json!({ "color": color.clone(), "clarity": clarity.clone() }),
            |record| {
                record.color = Some(color);
                record.clarity = Some(clarity);
                record.report_notes = Some(notes);
                Ok(())
            },
        )
        .await
    }

    /// Advance a certified asset to `InRetail` at `location`.
    pub async fn move_to_retail(
        &self,
        id: AssetId,
        location: String,
        actor: Identity,
    ) -> Result<AssetRecord, LedgerError> {
        self.advance(
            id,
            Role::Retailer,
            Stage::InRetail,
            actor,
            json!({ "location": location.clone() }),
            |record| {
                record.last_location = location;
                Ok(())
            },
        )
        .await
    }

    /// Sell an asset in retail: the terminal transition.
    ///
    /// Ownership passes to `buyer`; this is the only operation that
    /// changes `current_owner`.
    pub async fn record_sale(
        &self,
        id: AssetId,
        buyer: Identity,
        price_minor_units: u64,
        actor: Identity,
    ) -> Result<AssetRecord, LedgerError> {
        self.advance(
            id,
            Role::Retailer,
            Stage::Sold,
            actor,
            json!({ "buyer": buyer.clone(), "sale_price": price_minor_units }),
            |record| {
                record.current_owner = buyer;
                record.sale_price = Some(price_minor_units);
                Ok(())
            },
        )
        .await
    }

    /// Shared commit path for the four follow-on stage operations.
    ///
    /// `apply` mutates a copy of the record; the copy only replaces the
    /// stored record (and the audit event is only appended) if every
    /// check passed, which is what makes each operation all-or-nothing.
    async fn advance(
        &self,
        id: AssetId,
        required_role: Role,
        target: Stage,
        actor: Identity,
        detail: serde_json::Value,
        apply: impl FnOnce(&mut AssetRecord) -> Result<(), LedgerError>,
    ) -> Result<AssetRecord, LedgerError> {
        let mut state = self.state.write().await;
        state.roles.require(required_role, &actor)?;

        let current = state.assets.get(id)?;
        if !current.status.can_advance_to(target) {
            tracing::warn!(
                asset_id = id,
                current = %current.status,
                %target,
                %actor,
                "rejected stage transition"
            );
            return Err(LedgerError::InvalidStateTransition {
                asset: id,
                current: current.status,
                target,
            });
        }

        let mut updated = current.clone();
        apply(&mut updated)?;
        let from = updated.status;
        updated.status = target;
        state.assets.put(updated.clone());

        let event = self
            .audit
            .append(
                Transition::new(id, target, actor)
                    .from_stage(from)
                    .with_detail(detail),
            )
            .await;

        tracing::info!(
            asset_id = id,
            sequence = event.sequence,
            from = %from,
            to = %target,
            "stage transition committed"
        );
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The current record for `id`, or `NotFound`.
    pub async fn get_asset(&self, id: AssetId) -> Result<AssetRecord, LedgerError> {
        let state = self.state.read().await;
        state.assets.get(id).cloned()
    }

    /// Whether `identity` holds `role`.
    pub async fn has_role(&self, role: Role, identity: &Identity) -> bool {
        let state = self.state.read().await;
        state.roles.has_role(role, identity)
    }

    /// Number of assets ever created.
    pub async fn asset_count(&self) -> usize {
        let state = self.state.read().await;
        state.assets.len()
    }

    /// The ordered audit events for one asset.
    pub async fn events_for_asset(&self, id: AssetId) -> Vec<TransitionEvent> {
        self.audit.events_for_asset(id).await
    }
}
