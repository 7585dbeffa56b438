//! Transition event envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use facet_core::{AssetId, Identity, Stage};

// ---------------------------------------------------------------------------
// Transition (unsequenced)
// ---------------------------------------------------------------------------

/// A successful stage transition as described by the transition engine,
/// before the audit log assigns it a sequence number.
///
/// Constructed via [`Transition::new`] and enriched with the builder
/// methods [`from_stage`](Transition::from_stage) and
/// [`with_detail`](Transition::with_detail).
#[derive(Debug, Clone)]
pub struct Transition {
    /// The asset that advanced.
    pub asset_id: AssetId,

    /// Stage before the transition; `None` when the asset was created.
    pub from_stage: Option<Stage>,

    /// Stage after the transition.
    pub to_stage: Stage,

    /// The identity that performed the operation.
    pub actor: Identity,

    /// Stage-specific JSON detail (e.g. location and weight when mined,
    /// buyer and price when sold).
    pub detail: serde_json::Value,
}

impl Transition {
    /// Describe a transition into `to_stage` with no predecessor stage
    /// and an empty detail object.
    pub fn new(asset_id: AssetId, to_stage: Stage, actor: Identity) -> Self {
        Transition {
            asset_id,
            from_stage: None,
            to_stage,
            actor,
            detail: serde_json::Value::Object(Default::default()),
        }
    }

    /// Record the stage the asset held before this transition.
    pub fn from_stage(mut self, stage: Stage) -> Self {
        self.from_stage = Some(stage);
        self
    }

    /// Attach stage-specific detail.
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = detail;
        self
    }
}

// ---------------------------------------------------------------------------
// TransitionEvent (sequenced, immutable)
// ---------------------------------------------------------------------------

/// One immutable audit record of a successful stage transition.
///
/// `sequence` is global and strictly increasing across all assets, so a
/// consumer replaying the full log reconstructs the global transition
/// order even across interleaved assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Global sequence number, starting at 1. Never reused.
    pub sequence: u64,

    /// The asset that advanced.
    pub asset_id: AssetId,

    /// Stage before the transition; `None` when the asset was created.
    pub from_stage: Option<Stage>,

    /// Stage after the transition.
    pub to_stage: Stage,

    /// The identity that performed the operation.
    pub actor: Identity,

    /// Stage-specific JSON detail.
    pub detail: serde_json::Value,

    /// When the transition was committed (UTC).
    pub recorded_at: DateTime<Utc>,
}

impl TransitionEvent {
    /// Seal a [`Transition`] with its assigned sequence number.
    pub(crate) fn seal(transition: Transition, sequence: u64) -> Self {
        TransitionEvent {
            sequence,
            asset_id: transition.asset_id,
            from_stage: transition.from_stage,
            to_stage: transition.to_stage,
            actor: transition.actor,
            detail: transition.detail,
            recorded_at: Utc::now(),
        }
    }
}
