//! The per-asset record mutated in place by each stage transition.

use serde::{Deserialize, Serialize};

use crate::carat::CaratWeight;
use crate::identity::Identity;
use crate::stage::Stage;
use crate::types::AssetId;

/// The current state of one tracked asset.
///
/// Created only by a successful mine operation and never deleted.
/// Fields are populated progressively as the asset advances; only the
/// most recent location is kept — full stage-by-stage history lives in
/// the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Immutable once assigned, allocated sequentially from 1.
    pub id: AssetId,

    /// The acting miner at creation; changes only at the sale, to the buyer.
    pub current_owner: Identity,

    /// Current lifecycle stage.
    pub status: Stage,

    /// Rough weight at mining, replaced by the finished weight when cut.
    pub carat_weight: CaratWeight,

    /// Color grade, set at certification.
    pub color: Option<String>,

    /// Clarity grade, set at certification.
    pub clarity: Option<String>,

    /// Cut quality, set when cut and polished.
    pub cut: Option<String>,

    /// Most recent known location, overwritten at each stage that moves
    /// the asset.
    pub last_location: String,

    /// Certification report notes, set at certification.
    pub report_notes: Option<String>,

    /// Sale price in minor units, set at the sale.
    pub sale_price: Option<u64>,
}

impl AssetRecord {
    /// A freshly mined record: stage `Mined`, owned by the miner, with
    /// everything later stages fill in still unset.
    pub fn mined(id: AssetId, miner: Identity, carat_weight: CaratWeight, location: String) -> Self {
        AssetRecord {
            id,
            current_owner: miner,
            status: Stage::Mined,
            carat_weight,
            color: None,
            clarity: None,
            cut: None,
            last_location: location,
            report_notes: None,
            sale_price: None,
        }
    }
}
