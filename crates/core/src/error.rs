//! The closed set of domain error kinds.
//!
//! Every failure is returned as a `Result` value; nothing in the ledger
//! panics on bad input. A failed operation leaves no partial state.

use crate::identity::Identity;
use crate::role::Role;
use crate::stage::Stage;
use crate::types::AssetId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The actor does not hold the role this operation requires.
    #[error("unauthorized: {actor} does not hold the {required} role")]
    Unauthorized { actor: Identity, required: Role },

    /// The asset is not in the stage this operation requires.
    #[error("invalid state transition for asset {asset}: {current} -> {target}")]
    InvalidStateTransition {
        asset: AssetId,
        current: Stage,
        target: Stage,
    },

    /// Unknown or non-positive asset identifier.
    #[error("asset {asset} not found")]
    NotFound { asset: AssetId },

    /// Malformed numeric or address-shaped input, rejected before any
    /// state is touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    /// Stable machine-readable code for boundary serialization.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::Unauthorized { .. } => "UNAUTHORIZED",
            LedgerError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            LedgerError::NotFound { .. } => "NOT_FOUND",
            LedgerError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}
