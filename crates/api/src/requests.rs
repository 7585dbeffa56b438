//! Wire types for the write/read/event triad.
//!
//! Carat weights cross this boundary only as scaled integers (real
//! value x100); a decimal-displaying client converts at its own edge
//! and never ships a float. Scaled carats arrive signed so that a
//! negative value can be rejected as `InvalidInput` instead of being
//! silently reinterpreted.

use serde::{Deserialize, Serialize};

use facet_core::{AssetId, AssetRecord, Identity, LedgerError, Role};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A mutating request. Each carries the acting identity; the ledger
/// decides whether that identity holds the role the operation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WriteRequest {
    Mine {
        carat: i64,
        location: String,
        actor: Identity,
    },
    CutAndPolish {
        id: AssetId,
        finished_carat: i64,
        quality: String,
        location: String,
        actor: Identity,
    },
    Certify {
        id: AssetId,
        color: String,
        clarity: String,
        notes: String,
        actor: Identity,
    },
    MoveToRetail {
        id: AssetId,
        location: String,
        actor: Identity,
    },
    RecordSale {
        id: AssetId,
        buyer: Identity,
        price_minor_units: u64,
        actor: Identity,
    },
    GrantRole {
        role: Role,
        identity: Identity,
        actor: Identity,
    },
}

/// A read-only request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReadRequest {
    GetAsset { id: AssetId },
    HasRole { role: Role, identity: Identity },
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful outcome of a [`WriteRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WriteResponse {
    /// The updated (or newly created) record after a stage operation.
    Asset { asset: AssetRecord },
    /// Outcome of a role grant; `granted` is false when the identity
    /// already held the role (idempotent, not an error).
    RoleGranted {
        role: Role,
        identity: Identity,
        granted: bool,
    },
}

/// Successful outcome of a [`ReadRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadResponse {
    Asset { asset: AssetRecord },
    HasRole { value: bool },
}

// ---------------------------------------------------------------------------
// Errors on the wire
// ---------------------------------------------------------------------------

/// Serialized form of a [`LedgerError`]: a stable code plus a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub error: String,
}

impl From<&LedgerError> for ErrorBody {
    fn from(err: &LedgerError) -> Self {
        ErrorBody {
            code: err.code().to_string(),
            error: err.to_string(),
        }
    }
}
