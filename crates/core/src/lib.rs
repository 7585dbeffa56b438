//! Domain vocabulary for the facet provenance ledger.
//!
//! This crate has no internal dependencies and defines the types shared
//! by every other layer:
//!
//! - [`Stage`] — the five ordered lifecycle stages of an asset.
//! - [`Role`] — the closed set of capability tags gating each operation.
//! - [`Identity`] — a validated, address-shaped participant identity.
//! - [`CaratWeight`] — fixed-point carat weight (real carats x100).
//! - [`AssetRecord`] — the current state of one tracked asset.
//! - [`LedgerError`] — the closed set of domain error kinds.

pub mod asset;
pub mod carat;
pub mod error;
pub mod identity;
pub mod role;
pub mod stage;
pub mod types;

pub use asset::AssetRecord;
pub use carat::CaratWeight;
pub use error::LedgerError;
pub use identity::Identity;
pub use role::Role;
pub use stage::Stage;
pub use types::AssetId;
