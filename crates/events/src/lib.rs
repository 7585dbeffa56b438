//! Append-only audit trail for the facet provenance ledger.
//!
//! - [`TransitionEvent`] — one immutable record per successful stage
//!   transition, ordered by a single global sequence number.
//! - [`Transition`] — the unsequenced description handed to the log by
//!   the transition engine.
//! - [`AuditLog`] — the append-only store plus a broadcast fan-out with
//!   a gap-free replay-then-live subscription for late observers.

pub mod event;
pub mod log;

pub use event::{Transition, TransitionEvent};
pub use log::AuditLog;
