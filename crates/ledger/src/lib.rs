//! The facet provenance ledger: role-gated stage transitions over an
//! owned asset store, with one audit event per mutation.
//!
//! - [`RoleRegistry`] — role-membership facts, mutated only by the admin.
//! - [`AssetStore`] — asset records and monotonic identifier allocation.
//! - [`Ledger`] — the transition engine; the only writer.
//! - [`QueryService`] — the read-only projection external clients use.

pub mod ledger;
pub mod query;
pub mod registry;
pub mod store;

pub use ledger::Ledger;
pub use query::QueryService;
pub use registry::RoleRegistry;
pub use store::AssetStore;
