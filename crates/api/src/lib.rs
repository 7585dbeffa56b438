//! Request/response surface of the facet provenance ledger.
//!
//! This crate defines the boundary an external transport (HTTP, RPC, a
//! script runner) would mount: serde-serializable request and response
//! types plus [`LedgerApi`], which dispatches them onto the ledger. The
//! transport itself is deliberately absent — callers bring their own.

pub mod requests;
pub mod service;

pub use requests::{ErrorBody, ReadRequest, ReadResponse, WriteRequest, WriteResponse};
pub use service::LedgerApi;
