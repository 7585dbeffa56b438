//! Dispatch from wire requests onto the ledger.

use std::sync::Arc;

use tokio::sync::broadcast;

use facet_core::{CaratWeight, LedgerError};
use facet_events::TransitionEvent;
use facet_ledger::{Ledger, QueryService};

use crate::requests::{ReadRequest, ReadResponse, WriteRequest, WriteResponse};

/// The request/response facade over one ledger instance.
///
/// Cheaply cloneable; all state lives behind the shared [`Ledger`].
#[derive(Clone)]
pub struct LedgerApi {
    ledger: Arc<Ledger>,
    query: QueryService,
}

impl LedgerApi {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        let query = QueryService::new(Arc::clone(&ledger));
        LedgerApi { ledger, query }
    }

    /// Execute one mutating request.
    ///
    /// Scaled carat integers are converted (and negatives rejected) here
    /// at the boundary, before the ledger allocates anything.
    pub async fn write(&self, request: WriteRequest) -> Result<WriteResponse, LedgerError> {
        match request {
            WriteRequest::Mine {
                carat,
                location,
                actor,
            } => {
                let carat = CaratWeight::try_from_scaled(carat)?;
                let asset = self.ledger.mine(carat, location, actor).await?;
                Ok(WriteResponse::Asset { asset })
            }
            WriteRequest::CutAndPolish {
                id,
                finished_carat,
                quality,
                location,
                actor,
            } => {
                let finished = CaratWeight::try_from_scaled(finished_carat)?;
                let asset = self
                    .ledger
                    .cut_and_polish(id, finished, quality, location, actor)
                    .await?;
                Ok(WriteResponse::Asset { asset })
            }
            WriteRequest::Certify {
                id,
                color,
                clarity,
                notes,
                actor,
            } => {
                let asset = self.ledger.certify(id, color, clarity, notes, actor).await?;
                Ok(WriteResponse::Asset { asset })
            }
            WriteRequest::MoveToRetail {
                id,
                location,
                actor,
            } => {
                let asset = self.ledger.move_to_retail(id, location, actor).await?;
                Ok(WriteResponse::Asset { asset })
            }
            WriteRequest::RecordSale {
                id,
                buyer,
                price_minor_units,
                actor,
            } => {
                let asset = self
                    .ledger
                    .record_sale(id, buyer, price_minor_units, actor)
                    .await?;
                Ok(WriteResponse::Asset { asset })
            }
            WriteRequest::GrantRole {
                role,
                identity,
                actor,
            } => {
                let granted = self
                    .ledger
                    .grant_role(role, identity.clone(), &actor)
                    .await?;
                Ok(WriteResponse::RoleGranted {
                    role,
                    identity,
                    granted,
                })
            }
        }
    }

    /// Execute one read-only request.
    pub async fn read(&self, request: ReadRequest) -> Result<ReadResponse, LedgerError> {
        match request {
            ReadRequest::GetAsset { id } => {
                let asset = self.query.get_asset(id).await?;
                Ok(ReadResponse::Asset { asset })
            }
            ReadRequest::HasRole { role, identity } => {
                let value = self.query.has_role(role, &identity).await;
                Ok(ReadResponse::HasRole { value })
            }
        }
    }

    /// Subscribe to transition events appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TransitionEvent> {
        self.ledger.audit().subscribe()
    }

    /// Full history plus a live receiver, with no gap between the two.
    pub async fn subscribe_with_replay(
        &self,
    ) -> (Vec<TransitionEvent>, broadcast::Receiver<TransitionEvent>) {
        self.ledger.audit().subscribe_with_replay().await
    }
}
