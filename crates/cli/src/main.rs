//! Supply-chain simulation and inspection driver.
//!
//! Stands in for the external clients the ledger serves: grants the
//! four stage roles, walks one diamond through all five stages, mirrors
//! every audit event through a live replay subscriber, then scans and
//! prints everything the ledger recorded.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facet_api::{LedgerApi, ReadRequest, ReadResponse, WriteRequest, WriteResponse};
use facet_core::{AssetRecord, LedgerError, Role, Stage};
use facet_events::TransitionEvent;
use facet_ledger::Ledger;

use config::SimulationConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = SimulationConfig::from_env();
    tracing::info!(admin = %config.admin, "loaded simulation configuration");

    // --- Ledger ---
    let ledger = Ledger::with_audit_capacity(config.admin.clone(), Some(config.audit_capacity));
    let api = LedgerApi::new(Arc::new(ledger));

    // --- Audit observer ---
    // Replay-then-live, so it would also pick up history if it started late.
    let (replay, receiver) = api.subscribe_with_replay().await;
    for event in replay {
        log_event(&event);
    }
    let observer = tokio::spawn(observe(receiver));

    // --- Simulation ---
    let asset_id = simulate(&api, &config).await?;

    // --- Inspection ---
    inspect(&api, &config).await?;
    let history = api.subscribe_with_replay().await.0;
    tracing::info!(events = history.len(), asset_id, "simulation complete");

    // Drop the api (and with it the ledger) to close the broadcast
    // channel, then let the observer drain.
    drop(api);
    tokio::time::timeout(Duration::from_secs(5), observer)
        .await
        .context("audit observer did not shut down")??;
    Ok(())
}

/// Drive one asset through the full lifecycle, returning its id.
async fn simulate(api: &LedgerApi, config: &SimulationConfig) -> anyhow::Result<u64> {
    // Role setup, by the admin.
    for (role, who) in [
        (Role::Miner, &config.miner),
        (Role::Cutter, &config.cutter),
        (Role::Certifier, &config.certifier),
        (Role::Retailer, &config.retailer),
    ] {
        api.write(WriteRequest::GrantRole {
            role,
            identity: who.clone(),
            actor: config.admin.clone(),
        })
        .await
        .with_context(|| format!("granting {role}"))?;
    }

    // Stage 1: mined — 5.00 rough carats out of Siberia.
    let mined = write_asset(
        api,
        WriteRequest::Mine {
            carat: 500,
            location: "Siberia, Russia".into(),
            actor: config.miner.clone(),
        },
    )
    .await?;
    let id = mined.id;
    tracing::info!(asset_id = id, carat = %mined.carat_weight, "stage 1: mined");

    // Stage 2: cut and polished down to 2.50 carats.
    let cut = write_asset(
        api,
        WriteRequest::CutAndPolish {
            id,
            finished_carat: 250,
            quality: "Excellent".into(),
            location: "Surat, India".into(),
            actor: config.cutter.clone(),
        },
    )
    .await?;
    tracing::info!(asset_id = id, carat = %cut.carat_weight, "stage 2: cut and polished");

    // Stage 3: certified D / VVS1.
    write_asset(
        api,
        WriteRequest::Certify {
            id,
            color: "D".into(),
            clarity: "VVS1".into(),
            notes: "Laser inscribed with GIA report number 123456.".into(),
            actor: config.certifier.clone(),
        },
    )
    .await?;
    tracing::info!(asset_id = id, "stage 3: certified");

    // Stage 4: on the shelf.
    write_asset(
        api,
        WriteRequest::MoveToRetail {
            id,
            location: "Tiffany & Co., New York".into(),
            actor: config.retailer.clone(),
        },
    )
    .await?;
    tracing::info!(asset_id = id, "stage 4: in retail");

    // Stage 5: sold to the buyer.
    let sold = write_asset(
        api,
        WriteRequest::RecordSale {
            id,
            buyer: config.buyer.clone(),
            price_minor_units: 5_000_000,
            actor: config.retailer.clone(),
        },
    )
    .await?;
    tracing::info!(asset_id = id, owner = %sold.current_owner, "stage 5: sold");

    // Final verification.
    if sold.status != Stage::Sold {
        bail!("expected the asset to end Sold, found {}", sold.status);
    }
    if sold.current_owner != config.buyer {
        bail!("expected the buyer to own the asset after the sale");
    }
    Ok(id)
}

/// Scan every recorded asset and print it, then verify role membership.
async fn inspect(api: &LedgerApi, config: &SimulationConfig) -> anyhow::Result<()> {
    let mut id = 1;
    loop {
        match api.read(ReadRequest::GetAsset { id }).await {
            Ok(ReadResponse::Asset { asset }) => {
                print_asset(&asset);
                id += 1;
            }
            Ok(_) => bail!("unexpected response to an asset lookup"),
            // Ids are gap-free, so the first miss ends the scan.
            Err(LedgerError::NotFound { .. }) => break,
            Err(e) => return Err(e.into()),
        }
    }

    for (role, who) in [
        (Role::Miner, &config.miner),
        (Role::Cutter, &config.cutter),
        (Role::Certifier, &config.certifier),
        (Role::Retailer, &config.retailer),
    ] {
        let response = api
            .read(ReadRequest::HasRole {
                role,
                identity: who.clone(),
            })
            .await?;
        let ReadResponse::HasRole { value } = response else {
            bail!("unexpected response to a role lookup");
        };
        tracing::info!(%role, identity = %who, authorized = value, "role verification");
    }
    Ok(())
}

/// Issue one write and unwrap the updated record.
async fn write_asset(api: &LedgerApi, request: WriteRequest) -> anyhow::Result<AssetRecord> {
    match api.write(request).await? {
        WriteResponse::Asset { asset } => Ok(asset),
        WriteResponse::RoleGranted { .. } => bail!("unexpected grant response to a stage request"),
    }
}

fn print_asset(asset: &AssetRecord) {
    tracing::info!(
        asset_id = asset.id,
        status = %asset.status,
        status_index = asset.status.index(),
        owner = %asset.current_owner,
        carat = %asset.carat_weight,
        color = asset.color.as_deref().unwrap_or("not set"),
        clarity = asset.clarity.as_deref().unwrap_or("not set"),
        cut = asset.cut.as_deref().unwrap_or("not set"),
        location = %asset.last_location,
        "asset record"
    );
}

/// Mirror every audit event to the log until the ledger shuts down.
async fn observe(mut receiver: broadcast::Receiver<TransitionEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => log_event(&event),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "audit observer lagged, events were missed");
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("audit log closed, observer shutting down");
                break;
            }
        }
    }
}

fn log_event(event: &TransitionEvent) {
    let from = event
        .from_stage
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".into());
    tracing::info!(
        sequence = event.sequence,
        asset_id = event.asset_id,
        %from,
        to = %event.to_stage,
        actor = %event.actor,
        "transition event"
    );
}
