//! The request/response surface end to end: dispatch, boundary
//! validation, and the event stream contract.

use std::sync::Arc;

use assert_matches::assert_matches;

use facet_api::{LedgerApi, ReadRequest, ReadResponse, WriteRequest, WriteResponse};
use facet_core::{Identity, LedgerError, Role, Stage};
use facet_ledger::Ledger;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn identity(last_byte: &str) -> Identity {
    format!("0x00000000000000000000000000000000000000{last_byte}")
        .parse()
        .unwrap()
}

fn api_with_admin() -> (LedgerApi, Identity) {
    let admin = identity("aa");
    (LedgerApi::new(Arc::new(Ledger::new(admin.clone()))), admin)
}

async fn grant(api: &LedgerApi, admin: &Identity, role: Role, who: &Identity) {
    let response = api
        .write(WriteRequest::GrantRole {
            role,
            identity: who.clone(),
            actor: admin.clone(),
        })
        .await
        .unwrap();
    assert_matches!(response, WriteResponse::RoleGranted { granted: true, .. });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_and_reads_drive_the_full_lifecycle() {
    let (api, admin) = api_with_admin();
    let miner = identity("01");
    let cutter = identity("02");
    let certifier = identity("03");
    let retailer = identity("04");
    let buyer = identity("05");

    grant(&api, &admin, Role::Miner, &miner).await;
    grant(&api, &admin, Role::Cutter, &cutter).await;
    grant(&api, &admin, Role::Certifier, &certifier).await;
    grant(&api, &admin, Role::Retailer, &retailer).await;

    let mined = api
        .write(WriteRequest::Mine {
            carat: 500,
            location: "Siberia".into(),
            actor: miner,
        })
        .await
        .unwrap();
    assert_matches!(mined, WriteResponse::Asset { ref asset } if asset.id == 1);

    api.write(WriteRequest::CutAndPolish {
        id: 1,
        finished_carat: 250,
        quality: "Excellent".into(),
        location: "Surat".into(),
        actor: cutter,
    })
    .await
    .unwrap();
    api.write(WriteRequest::Certify {
        id: 1,
        color: "D".into(),
        clarity: "VVS1".into(),
        notes: "GIA-123".into(),
        actor: certifier,
    })
    .await
    .unwrap();
    api.write(WriteRequest::MoveToRetail {
        id: 1,
        location: "Tiffany, NY".into(),
        actor: retailer.clone(),
    })
    .await
    .unwrap();
    api.write(WriteRequest::RecordSale {
        id: 1,
        buyer: buyer.clone(),
        price_minor_units: 5000,
        actor: retailer,
    })
    .await
    .unwrap();

    let response = api.read(ReadRequest::GetAsset { id: 1 }).await.unwrap();
    let ReadResponse::Asset { asset } = response else {
        panic!("expected an asset response");
    };
    assert_eq!(asset.status, Stage::Sold);
    assert_eq!(asset.current_owner, buyer);
    assert_eq!(asset.sale_price, Some(5000));
    assert_eq!(asset.carat_weight.to_string(), "2.50");

    let has_role = api
        .read(ReadRequest::HasRole {
            role: Role::Miner,
            identity: identity("01"),
        })
        .await
        .unwrap();
    assert_eq!(has_role, ReadResponse::HasRole { value: true });
}

#[tokio::test]
async fn negative_carat_is_rejected_before_any_id_is_consumed() {
    let (api, admin) = api_with_admin();
    let miner = identity("01");
    grant(&api, &admin, Role::Miner, &miner).await;

    let result = api
        .write(WriteRequest::Mine {
            carat: -500,
            location: "Siberia".into(),
            actor: miner.clone(),
        })
        .await;
    assert_matches!(result, Err(LedgerError::InvalidInput(_)));

    // The rejected mine consumed nothing.
    let mined = api
        .write(WriteRequest::Mine {
            carat: 500,
            location: "Siberia".into(),
            actor: miner,
        })
        .await
        .unwrap();
    assert_matches!(mined, WriteResponse::Asset { asset } if asset.id == 1);
}

#[tokio::test]
async fn redundant_grant_reports_granted_false() {
    let (api, admin) = api_with_admin();
    let miner = identity("01");
    grant(&api, &admin, Role::Miner, &miner).await;

    let second = api
        .write(WriteRequest::GrantRole {
            role: Role::Miner,
            identity: miner,
            actor: admin,
        })
        .await
        .unwrap();
    assert_matches!(second, WriteResponse::RoleGranted { granted: false, .. });
}

#[tokio::test]
async fn get_asset_for_unknown_ids_is_not_found() {
    let (api, _) = api_with_admin();
    for id in [0, 9999] {
        let result = api.read(ReadRequest::GetAsset { id }).await;
        assert_matches!(result, Err(LedgerError::NotFound { asset }) if asset == id);
    }
}

#[tokio::test]
async fn late_subscriber_replays_history_then_goes_live() {
    let (api, admin) = api_with_admin();
    let miner = identity("01");
    grant(&api, &admin, Role::Miner, &miner).await;

    for i in 0..3 {
        api.write(WriteRequest::Mine {
            carat: 100 + i,
            location: format!("pit-{i}"),
            actor: miner.clone(),
        })
        .await
        .unwrap();
    }

    let (replay, mut live) = api.subscribe_with_replay().await;
    assert_eq!(replay.len(), 3);

    api.write(WriteRequest::Mine {
        carat: 400,
        location: "pit-3".into(),
        actor: miner,
    })
    .await
    .unwrap();

    let next = live.recv().await.unwrap();
    assert_eq!(next.sequence, 4);
    assert_eq!(next.asset_id, 4);
}
