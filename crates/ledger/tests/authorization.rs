//! Role gating: who may do what, and what failed attempts leave behind.

use std::sync::Arc;

use assert_matches::assert_matches;

use facet_core::{CaratWeight, Identity, LedgerError, Role, Stage};
use facet_ledger::Ledger;

fn identity(last_byte: &str) -> Identity {
    format!("0x00000000000000000000000000000000000000{last_byte}")
        .parse()
        .unwrap()
}

#[tokio::test]
async fn mine_requires_the_miner_role_and_consumes_no_id_on_failure() {
    let admin = identity("aa");
    let miner = identity("01");
    let intruder = identity("02");
    let ledger = Arc::new(Ledger::new(admin.clone()));
    ledger
        .grant_role(Role::Miner, miner.clone(), &admin)
        .await
        .unwrap();

    // The admin itself, the eventual miner's peers, anyone without the
    // role — all rejected.
    for actor in [admin.clone(), intruder] {
        let result = ledger
            .mine(CaratWeight::from_scaled(100), "Botswana".into(), actor)
            .await;
        assert_matches!(
            result,
            Err(LedgerError::Unauthorized { required: Role::Miner, .. })
        );
    }

    // Failed attempts consumed nothing: the first successful mine still
    // gets id 1.
    let record = ledger
        .mine(CaratWeight::from_scaled(100), "Botswana".into(), miner)
        .await
        .unwrap();
    assert_eq!(record.id, 1);
    assert_eq!(ledger.audit().len().await, 1);
}

#[tokio::test]
async fn each_operation_checks_its_own_role() {
    let admin = identity("aa");
    let miner = identity("01");
    let ledger = Arc::new(Ledger::new(admin.clone()));
    ledger
        .grant_role(Role::Miner, miner.clone(), &admin)
        .await
        .unwrap();
    ledger
        .mine(CaratWeight::from_scaled(500), "Siberia".into(), miner.clone())
        .await
        .unwrap();

    // The miner holds Miner, not Cutter — cutting with it is rejected
    // even though the stage precondition is satisfied.
    let result = ledger
        .cut_and_polish(1, CaratWeight::from_scaled(250), "Good".into(), "Surat".into(), miner)
        .await;
    assert_matches!(
        result,
        Err(LedgerError::Unauthorized { required: Role::Cutter, .. })
    );

    // Nothing moved.
    let record = ledger.get_asset(1).await.unwrap();
    assert_eq!(record.status, Stage::Mined);
    assert_eq!(ledger.audit().len().await, 1);
}

#[tokio::test]
async fn redundant_grants_leave_one_fact_and_no_audit_entries() {
    let admin = identity("aa");
    let miner = identity("01");
    let ledger = Ledger::new(admin.clone());

    assert!(ledger
        .grant_role(Role::Miner, miner.clone(), &admin)
        .await
        .unwrap());
    assert!(!ledger
        .grant_role(Role::Miner, miner.clone(), &admin)
        .await
        .unwrap());

    assert!(ledger.has_role(Role::Miner, &miner).await);
    // Grants are administrative — the asset audit stream stays empty.
    assert!(ledger.audit().is_empty().await);
}

#[tokio::test]
async fn only_the_admin_grants_roles() {
    let admin = identity("aa");
    let outsider = identity("02");
    let ledger = Ledger::new(admin);

    let result = ledger
        .grant_role(Role::Cutter, identity("03"), &outsider)
        .await;
    assert_matches!(
        result,
        Err(LedgerError::Unauthorized { required: Role::Admin, .. })
    );
    assert!(!ledger.has_role(Role::Cutter, &identity("03")).await);
}
