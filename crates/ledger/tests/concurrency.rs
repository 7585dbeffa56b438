//! Identifier allocation and audit ordering under concurrent writers.

use std::collections::HashSet;
use std::sync::Arc;

use facet_core::{CaratWeight, Identity, Role};
use facet_ledger::Ledger;

fn identity(last_byte: &str) -> Identity {
    format!("0x00000000000000000000000000000000000000{last_byte}")
        .parse()
        .unwrap()
}

#[tokio::test]
async fn concurrent_mines_get_distinct_gap_free_ids() {
    const N: usize = 32;

    let admin = identity("aa");
    let miner = identity("01");
    let ledger = Arc::new(Ledger::new(admin.clone()));
    ledger
        .grant_role(Role::Miner, miner.clone(), &admin)
        .await
        .unwrap();

    let mut handles = Vec::with_capacity(N);
    for i in 0..N {
        let ledger = Arc::clone(&ledger);
        let miner = miner.clone();
        handles.push(tokio::spawn(async move {
            ledger
                .mine(
                    CaratWeight::from_scaled(100 + i as u64),
                    format!("pit-{i}"),
                    miner,
                )
                .await
                .map(|record| record.id)
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap().unwrap();
        assert!(ids.insert(id), "duplicate id {id}");
    }

    // Exactly 1..=N, no gaps, no duplicates.
    let expected: HashSet<u64> = (1..=N as u64).collect();
    assert_eq!(ids, expected);
    assert_eq!(ledger.asset_count().await, N);
}

#[tokio::test]
async fn interleaved_assets_share_one_strictly_increasing_sequence() {
    let admin = identity("aa");
    let miner = identity("01");
    let cutter = identity("02");
    let ledger = Arc::new(Ledger::new(admin.clone()));
    ledger
        .grant_role(Role::Miner, miner.clone(), &admin)
        .await
        .unwrap();
    ledger
        .grant_role(Role::Cutter, cutter.clone(), &admin)
        .await
        .unwrap();

    // Interleave two assets' lifecycles.
    ledger
        .mine(CaratWeight::from_scaled(500), "A".into(), miner.clone())
        .await
        .unwrap();
    ledger
        .mine(CaratWeight::from_scaled(300), "B".into(), miner)
        .await
        .unwrap();
    ledger
        .cut_and_polish(2, CaratWeight::from_scaled(150), "Good".into(), "S".into(), cutter.clone())
        .await
        .unwrap();
    ledger
        .cut_and_polish(1, CaratWeight::from_scaled(250), "Good".into(), "S".into(), cutter)
        .await
        .unwrap();

    let (all, _rx) = ledger.audit().subscribe_with_replay().await;
    let sequences: Vec<u64> = all.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3, 4]);

    // Per-asset views keep global order.
    let first = ledger.events_for_asset(1).await;
    assert_eq!(
        first.iter().map(|e| e.sequence).collect::<Vec<_>>(),
        vec![1, 4]
    );
    let second = ledger.events_for_asset(2).await;
    assert_eq!(
        second.iter().map(|e| e.sequence).collect::<Vec<_>>(),
        vec![2, 3]
    );
}

#[tokio::test]
async fn readers_never_observe_a_record_ahead_of_its_event() {
    let admin = identity("aa");
    let miner = identity("01");
    let ledger = Arc::new(Ledger::new(admin.clone()));
    ledger
        .grant_role(Role::Miner, miner.clone(), &admin)
        .await
        .unwrap();

    // Writer and reader race; whenever the reader sees an asset, its
    // mined event must already be in the log.
    let writer = {
        let ledger = Arc::clone(&ledger);
        tokio::spawn(async move {
            for i in 0..16 {
                ledger
                    .mine(CaratWeight::from_scaled(100), format!("pit-{i}"), miner.clone())
                    .await
                    .unwrap();
            }
        })
    };

    let reader = {
        let ledger = Arc::clone(&ledger);
        tokio::spawn(async move {
            loop {
                let count = ledger.asset_count().await;
                let logged = ledger.audit().len().await;
                assert!(
                    logged >= count,
                    "saw {count} assets but only {logged} events"
                );
                if count == 16 {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}
