//! Asset records and monotonic identifier allocation.

use std::collections::HashMap;

use facet_core::{AssetId, AssetRecord, LedgerError};

/// Owns the id -> record mapping and the identifier counter.
///
/// Identifiers are allocated `1, 2, 3, ...` and never reused. The store
/// is not independently locked — all access goes through the ledger's
/// single serialization point, which is what makes allocation atomic
/// under concurrent callers.
#[derive(Debug)]
pub struct AssetStore {
    next_id: AssetId,
    records: HashMap<AssetId, AssetRecord>,
}

impl AssetStore {
    pub fn new() -> Self {
        AssetStore {
            next_id: 1,
            records: HashMap::new(),
        }
    }

    /// Hand out the next identifier.
    ///
    /// Callers must only allocate once every other precondition of the
    /// creating operation has passed, so the successful sequence stays
    /// gap-free.
    pub fn allocate(&mut self) -> AssetId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The current record for `id`, or `NotFound` for zero/unknown ids.
    pub fn get(&self, id: AssetId) -> Result<&AssetRecord, LedgerError> {
        self.records
            .get(&id)
            .ok_or(LedgerError::NotFound { asset: id })
    }

    /// Store `record` under its own id, replacing any previous version
    /// in full.
    pub fn put(&mut self, record: AssetRecord) {
        self.records.insert(record.id, record);
    }

    /// Number of records ever created.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
