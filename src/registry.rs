//! The registry seam: the narrow interface to the external ledger
//!
//! The ledger is an append-only store of records addressed at write time.
//! There are no multi-record transactions, no deletes, and every create
//! costs one unit, which is all the chain writer may assume about it.
//!
//! `MemoryRegistry` is an in-process implementation for tests and ephemeral
//! use; `LedgerClient` (in `ledger`) talks to a real node.

use crate::error::RegistryError;
use crate::record::{Address, ContentRecord, FetchedRecord, RecordKind};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Append-only record store with per-write cost.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Persist one record and return its assigned address. One ledger unit
    /// per call; the write is not revocable.
    async fn create(&self, record: &ContentRecord) -> Result<Address, RegistryError>;

    /// Fetch one record by address. `Ok(None)` when nothing lives there.
    async fn get(&self, address: &str) -> Result<Option<ContentRecord>, RegistryError>;

    /// List records, optionally filtered by kind. Feed and profile surfaces
    /// only; never part of chain construction or traversal.
    async fn list(&self, kind: Option<RecordKind>) -> Result<Vec<FetchedRecord>, RegistryError>;
}

#[derive(Default)]
struct MemoryInner {
    records: HashMap<Address, ContentRecord>,
    order: Vec<Address>,
}

/// In-process registry.
///
/// Addresses are derived from a write sequence number plus the record bytes,
/// so every create yields a fresh opaque address the way a real ledger does.
#[derive(Default)]
pub struct MemoryRegistry {
    inner: RwLock<MemoryInner>,
    seq: AtomicU64,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records stored, chained or not.
    pub async fn count(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Insert a record at a chosen address, bypassing address assignment.
    ///
    /// Lets tests fabricate chain shapes (cycles, dangling references) that
    /// the writer's own discipline can never produce.
    #[cfg(test)]
    pub(crate) async fn insert_raw(&self, address: Address, record: ContentRecord) {
        let mut inner = self.inner.write().await;
        inner.order.push(address.clone());
        inner.records.insert(address, record);
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn create(&self, record: &ContentRecord) -> Result<Address, RegistryError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let bytes = serde_json::to_vec(record)?;

        let mut hasher = Sha256::new();
        hasher.update(seq.to_be_bytes());
        hasher.update(&bytes);
        let address = hex::encode(hasher.finalize());

        let mut inner = self.inner.write().await;
        inner.order.push(address.clone());
        inner.records.insert(address.clone(), record.clone());
        debug!(%address, kind = %record.kind, "stored record");

        Ok(address)
    }

    async fn get(&self, address: &str) -> Result<Option<ContentRecord>, RegistryError> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(address).cloned())
    }

    async fn list(&self, kind: Option<RecordKind>) -> Result<Vec<FetchedRecord>, RegistryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|address| {
                let record = inner.records.get(address)?;
                if let Some(want) = kind {
                    if record.kind != want {
                        return None;
                    }
                }
                Some(FetchedRecord {
                    address: address.clone(),
                    record: record.clone(),
                })
            })
            .collect())
    }
}
