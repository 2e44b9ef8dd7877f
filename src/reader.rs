//! Chain reader: reassembles article text by walking forward references
//!
//! Reading is sequential by necessity: each hop's address is only known
//! after decoding the previous record's `next`. Records are fetched on
//! demand and never held as an in-memory reference graph; addresses are the
//! only identity.
//!
//! Reassembly is best-effort. A chain that breaks mid-walk (failed fetch,
//! missing record, or a `next` that leads somewhere other than a chunk)
//! truncates: the text gathered so far is returned, since the root's own
//! text is still meaningful on its own. The break is logged so a data
//! integrity problem can be told apart from a clean end of chain.

use crate::record::{Address, ContentRecord, RecordKind};
use crate::registry::Registry;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reassembles article chains from a registry.
pub struct ChainReader<R: Registry> {
    registry: Arc<R>,
}

impl<R: Registry> ChainReader<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Reassemble the full article text starting from an already-fetched
    /// root record.
    ///
    /// The writer's reverse-construction discipline makes cycles impossible
    /// for chains it wrote, but the ledger accepts records from any client,
    /// so a visited-address guard caps the walk anyway.
    pub async fn reassemble(&self, root: &ContentRecord) -> String {
        let mut text = root.text.clone();
        let mut next = root.next.clone();
        let mut visited: HashSet<Address> = HashSet::new();
        let mut hops = 0usize;

        while let Some(address) = next.take() {
            if !visited.insert(address.clone()) {
                warn!(%address, "cycle in article chain; stopping");
                break;
            }

            match self.registry.get(&address).await {
                Ok(Some(record)) => {
                    if record.kind != RecordKind::ArticleChunk {
                        warn!(%address, kind = %record.kind, "chain leads to a non-chunk record; stopping");
                        break;
                    }
                    text.push_str(&record.text);
                    next = record.next;
                    hops += 1;
                }
                Ok(None) => {
                    warn!(%address, "broken chain: record missing; returning partial text");
                    break;
                }
                Err(error) => {
                    warn!(%address, %error, "broken chain: fetch failed; returning partial text");
                    break;
                }
            }
        }

        debug!(chunks = hops, chars = text.chars().count(), "reassembled article");
        text
    }
}
