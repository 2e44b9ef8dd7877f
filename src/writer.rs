//! Chain writer: persists article segments as linked ledger records
//!
//! Each record's `next` must hold an address that only exists once its
//! target is written, and the ledger assigns addresses at write time. So the
//! writer works backward: last segment first with an empty `next`, then each
//! preceding segment pointing at the address just returned, and the root
//! last. No forward reference is ever written "to be filled in later", and a
//! failed attempt leaves no root, so readers can never observe a
//! half-written chain.
//!
//! Writes are strictly sequential: every create must return its address
//! before the preceding record can be built.

use crate::budget::{ARTICLE_MAX_CHARS, POST_TEXT_MAX};
use crate::error::ChainError;
use crate::record::{Address, ArticleMetadata, ContentRecord};
use crate::registry::Registry;
use crate::splitter::split_article_text;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Progress update emitted after each successful record write.
///
/// Counts run in write order (the reverse of reading order) and reach
/// `total_records` with the root write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishProgress {
    pub records_written: usize,
    pub total_records: usize,
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    /// Address of the chain's root record; the article's public identity.
    pub root_address: Address,
    /// Records written, which is also the cost in ledger units.
    pub records: usize,
}

/// Writes article chains and standalone posts to a registry.
pub struct ChainWriter<R: Registry> {
    registry: Arc<R>,
    progress_tx: broadcast::Sender<PublishProgress>,
}

impl<R: Registry> ChainWriter<R> {
    pub fn new(registry: Arc<R>) -> Self {
        let (progress_tx, _) = broadcast::channel(64);
        Self {
            registry,
            progress_tx,
        }
    }

    /// Subscribe to per-record progress updates.
    pub fn subscribe_progress(&self) -> broadcast::Receiver<PublishProgress> {
        self.progress_tx.subscribe()
    }

    /// Publish an article as a chain of records, returning the root address.
    ///
    /// Rejects oversized content and invalid metadata before any write. If a
    /// create fails partway, the records already committed stay behind as
    /// unreachable orphans (the ledger has no delete) and the error names
    /// the failed step; no root exists for the attempt, so the chain simply
    /// does not exist from a reader's point of view.
    pub async fn publish(
        &self,
        meta: ArticleMetadata,
        content: &str,
    ) -> Result<PublishReceipt, ChainError> {
        let chars = content.chars().count();
        if chars > ARTICLE_MAX_CHARS {
            return Err(ChainError::ContentTooLarge {
                chars,
                max: ARTICLE_MAX_CHARS,
            });
        }
        meta.validate()?;

        let segments = split_article_text(content);
        let total = segments.len();
        debug!(records = total, chars, "publishing article chain");

        // Walk the continuation segments backward, threading each returned
        // address into the preceding record's `next`.
        let mut next: Option<Address> = None;
        let mut written = 0usize;
        for (step, segment) in segments.iter().enumerate().skip(1).rev() {
            let record = ContentRecord::chunk(segment.clone(), next.take());
            let address =
                self.registry
                    .create(&record)
                    .await
                    .map_err(|source| ChainError::WriteFailed {
                        step,
                        written,
                        total,
                        source,
                    })?;
            written += 1;
            self.report(written, total);
            next = Some(address);
        }

        // Root last: the chain becomes observable only on this final write.
        let root = ContentRecord::root(meta, segments[0].clone(), next);
        let root_address =
            self.registry
                .create(&root)
                .await
                .map_err(|source| ChainError::WriteFailed {
                    step: 0,
                    written,
                    total,
                    source,
                })?;
        written += 1;
        self.report(written, total);

        info!(address = %root_address, records = total, "published article chain");
        Ok(PublishReceipt {
            root_address,
            records: total,
        })
    }

    /// Publish a standalone short post as a single unchained record.
    pub async fn create_post(&self, text: &str) -> Result<Address, ChainError> {
        let chars = text.chars().count();
        if chars > POST_TEXT_MAX {
            return Err(ChainError::ContentTooLarge {
                chars,
                max: POST_TEXT_MAX,
            });
        }

        let address = self.registry.create(&ContentRecord::post(text.into())).await?;
        info!(%address, "published post");
        Ok(address)
    }

    fn report(&self, written: usize, total: usize) {
        debug!(written, total, "record committed");
        let _ = self.progress_tx.send(PublishProgress {
            records_written: written,
            total_records: total,
        });
    }
}
