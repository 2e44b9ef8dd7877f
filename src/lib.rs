//! Article Ledger - long-form publishing over a bounded-record ledger
//!
//! The ledger stores append-only records capped at a fixed 1KB register
//! size, far smaller than a typical article. Articles are therefore stored
//! as forward-linked chains: a root record with metadata and the first text
//! segment, followed by continuation records each holding a segment and a
//! `next` address.
//!
//! ## Write path
//!
//! ```text
//! content ──► budget / splitter ──► chain writer ──► ledger
//!                                  (last segment first, root last,
//!                                   so every `next` is resolvable)
//! ```
//!
//! ## Read path
//!
//! ```text
//! ledger ──► classifier ──► chain reader ──► full text
//!            (roots only)   (follow `next` until empty)
//! ```
//!
//! Records are never mutated after creation; a chain exists exactly when its
//! root does. The cost of a publish (one ledger unit per record) is
//! computable up front from the content length alone.

pub mod budget;
pub mod config;
pub mod error;
pub mod ledger;
pub mod reader;
pub mod record;
pub mod registry;
pub mod splitter;
pub mod writer;

// Re-exports
pub use budget::{estimate_cost, record_count};
pub use config::Config;
pub use error::{ChainError, RegistryError};
pub use ledger::{LedgerClient, LedgerConfig};
pub use reader::ChainReader;
pub use record::{Address, ArticleMetadata, ContentRecord, FetchedRecord, RecordKind};
pub use registry::{MemoryRegistry, Registry};
pub use writer::{ChainWriter, PublishProgress, PublishReceipt};
