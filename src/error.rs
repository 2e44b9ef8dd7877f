//! Error types for article-ledger

use thiserror::Error;

/// Errors from the registry client layer.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the publish pipeline.
///
/// Read-side failures (an unresolvable `next`, a malformed continuation
/// record) never appear here: the reader recovers from them locally by
/// truncating, since the root's own text is still worth showing.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("content too long: {chars} chars (max {max})")]
    ContentTooLarge { chars: usize, max: usize },

    #[error("{field} too long: {chars} chars (max {max})")]
    FieldTooLong {
        field: &'static str,
        chars: usize,
        max: usize,
    },

    #[error("article title is required")]
    TitleRequired,

    #[error("record write failed at step {step} ({written} of {total} records committed): {source}")]
    WriteFailed {
        /// Logical segment index of the failed write (0 = root).
        step: usize,
        /// Records already committed for this chain; they remain as orphans
        /// since the ledger offers no delete.
        written: usize,
        total: usize,
        #[source]
        source: RegistryError,
    },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}
