//! Ledger record types and content classification
//!
//! A `ContentRecord` is the unit stored in the ledger. Long-form articles are
//! chains of records: a root carrying metadata plus the first text segment,
//! followed by lean continuation records linked through `next`. Standalone
//! posts are single unchained records.
//!
//! `kind`, `text` and `next` are immutable once written; the ledger assigns
//! each record an opaque address at write time. Only `status` is mutable on
//! the ledger side (moderation), and nothing here depends on it.

use crate::budget::{
    ABSTRACT_MAX, CONTENT_WARNING_MAX, TAGS_MAX, TIP_ACCOUNT_MAX, TITLE_MAX,
};
use crate::error::ChainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque registry-assigned record address.
pub type Address = String;

/// Record kind tag.
///
/// Serialized as the string tag the ledger's `list` predicate filters on, so
/// feed queries and this classifier share one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// Chain root: article metadata plus the first text segment.
    Article,
    /// Continuation record: a text segment and a forward reference.
    ArticleChunk,
    /// Standalone short-form record, no chain.
    Post,
}

impl RecordKind {
    pub fn as_tag(&self) -> &'static str {
        match self {
            RecordKind::Article => "article",
            RecordKind::ArticleChunk => "article-chunk",
            RecordKind::Post => "post",
        }
    }

    /// Chunks are an implementation detail of chained storage and must never
    /// surface in user-facing listings.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, RecordKind::ArticleChunk)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(RecordKind::Article),
            "article-chunk" => Ok(RecordKind::ArticleChunk),
            "post" => Ok(RecordKind::Post),
            other => Err(format!("unknown record kind: {other}")),
        }
    }
}

/// Article metadata carried by the root record.
///
/// These fields share the root register with its text segment, which is why
/// the root text budget is smaller than the chunk budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleMetadata {
    pub title: String,

    #[serde(rename = "abstract", default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_warning: String,

    /// Address of the article being replied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Address>,

    /// Address of the article being cited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Address>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tags: String,

    #[serde(default = "default_lang")]
    pub lang: String,

    /// Ledger account that receives tips for this article. Transfers
    /// themselves are handled elsewhere; this core only stores the address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_account: Option<String>,
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for ArticleMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            content_warning: String::new(),
            reply_to: None,
            quote: None,
            tags: String::new(),
            lang: default_lang(),
            tip_account: None,
        }
    }
}

impl ArticleMetadata {
    /// Check the per-field caps before anything is written.
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.title.trim().is_empty() {
            return Err(ChainError::TitleRequired);
        }
        check_cap("title", &self.title, TITLE_MAX)?;
        check_cap("abstract", &self.summary, ABSTRACT_MAX)?;
        check_cap("content warning", &self.content_warning, CONTENT_WARNING_MAX)?;
        check_cap("tags", &self.tags, TAGS_MAX)?;
        if let Some(account) = &self.tip_account {
            check_cap("tip account", account, TIP_ACCOUNT_MAX)?;
        }
        Ok(())
    }
}

fn check_cap(field: &'static str, value: &str, max: usize) -> Result<(), ChainError> {
    let chars = value.chars().count();
    if chars > max {
        return Err(ChainError::FieldTooLong { field, chars, max });
    }
    Ok(())
}

fn default_status() -> String {
    "official".to_string()
}

/// The unit stored in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub kind: RecordKind,

    /// Moderation status; the only ledger-mutable field.
    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default)]
    pub text: String,

    /// Forward reference to the next record in the chain; `None` ends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Address>,

    /// Root records only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ArticleMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ContentRecord {
    /// Article root: metadata plus the first text segment.
    pub fn root(meta: ArticleMetadata, text: String, next: Option<Address>) -> Self {
        Self {
            kind: RecordKind::Article,
            status: default_status(),
            text,
            next,
            meta: Some(meta),
            created_at: Some(Utc::now()),
        }
    }

    /// Continuation record.
    pub fn chunk(text: String, next: Option<Address>) -> Self {
        Self {
            kind: RecordKind::ArticleChunk,
            status: default_status(),
            text,
            next,
            meta: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Standalone post.
    pub fn post(text: String) -> Self {
        Self {
            kind: RecordKind::Post,
            status: default_status(),
            text,
            next: None,
            meta: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Is this record an article root? Roots are the only records worth
    /// handing to the chain reader.
    pub fn is_article(&self) -> bool {
        self.kind == RecordKind::Article
    }

    /// Is this record a continuation of some chain?
    pub fn is_chunk(&self) -> bool {
        self.kind == RecordKind::ArticleChunk
    }
}

/// A record together with its ledger address, as returned by fetch/list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedRecord {
    pub address: Address,
    #[serde(flatten)]
    pub record: ContentRecord,
}
