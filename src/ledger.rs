//! HTTP client for a ledger node's record API
//!
//! Implements [`Registry`] over the node's JSON API: one POST per record
//! create (returning the assigned address), GET by address, and a filtered
//! listing endpoint. Per-call timeouts and retry policy live here in the
//! client, not in the chain logic.

use crate::error::RegistryError;
use crate::record::{Address, ContentRecord, FetchedRecord, RecordKind};
use crate::registry::Registry;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for a ledger node.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Base URL of the node API, e.g. `http://localhost:8336`.
    pub base_url: String,
    /// Bearer token for authenticated sessions.
    pub api_key: Option<String>,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8336".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// HTTP implementation of [`Registry`].
pub struct LedgerClient {
    config: LedgerConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct CreateRecordResponse {
    address: Address,
}

#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    records: Vec<FetchedRecord>,
}

impl LedgerClient {
    pub fn new(config: LedgerConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .expect("Invalid API key"),
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RegistryError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound("Resource not found".to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Server { status, message });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Registry for LedgerClient {
    async fn create(&self, record: &ContentRecord) -> Result<Address, RegistryError> {
        let url = format!("{}/v1/records", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(record)
            .send()
            .await?;

        let created: CreateRecordResponse = self.handle_response(response).await?;
        Ok(created.address)
    }

    async fn get(&self, address: &str) -> Result<Option<ContentRecord>, RegistryError> {
        let url = format!(
            "{}/v1/records/{}",
            self.config.base_url,
            urlencoding::encode(address)
        );

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Server { status, message });
        }

        Ok(Some(response.json().await?))
    }

    async fn list(&self, kind: Option<RecordKind>) -> Result<Vec<FetchedRecord>, RegistryError> {
        let mut url = format!("{}/v1/records", self.config.base_url);
        if let Some(kind) = kind {
            url.push_str("?kind=");
            url.push_str(kind.as_tag());
        }

        let response = self.client.get(&url).send().await?;
        let listed: ListRecordsResponse = self.handle_response(response).await?;
        Ok(listed.records)
    }
}
