// HTTP client for the Open Library search and works endpoints
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{normalize_work_id, Book, WorkDetails};
use crate::config::CatalogConfig;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Search query is empty")]
    EmptyQuery,
    #[error("Catalog request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Catalog responded with status {0}")]
    Status(u16),
    #[error("Failed to parse catalog response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl CatalogError {
    /// Connectivity problems and non-success responses alike.
    pub fn is_network_failure(&self) -> bool {
        !matches!(self, CatalogError::EmptyQuery)
    }
}

/// Read-only book catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Books matching `query`. No matches is an empty vector, not an error.
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError>;

    /// Detail record for a work id such as `/works/OL45883W`.
    async fn fetch_details(&self, work_id: &str) -> Result<WorkDetails, CatalogError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<Book>,
}

pub struct OpenLibraryClient {
    base_url: String,
    client: Client,
    search_limit: u32,
}

impl OpenLibraryClient {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_options(base_url, DEFAULT_SEARCH_LIMIT, Duration::from_secs(10))
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::with_options(
            &config.base_url,
            config.search_limit,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn with_options(base_url: &str, search_limit: u32, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::Network)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            search_limit,
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CatalogError> {
        let response = request.send().await.map_err(|e| {
            warn!("catalog request failed: {}", e);
            CatalogError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "catalog returned an error status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        response.json().await.map_err(CatalogError::Decode)
    }
}

#[async_trait]
impl Catalog for OpenLibraryClient {
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        debug!(query, "searching catalog");
        let limit = self.search_limit.to_string();
        let request = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[("q", query), ("limit", limit.as_str())]);

        let body: SearchResponse = self.get_json(request).await?;
        debug!(results = body.docs.len(), "search finished");
        Ok(body.docs)
    }

    async fn fetch_details(&self, work_id: &str) -> Result<WorkDetails, CatalogError> {
        let path = normalize_work_id(work_id);
        debug!(work_id = %path, "fetching work details");
        let request = self.client.get(format!("{}{}.json", self.base_url, path));
        self.get_json(request).await
    }
}
