//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SourceIndex` and
//! `IndexWriter` using the OpenSearch Rust crate.

use std::time::Duration;

use async_trait::async_trait;
use geo_enricher_shared::BulkPayload;
use opensearch::{
    http::{
        request::JsonBody,
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, ClearScrollParts, OpenSearch, ScrollParts, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::{IndexWriter, SourceIndex};
use crate::types::{BulkWriteSummary, ScrollPage, ScrollRequest};
use crate::utils;

/// OpenSearch provider implementation.
///
/// One provider serves both the read side (scrolling the source index) and
/// the write side (creating and bulk-loading the destination index).
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use geo_enricher_repository::{OpenSearchProvider, ScrollRequest, SourceIndex};
///
/// let provider = OpenSearchProvider::new("http://localhost:9200", Duration::from_secs(30))?;
/// provider.check_connection().await?;
///
/// let page = provider
///     .open_scroll(&ScrollRequest {
///         index: "kb-clean".to_string(),
///         page_size: 1000,
///         scroll_lifetime: "2m".to_string(),
///         query: serde_json::json!({"query": {"match_all": {}}}),
///     })
///     .await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider for the specified URL.
    ///
    /// No request is sent; use [`OpenSearchProvider::check_connection`] to
    /// verify the engine is reachable.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `timeout` - Timeout applied to every request
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, timeout_secs = timeout.as_secs(), "Created OpenSearch provider");

        Ok(Self { client })
    }

    /// Ping the engine.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the engine answered with a success status
    /// * `Err(SearchIndexError::ConnectionError)` - Otherwise
    pub async fn check_connection(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchIndexError::connection(format!(
                "Ping failed with status {}",
                status
            )));
        }

        debug!("OpenSearch ping succeeded");
        Ok(())
    }

    /// Read the response body as JSON, turning a non-success status into an
    /// error built by `to_error`.
    async fn json_body(
        response: Response,
        operation: &str,
        to_error: fn(String) -> SearchIndexError,
    ) -> Result<Value, SearchIndexError> {
        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "{} request failed", operation);
            return Err(to_error(format!(
                "{} failed with status {}: {}",
                operation, status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))
    }
}

#[async_trait]
impl SourceIndex for OpenSearchProvider {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchIndexError::connection(format!(
                "Unexpected status {} checking index {}",
                status, index
            ))),
        }
    }

    async fn open_scroll(&self, request: &ScrollRequest) -> Result<ScrollPage, SearchIndexError> {
        let size = i64::try_from(request.page_size)
            .map_err(|_| SearchIndexError::search("Page size out of range"))?;

        let response = self
            .client
            .search(SearchParts::Index(&[request.index.as_str()]))
            .scroll(&request.scroll_lifetime)
            .size(size)
            .body(request.query.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::search(e.to_string()))?;

        if response.status_code().as_u16() == 404 {
            return Err(SearchIndexError::index_not_found(&request.index));
        }

        let body = Self::json_body(response, "Search", SearchIndexError::SearchError).await?;
        let page = utils::parse_scroll_page(body)?;

        debug!(
            index = %request.index,
            hits = page.len(),
            total_hits = ?page.total_hits,
            "Scroll opened"
        );
        Ok(page)
    }

    async fn next_page(
        &self,
        scroll_id: &str,
        scroll_lifetime: &str,
    ) -> Result<ScrollPage, SearchIndexError> {
        let response = self
            .client
            .scroll(ScrollParts::None)
            .body(json!({
                "scroll": scroll_lifetime,
                "scroll_id": scroll_id
            }))
            .send()
            .await
            .map_err(|e| SearchIndexError::scroll(e.to_string()))?;

        let body = Self::json_body(response, "Scroll", SearchIndexError::ScrollError).await?;
        let page = utils::parse_scroll_page(body)?;

        debug!(hits = page.len(), "Scroll page fetched");
        Ok(page)
    }

    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .clear_scroll(ClearScrollParts::None)
            .body(json!({ "scroll_id": [scroll_id] }))
            .send()
            .await
            .map_err(|e| SearchIndexError::scroll(e.to_string()))?;

        // 404 is acceptable - the cursor may already have expired
        let status = response.status_code();
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchIndexError::scroll(format!(
                "Clear scroll failed with status {}: {}",
                status, error_body
            )));
        }

        debug!("Scroll cleared");
        Ok(())
    }
}

#[async_trait]
impl IndexWriter for OpenSearchProvider {
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError> {
        if self.index_exists(index).await? {
            return Err(SearchIndexError::index_already_exists(index));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create index request failed");
            // Lost a race with another creator.
            if error_body.contains("resource_already_exists_exception") {
                return Err(SearchIndexError::index_already_exists(index));
            }
            return Err(SearchIndexError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Index created");
        Ok(())
    }

    async fn bulk_write(
        &self,
        index: &str,
        payload: &BulkPayload,
    ) -> Result<BulkWriteSummary, SearchIndexError> {
        if payload.is_empty() {
            return Ok(BulkWriteSummary::default());
        }

        let lines: Vec<JsonBody<Value>> = payload.to_lines().into_iter().map(JsonBody::new).collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(lines)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let body = Self::json_body(response, "Bulk", SearchIndexError::BulkIndexError).await?;
        let summary = utils::summarize_bulk_response(&body, payload.len());

        for failure in &summary.failures {
            warn!(
                index = %index,
                position = failure.position,
                status = failure.status,
                reason = %failure.reason,
                "Bulk item rejected"
            );
        }

        debug!(
            index = %index,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk write completed"
        );
        Ok(summary)
    }
}
