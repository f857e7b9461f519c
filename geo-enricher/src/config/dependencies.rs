//! Dependency initialization and wiring for the geo enricher.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::errors::EnrichError;
use crate::geocoder::{GeocodeResolver, GeonamesClient};
use crate::loader::BulkLoader;
use crate::processor::{BatchProcessor, DocumentEnricher};
use crate::scanner::IndexScanner;
use crate::AppError;
use geo_enricher_repository::opensearch::IndexConfig;
use geo_enricher_repository::{IndexWriter, OpenSearchProvider, ScrollRequest, SourceIndex};
use geo_enricher_shared::WriteDirective;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured scanner ready to run.
    pub scanner: IndexScanner,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`Settings::from_env`] for the recognized variables. Every setup
    /// failure is fatal; nothing is retried.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If configuration is invalid, the engine is unreachable
    ///   or the destination index already exists
    pub async fn new() -> Result<Self, AppError> {
        let settings = Settings::from_env()?;
        Self::from_settings(&settings).await
    }

    /// Connect to the search engine and wire the pipeline for `settings`.
    pub async fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let url = settings.search.url();

        info!(
            opensearch_url = %url,
            source_index = %settings.search.source_index,
            destination_index = %settings.search.destination_index,
            page_size = settings.search.page_size,
            scroll_lifetime = %settings.search.scroll_lifetime,
            geonames_url = %settings.geocoder.base_url,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(&url, settings.search.timeout).map_err(|e| {
            EnrichError::setup(format!("Failed to create OpenSearch provider: {}", e))
        })?;
        provider
            .check_connection()
            .await
            .map_err(|e| EnrichError::setup(format!("Failed to connect to OpenSearch: {}", e)))?;

        info!("OpenSearch connection established");

        let provider = Arc::new(provider);
        let geocoder = Arc::new(GeonamesClient::new(&settings.geocoder)?);

        Self::assemble(settings, provider.clone(), provider, geocoder)
            .await
            .map_err(AppError::from)
    }

    /// Create the destination index and wire the pipeline from the given
    /// components.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - The wired pipeline
    /// * `Err(EnrichError::SetupError)` - If the destination index exists or
    ///   cannot be created
    pub async fn assemble(
        settings: &Settings,
        source: Arc<dyn SourceIndex>,
        writer: Arc<dyn IndexWriter>,
        geocoder: Arc<dyn GeocodeResolver>,
    ) -> Result<Self, EnrichError> {
        let search = &settings.search;

        let index_config = IndexConfig::new(&search.destination_index, search.shards, search.replicas);
        writer
            .create_index(&index_config.name, &index_config.index_body())
            .await
            .map_err(|e| {
                EnrichError::setup(format!(
                    "Failed to create destination index {}: {}",
                    index_config.name, e
                ))
            })?;

        let directive = WriteDirective::new(&search.destination_index, search.document_type.clone());
        let enricher = DocumentEnricher::new(geocoder, search.location_types.clone(), directive);
        let processor = BatchProcessor::new(enricher);
        let loader = BulkLoader::new(writer, &search.destination_index);

        let request = ScrollRequest {
            index: search.source_index.clone(),
            page_size: search.page_size,
            scroll_lifetime: search.scroll_lifetime.clone(),
            query: search.scroll_query(),
        };
        let scanner = IndexScanner::new(source, processor, loader, request);

        Ok(Self { scanner })
    }
}
