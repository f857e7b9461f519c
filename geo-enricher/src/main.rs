//! Geo Enricher Main Entry Point
//!
//! This is the main binary for the knowledge base geo enricher.
//! It scans the source index, geocodes place documents and writes enriched
//! copies into a freshly created destination index.

use dotenv::dotenv;
use geo_enricher::{AppError, Dependencies};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("geo_enricher=info,geo_enricher_repository=info"));

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "geo-enricher",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "geo-enricher",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting Geo Enricher");

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.scanner.run().await {
        Ok(totals) => {
            info!(
                enriched = totals.enriched,
                documents_written = totals.documents_written,
                bulk_item_failures = totals.bulk_item_failures,
                "Geo enricher completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Geo enricher failed");
            Err(e.into())
        }
    }
}
