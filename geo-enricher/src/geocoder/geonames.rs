//! GeoNames search client.

use async_trait::async_trait;
use geo_enricher_shared::GeocodedPoint;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::GeocodeResolver;
use crate::config::GeocoderConfig;
use crate::AppError;

/// Only the best candidate is ever used.
const MAX_ROWS: &str = "1";

/// Body of a `searchJSON` response.
///
/// GeoNames reports account and quota problems in-band with a `status` object
/// and a success HTTP status.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    geonames: Vec<Candidate>,
    status: Option<ProviderStatus>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    lat: Option<String>,
    lng: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderStatus {
    #[serde(default)]
    message: String,
    #[serde(default)]
    value: i64,
}

/// Production geocoder backed by the GeoNames `searchJSON` endpoint.
///
/// # Example
///
/// ```ignore
/// use geo_enricher::config::GeocoderConfig;
/// use geo_enricher::geocoder::{GeocodeResolver, GeonamesClient};
///
/// let client = GeonamesClient::new(&config)?;
/// let coord = client.resolve("Paris").await;
/// ```
pub struct GeonamesClient {
    search_url: Url,
    username: String,
    client: ReqwestClient,
}

impl GeonamesClient {
    /// Create a client for the configured provider.
    ///
    /// # Returns
    ///
    /// * `Ok(GeonamesClient)` - A new client
    /// * `Err(AppError::ConfigError)` - If the base URL and endpoint do not form a valid URL
    pub fn new(config: &GeocoderConfig) -> Result<Self, AppError> {
        let search_url = Self::search_url(&config.base_url, &config.endpoint)?;
        Ok(Self {
            search_url,
            username: config.username.clone(),
            client: ReqwestClient::new(),
        })
    }

    fn search_url(base_url: &str, endpoint: &str) -> Result<Url, AppError> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|e| AppError::config(format!("Invalid geocoder URL {}: {}", joined, e)))
    }

    /// Pick the first candidate's point out of a response body.
    fn first_coordinate(name: &str, response: SearchResponse) -> Option<GeocodedPoint> {
        if let Some(status) = response.status {
            warn!(
                name = %name,
                code = status.value,
                message = %status.message,
                "Geocoding provider returned an error status"
            );
            return None;
        }

        let candidate = response.geonames.into_iter().next()?;
        let coord = match (candidate.lat.as_deref(), candidate.lng.as_deref()) {
            (Some(lat), Some(lng)) => GeocodedPoint::parse(lat, lng),
            _ => None,
        };
        if coord.is_none() {
            warn!(name = %name, "Geocoding candidate has no usable coordinate");
        }
        coord
    }
}

#[async_trait]
impl GeocodeResolver for GeonamesClient {
    async fn resolve(&self, name: &str) -> Option<GeocodedPoint> {
        debug!(name = %name, "Geonames lookup");

        let response = match self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("q", name),
                ("maxRows", MAX_ROWS),
                ("username", self.username.as_str()),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(name = %name, error = %e, "Geocoding request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(name = %name, status = %status, "Geocoding request returned non-success status");
            return None;
        }

        let body = match response.json::<SearchResponse>().await {
            Ok(body) => body,
            Err(e) => {
                warn!(name = %name, error = %e, "Failed to parse geocoding response");
                return None;
            }
        };

        let coord = Self::first_coordinate(name, body);
        match &coord {
            Some(p) => debug!(name = %name, lat = %p.lat, lon = %p.lon, "Geonames match"),
            None => debug!(name = %name, "No geonames match"),
        }
        coord
    }
}
