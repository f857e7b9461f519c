//! Settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use geo_enricher_repository::SearchEngineConfig;
use geo_enricher_shared::LocationTypeSet;
use serde_json::Value;

use crate::AppError;

/// Default GeoNames API base URL.
const DEFAULT_GEONAMES_BASE_URL: &str = "http://api.geonames.org";

/// Default GeoNames search endpoint.
const DEFAULT_GEONAMES_ENDPOINT: &str = "searchJSON";

/// Geocoding provider settings.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Provider base URL.
    pub base_url: String,
    /// Search endpoint relative to the base URL.
    pub endpoint: String,
    /// Provider account name.
    pub username: String,
}

/// All settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub search: SearchEngineConfig,
    pub geocoder: GeocoderConfig,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_HOST`: Search engine host (default: localhost)
    /// - `OPENSEARCH_PORT`: Search engine port (default: 9200)
    /// - `OPENSEARCH_SCHEME`: URL scheme (default: http)
    /// - `OPENSEARCH_TIMEOUT_SECS`: Request timeout in seconds (default: 1000)
    /// - `SOURCE_INDEX`: Index to scan (default: kb-clean)
    /// - `DESTINATION_INDEX`: Index to create and write (default: kb-clean-g)
    /// - `DOCUMENT_TYPE`: Optional `_type` label for each write directive
    /// - `PAGE_SIZE`: Hits per scroll page (default: 1000)
    /// - `SCROLL_LIFETIME`: Scroll cursor keep-alive (default: 2m)
    /// - `LOCATION_TYPES`: Comma-separated eligible type labels
    /// - `FILTER_QUERY`: JSON search body overriding the default terms query
    /// - `DESTINATION_SHARDS` / `DESTINATION_REPLICAS`: Destination index settings (default: 3 / 0)
    /// - `GEONAMES_BASE_URL`: Provider base URL (default: http://api.geonames.org)
    /// - `GEONAMES_ENDPOINT`: Search endpoint (default: searchJSON)
    /// - `GEONAMES_USERNAME`: Provider account (required)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = SearchEngineConfig::default();

        let location_types = match get("LOCATION_TYPES") {
            Some(list) => {
                let set = LocationTypeSet::parse(&list);
                if set.is_empty() {
                    return Err(AppError::config("LOCATION_TYPES has no labels"));
                }
                set
            }
            None => defaults.location_types,
        };

        let filter_query = match get("FILTER_QUERY") {
            Some(raw) => {
                let query: Value = serde_json::from_str(&raw)
                    .map_err(|e| AppError::config(format!("Invalid FILTER_QUERY: {}", e)))?;
                if !query.is_object() {
                    return Err(AppError::config("FILTER_QUERY must be a JSON object"));
                }
                Some(query)
            }
            None => None,
        };

        let page_size: usize = parse_or(&get, "PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(AppError::config("PAGE_SIZE must be greater than zero"));
        }

        let search = SearchEngineConfig {
            host: get("OPENSEARCH_HOST").unwrap_or(defaults.host),
            port: parse_or(&get, "OPENSEARCH_PORT", defaults.port)?,
            scheme: get("OPENSEARCH_SCHEME").unwrap_or(defaults.scheme),
            timeout: Duration::from_secs(parse_or(
                &get,
                "OPENSEARCH_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            source_index: get("SOURCE_INDEX").unwrap_or(defaults.source_index),
            destination_index: get("DESTINATION_INDEX").unwrap_or(defaults.destination_index),
            document_type: get("DOCUMENT_TYPE"),
            page_size,
            scroll_lifetime: get("SCROLL_LIFETIME").unwrap_or(defaults.scroll_lifetime),
            location_types,
            filter_query,
            shards: parse_or(&get, "DESTINATION_SHARDS", defaults.shards)?,
            replicas: parse_or(&get, "DESTINATION_REPLICAS", defaults.replicas)?,
        };

        if search.source_index == search.destination_index {
            return Err(AppError::config(
                "SOURCE_INDEX and DESTINATION_INDEX must differ",
            ));
        }

        let geocoder = GeocoderConfig {
            base_url: get("GEONAMES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEONAMES_BASE_URL.to_string()),
            endpoint: get("GEONAMES_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEONAMES_ENDPOINT.to_string()),
            username: get("GEONAMES_USERNAME")
                .ok_or_else(|| AppError::config("GEONAMES_USERNAME is required"))?,
        };

        Ok(Self { search, geocoder })
    }
}

/// Parse `key` if set, otherwise use `default`.
fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[("GEONAMES_USERNAME", "demo")]).unwrap();

        assert_eq!(settings.search.url(), "http://localhost:9200");
        assert_eq!(settings.search.source_index, "kb-clean");
        assert_eq!(settings.search.destination_index, "kb-clean-g");
        assert_eq!(settings.search.page_size, 1000);
        assert_eq!(settings.search.scroll_lifetime, "2m");
        assert_eq!(settings.search.shards, 3);
        assert_eq!(settings.search.replicas, 0);
        assert!(settings.search.document_type.is_none());
        assert_eq!(settings.geocoder.base_url, "http://api.geonames.org");
        assert_eq!(settings.geocoder.endpoint, "searchJSON");
        assert_eq!(settings.geocoder.username, "demo");
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("GEONAMES_USERNAME", "demo"),
            ("OPENSEARCH_HOST", "search.internal"),
            ("OPENSEARCH_PORT", "9201"),
            ("OPENSEARCH_SCHEME", "https"),
            ("OPENSEARCH_TIMEOUT_SECS", "30"),
            ("PAGE_SIZE", "250"),
            ("DOCUMENT_TYPE", "kb-clean"),
            ("LOCATION_TYPES", "Location, Facility"),
        ])
        .unwrap();

        assert_eq!(settings.search.url(), "https://search.internal:9201");
        assert_eq!(settings.search.timeout, Duration::from_secs(30));
        assert_eq!(settings.search.page_size, 250);
        assert_eq!(settings.search.document_type.as_deref(), Some("kb-clean"));
        assert_eq!(
            settings.search.scroll_query(),
            json!({"query": {"terms": {"types": ["Facility", "Location"]}}})
        );
    }

    #[test]
    fn test_filter_query() {
        let settings = settings(&[
            ("GEONAMES_USERNAME", "demo"),
            ("FILTER_QUERY", r#"{"query": {"match_all": {}}}"#),
        ])
        .unwrap();
        assert_eq!(settings.search.scroll_query(), json!({"query": {"match_all": {}}}));

        let result = settings_err(&[("GEONAMES_USERNAME", "demo"), ("FILTER_QUERY", "{not json")]);
        assert!(result.contains("FILTER_QUERY"));
    }

    fn settings_err(vars: &[(&str, &str)]) -> String {
        match settings(vars) {
            Err(AppError::ConfigError(msg)) => msg,
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_username() {
        assert!(settings_err(&[]).contains("GEONAMES_USERNAME"));
        assert!(settings_err(&[("GEONAMES_USERNAME", "  ")]).contains("GEONAMES_USERNAME"));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(settings_err(&[("GEONAMES_USERNAME", "demo"), ("PAGE_SIZE", "many")]).contains("PAGE_SIZE"));
        assert!(settings_err(&[("GEONAMES_USERNAME", "demo"), ("PAGE_SIZE", "0")]).contains("PAGE_SIZE"));
        assert!(settings_err(&[("GEONAMES_USERNAME", "demo"), ("OPENSEARCH_PORT", "70000")])
            .contains("OPENSEARCH_PORT"));
    }

    #[test]
    fn test_same_source_and_destination() {
        let msg = settings_err(&[
            ("GEONAMES_USERNAME", "demo"),
            ("DESTINATION_INDEX", "kb-clean"),
        ]);
        assert!(msg.contains("must differ"));
    }
}
