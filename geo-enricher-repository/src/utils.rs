//! Response parsing helpers for the search backend.
//!
//! These work on plain JSON values so they can be shared by any backend that
//! speaks the Elasticsearch-compatible wire format.

use geo_enricher_shared::SourceDocument;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::{BulkItemFailure, BulkWriteSummary, ScrollPage};

/// Parse a search or scroll response into a page.
///
/// # Arguments
///
/// * `body` - The response body
///
/// # Returns
///
/// * `Ok(ScrollPage)` - The hits, the refreshed scroll id and the total hit count
/// * `Err(SearchIndexError::ParseError)` - If the scroll id is missing or a hit is malformed
///
/// # Example
///
/// ```
/// use geo_enricher_repository::parse_scroll_page;
/// use serde_json::json;
///
/// let page = parse_scroll_page(json!({
///     "_scroll_id": "c2Nyb2xs",
///     "hits": {"total": {"value": 1}, "hits": [{"_id": "1", "_source": {"name": "Paris"}}]}
/// })).expect("valid response");
///
/// assert_eq!(page.scroll_id, "c2Nyb2xs");
/// assert_eq!(page.len(), 1);
/// ```
pub fn parse_scroll_page(body: Value) -> Result<ScrollPage, SearchIndexError> {
    let scroll_id = body
        .get("_scroll_id")
        .and_then(Value::as_str)
        .ok_or_else(|| SearchIndexError::parse("Response is missing _scroll_id"))?
        .to_string();

    let total_hits = match body.pointer("/hits/total") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64),
        _ => None,
    };

    let hits = match body.pointer("/hits/hits") {
        Some(Value::Array(hits)) => hits
            .iter()
            .cloned()
            .map(serde_json::from_value::<SourceDocument>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SearchIndexError::parse(format!("Malformed hit: {}", e)))?,
        Some(_) => return Err(SearchIndexError::parse("hits.hits is not an array")),
        None => Vec::new(),
    };

    Ok(ScrollPage {
        scroll_id,
        hits,
        total_hits,
    })
}

/// Summarize a bulk response, collecting rejected items.
///
/// # Arguments
///
/// * `body` - The bulk response body
/// * `total` - Number of documents that were sent
pub fn summarize_bulk_response(body: &Value, total: usize) -> BulkWriteSummary {
    let items = match body.get("items").and_then(Value::as_array) {
        Some(items) => items,
        None => {
            // No item breakdown: trust the top-level flag.
            if body.get("errors").and_then(Value::as_bool) == Some(true) {
                return BulkWriteSummary {
                    total,
                    succeeded: 0,
                    failed: total,
                    failures: Vec::new(),
                };
            }
            return BulkWriteSummary::all_succeeded(total);
        }
    };

    let mut failures = Vec::new();
    for (position, item) in items.iter().enumerate() {
        // Each item is keyed by its action name, e.g. {"index": {...}}.
        let Some(result) = item.as_object().and_then(|action| action.values().next()) else {
            continue;
        };

        let status = result
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
            .unwrap_or(0);

        if let Some(error) = result.get("error") {
            let reason = error
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            failures.push(BulkItemFailure {
                position,
                status,
                reason,
            });
        } else if status >= 300 {
            failures.push(BulkItemFailure {
                position,
                status,
                reason: format!("Item rejected with status {}", status),
            });
        }
    }

    let failed = failures.len().min(total);
    BulkWriteSummary {
        total,
        succeeded: total - failed,
        failed,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_scroll_page() {
        let body = json!({
            "_scroll_id": "abc",
            "hits": {
                "total": {"value": 42, "relation": "eq"},
                "hits": [
                    {"_index": "kb-clean", "_id": "1", "_source": {"name": "Paris", "types": ["Location"]}},
                    {"_index": "kb-clean", "_id": "2", "_source": {"name": "Widget", "types": ["Product"]}}
                ]
            }
        });

        let page = parse_scroll_page(body).unwrap();

        assert_eq!(page.scroll_id, "abc");
        assert_eq!(page.total_hits, Some(42));
        assert_eq!(page.len(), 2);
        assert_eq!(page.hits[0].id.as_deref(), Some("1"));
        assert_eq!(page.hits[1].name(), Some("Widget"));
    }

    #[test]
    fn test_parse_scroll_page_legacy_total() {
        let body = json!({"_scroll_id": "abc", "hits": {"total": 7, "hits": []}});

        let page = parse_scroll_page(body).unwrap();

        assert_eq!(page.total_hits, Some(7));
        assert!(page.is_empty());
    }

    #[test]
    fn test_parse_scroll_page_missing_scroll_id() {
        let result = parse_scroll_page(json!({"hits": {"hits": []}}));
        assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
    }

    #[test]
    fn test_parse_scroll_page_malformed_hits() {
        let result = parse_scroll_page(json!({"_scroll_id": "abc", "hits": {"hits": {}}}));
        assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
    }

    #[test]
    fn test_summarize_bulk_all_succeeded() {
        let body = json!({
            "took": 3,
            "errors": false,
            "items": [
                {"index": {"_index": "dest", "status": 201}},
                {"index": {"_index": "dest", "status": 201}}
            ]
        });

        let summary = summarize_bulk_response(&body, 2);

        assert_eq!(summary, BulkWriteSummary::all_succeeded(2));
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_summarize_bulk_partial_failure() {
        let body = json!({
            "errors": true,
            "items": [
                {"index": {"status": 201}},
                {"index": {"status": 400, "error": {"type": "mapper_parsing_exception", "reason": "failed to parse field [geolocation.lat]"}}},
                {"index": {"status": 201}}
            ]
        });

        let summary = summarize_bulk_response(&body, 3);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].position, 1);
        assert_eq!(summary.failures[0].status, 400);
        assert_eq!(
            summary.failures[0].reason,
            "failed to parse field [geolocation.lat]"
        );
    }

    #[test]
    fn test_summarize_bulk_without_items() {
        assert_eq!(
            summarize_bulk_response(&json!({"errors": false}), 4),
            BulkWriteSummary::all_succeeded(4)
        );

        let summary = summarize_bulk_response(&json!({"errors": true}), 4);
        assert_eq!(summary.failed, 4);
        assert_eq!(summary.succeeded, 0);
    }
}
