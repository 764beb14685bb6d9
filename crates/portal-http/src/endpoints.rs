//! Catalog endpoint definitions and response envelopes.

use serde::Deserialize;

use portal_core::Character;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Unfiltered character listing.
pub const CHARACTER_LIST: &str = "character";

/// Name-filtered character search.
pub const CHARACTER_SEARCH: &str = "character/";

/// Query parameter carrying the name filter.
pub const NAME_PARAM: &str = "name";

// ============================================================================
// Response Types
// ============================================================================

/// Listing envelope shared by every character endpoint.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    pub info: PageInfo,
    #[serde(default)]
    pub results: Vec<Character>,
}

/// Pagination block of the envelope.
#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Error body, e.g. `{"error": "There is nothing here"}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_with_null_next() {
        let envelope: PageEnvelope = serde_json::from_value(json!({
            "info": { "count": 0, "pages": 0, "next": null, "prev": null },
            "results": []
        }))
        .unwrap();
        assert!(envelope.info.next.is_none());
        assert!(envelope.results.is_empty());
    }

    #[test]
    fn envelope_ignores_unknown_info_fields() {
        let envelope: PageEnvelope = serde_json::from_value(json!({
            "info": { "count": 1, "pages": 1, "next": null, "prev": null, "seed": 42 },
            "results": []
        }))
        .unwrap();
        assert_eq!(envelope.info.count, Some(1));
    }
}
