//! HTTP-backed catalog source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use portal_core::error::MalformedResponseError;
use portal_core::{ApiUrl, CatalogSource, PageCursor, PageResult, Result};

use crate::client::ApiClient;
use crate::endpoints::*;

/// Connection settings for [`HttpCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the API.
    pub api_url: ApiUrl,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CatalogConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A catalog source backed by the remote character API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    api: ApiUrl,
    client: ApiClient,
}

/// A resolved request: where to go and whether it is name-filtered.
struct PageRequest<'a> {
    url: String,
    name: Option<&'a str>,
    filtered: bool,
}

impl HttpCatalog {
    /// Create a new catalog for the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = ApiClient::new(config.timeout)?;
        Ok(Self {
            api: config.api_url,
            client,
        })
    }

    fn resolve<'a>(&self, query: Option<&'a str>, cursor: Option<&PageCursor>) -> PageRequest<'a> {
        if let Some(cursor) = cursor {
            return PageRequest {
                url: cursor.as_str().to_string(),
                name: None,
                filtered: cursor.name_filter().is_some(),
            };
        }

        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(name) => PageRequest {
                url: self.api.endpoint(CHARACTER_SEARCH),
                name: Some(name),
                filtered: true,
            },
            None => PageRequest {
                url: self.api.endpoint(CHARACTER_LIST),
                name: None,
                filtered: false,
            },
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    #[instrument(skip(self, cursor), fields(api = %self.api, cursor = cursor.map(|c| c.as_str())))]
    async fn fetch_page(
        &self,
        query: Option<&str>,
        cursor: Option<&PageCursor>,
    ) -> Result<PageResult> {
        let request = self.resolve(query, cursor);
        debug!(url = %request.url, name = request.name, "Fetching character page");

        let params: Vec<(&str, &str)> = request
            .name
            .map(|name| vec![(NAME_PARAM, name)])
            .unwrap_or_default();

        let envelope: PageEnvelope = match self.client.get_json(&request.url, &params).await {
            Ok(envelope) => envelope,
            Err(e) if request.filtered && e.is_not_found() => {
                info!("No characters match the name filter");
                return Ok(PageResult::empty());
            }
            Err(e) => {
                warn!(error = %e, url = %request.url, "Character page fetch failed");
                return Err(e);
            }
        };

        let next = envelope
            .info
            .next
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(PageCursor::new)
            .transpose()
            .map_err(|e| MalformedResponseError::new("info.next", e.to_string()))?;

        debug!(
            items = envelope.results.len(),
            has_next = next.is_some(),
            "Fetched character page"
        );

        Ok(PageResult {
            items: envelope.results,
            next,
            count: envelope.info.count,
            pages: envelope.info.pages,
        })
    }
}
