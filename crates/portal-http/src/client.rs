//! JSON-over-HTTP client for the catalog API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use portal_core::error::{Error, MalformedResponseError, ProtocolError, TransportError};

use crate::endpoints::ApiErrorResponse;

/// HTTP client for catalog requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("portal/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Setup {
                message: e.to_string(),
            })?;

        Ok(Self { client, timeout })
    }

    /// GET a URL with optional query parameters and decode the JSON body.
    #[instrument(skip(self, params))]
    pub async fn get_json<R>(&self, url: &str, params: &[(&str, &str)]) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        debug!("GET");
        trace!(?params, "query parameters");

        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Handle a response, decoding the body or the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
            serde_json::from_slice::<R>(&body).map_err(|e| {
                MalformedResponseError::new(std::any::type_name::<R>(), e.to_string()).into()
            })
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Protocol(error))
        }
    }

    /// Parse an API error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.error),
            Err(_) => ProtocolError::new(status, None),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ApiClient::new(Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(5));
    }
}
