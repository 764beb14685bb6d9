//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated catalog API base URL.
///
/// Network URLs must use HTTPS (or HTTP for localhost). A trailing slash is
/// dropped so endpoint paths join cleanly.
///
/// # Example
///
/// ```
/// use portal_core::ApiUrl;
///
/// let api = ApiUrl::new("https://rickandmortyapi.com/api/").unwrap();
/// assert_eq!(api.endpoint("character"), "https://rickandmortyapi.com/api/character");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// The public Rick and Morty API.
    pub const DEFAULT: &'static str = "https://rickandmortyapi.com/api";

    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not a network URL.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        super::check_network_url(&url).map_err(|reason| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: reason.to_string(),
        })?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiUrl {
                value: s.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        let mut normalized = url;
        let trimmed = normalized.path().trim_end_matches('/').to_string();
        normalized.set_path(&trimmed);

        Ok(Self(normalized))
    }

    /// Returns the absolute URL of an endpoint below the base.
    pub fn endpoint(&self, path: &str) -> String {
        // Url keeps a bare "/" path for roots, so trim before joining.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://rickandmortyapi.com/api").unwrap();
        assert_eq!(api.as_str(), "https://rickandmortyapi.com/api");
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(api.endpoint("character"), "http://127.0.0.1:8080/character");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let api = ApiUrl::new("https://rickandmortyapi.com/api/").unwrap();
        assert_eq!(
            api.endpoint("character"),
            "https://rickandmortyapi.com/api/character"
        );
        assert_eq!(
            api.endpoint("/character/"),
            "https://rickandmortyapi.com/api/character/"
        );
    }

    #[test]
    fn default_points_at_public_api() {
        let api = ApiUrl::new(ApiUrl::DEFAULT).unwrap();
        assert_eq!(
            api.endpoint("character"),
            "https://rickandmortyapi.com/api/character"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://rickandmortyapi.com/api").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/character").is_err());
    }

    #[test]
    fn rejects_query_string() {
        assert!(ApiUrl::new("https://rickandmortyapi.com/api?page=2").is_err());
    }
}
