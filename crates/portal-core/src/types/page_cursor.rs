//! Page cursor type.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// An opaque pointer to the next page of a listing.
///
/// The API hands out absolute `next` URLs; a cursor is fetched verbatim and
/// already encodes any name filter that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageCursor(Url);

impl PageCursor {
    /// Create a cursor from a `next` URL returned by the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an absolute network URL.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::PageCursor {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        super::check_network_url(&url).map_err(|reason| InvalidInputError::PageCursor {
            value: s.to_string(),
            reason: reason.to_string(),
        })?;

        Ok(Self(url))
    }

    /// Returns the cursor URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the name filter encoded in the cursor, if any.
    pub fn name_filter(&self) -> Option<String> {
        self.0
            .query_pairs()
            .find(|(k, _)| k == "name")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    }

    /// Returns the page number encoded in the cursor, if any.
    pub fn page(&self) -> Option<u32> {
        self.0
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PageCursor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for PageCursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PageCursor::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_next_url() {
        let cursor = PageCursor::new("https://rickandmortyapi.com/api/character?page=2").unwrap();
        assert_eq!(cursor.page(), Some(2));
        assert_eq!(cursor.name_filter(), None);
    }

    #[test]
    fn extracts_name_filter() {
        let cursor =
            PageCursor::new("https://rickandmortyapi.com/api/character/?page=3&name=rick%20sanchez")
                .unwrap();
        assert_eq!(cursor.page(), Some(3));
        assert_eq!(cursor.name_filter().as_deref(), Some("rick sanchez"));
    }

    #[test]
    fn empty_name_is_no_filter() {
        let cursor = PageCursor::new("https://rickandmortyapi.com/api/character?name=&page=2").unwrap();
        assert_eq!(cursor.name_filter(), None);
    }

    #[test]
    fn rejects_relative_cursor() {
        assert!(PageCursor::new("/api/character?page=2").is_err());
    }

    #[test]
    fn rejects_plain_http_remote() {
        assert!(PageCursor::new("http://rickandmortyapi.com/api/character?page=2").is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let cursor = PageCursor::new("http://localhost:9000/character?page=2").unwrap();
        let json = serde_json::to_string(&cursor).unwrap();
        assert_eq!(json, "\"http://localhost:9000/character?page=2\"");
        let back: PageCursor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cursor);
    }
}
