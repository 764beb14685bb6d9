//! Character records as served by the catalog API.
//!
//! Records are read-only: they are only ever deserialized from responses and
//! handed around by value. Fields the client does not know about are kept in
//! [`Character::extra`] so a record can be re-emitted unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable identifier of a character, used as the dedup key for listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Life status of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Alive,
    Dead,
    Unknown,
}

impl Status {
    /// Returns the wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "unknown" is lower-case on the wire; display it capitalized.
        match self {
            Status::Unknown => f.write_str("Unknown"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "Alive" | "alive" => Status::Alive,
            "Dead" | "dead" => Status::Dead,
            _ => Status::Unknown,
        })
    }
}

/// A named reference to an origin or location resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    /// Link to the location resource; empty when the API has none.
    #[serde(default)]
    pub url: String,
}

/// A character record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub status: Status,
    pub species: String,

    /// Sub-species or variant; the API sends an empty string when absent.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_as_none",
        serialize_with = "none_as_empty"
    )]
    pub subtype: Option<String>,

    pub gender: String,
    pub origin: LocationRef,
    pub location: LocationRef,
    pub image: String,

    /// Episode links, in broadcast order.
    #[serde(default)]
    pub episode: Vec<String>,

    /// Link to this record.
    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Fields not modelled above, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Character {
    /// Number of episodes the character appears in.
    pub fn episode_count(&self) -> usize {
        self.episode.len()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn none_as_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}
