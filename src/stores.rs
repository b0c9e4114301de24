//! Stores

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Store identifier.
///
/// Catalogs hand out both numeric and textual ids; both are normalised to text when
/// deserialised so the engine only ever compares one representation.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawStoreId", into = "String")]
pub struct StoreId(String);

impl StoreId {
    /// Create a store id from any textual key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the normalised id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StoreId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for StoreId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<StoreId> for String {
    fn from(id: StoreId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStoreId {
    Number(u64),
    Text(String),
}

impl From<RawStoreId> for StoreId {
    fn from(raw: RawStoreId) -> Self {
        match raw {
            RawStoreId::Number(id) => id.into(),
            RawStoreId::Text(id) => id.into(),
        }
    }
}

/// A store the shopper could visit, with travel metrics relative to the shopper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Store id
    pub id: StoreId,

    /// Display name
    pub name: String,

    /// Travel time from the shopper, in minutes
    #[serde(default)]
    pub travel_time_minutes: u32,

    /// Distance from the shopper, in kilometres
    #[serde(default)]
    pub distance_km: f64,

    /// Store location, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Street address, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Store {
    /// Create a store with no travel metrics or location.
    pub fn new(id: impl Into<StoreId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            travel_time_minutes: 0,
            distance_km: 0.0,
            coordinates: None,
            address: None,
        }
    }

    /// Set the travel time in minutes.
    #[must_use]
    pub fn with_travel_time(mut self, minutes: u32) -> Self {
        self.travel_time_minutes = minutes;
        self
    }

    /// Set the distance in kilometres.
    #[must_use]
    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    /// Set the store location.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Copy of this store with travel time and distance reset to zero.
    #[must_use]
    pub fn without_travel(&self) -> Self {
        Self {
            travel_time_minutes: 0,
            distance_km: 0.0,
            ..self.clone()
        }
    }
}
