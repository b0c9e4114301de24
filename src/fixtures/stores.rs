//! Store Fixtures

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    geo::Coordinates,
    stores::{Store, StoreId},
};

/// Wrapper for stores in YAML
#[derive(Debug, Deserialize)]
pub struct StoresFixture {
    /// Map of store key -> store fixture
    pub stores: BTreeMap<String, StoreFixture>,
}

/// Store Fixture
#[derive(Debug, Deserialize)]
pub struct StoreFixture {
    /// Store name
    pub name: String,

    /// Travel time from the shopper, in minutes
    #[serde(default)]
    pub travel_time_minutes: u32,

    /// Pre-computed distance, in kilometres
    #[serde(default)]
    pub distance_km: f64,

    /// Latitude
    pub lat: Option<f64>,

    /// Longitude
    pub lng: Option<f64>,

    /// Street address
    pub address: Option<String>,
}

impl StoreFixture {
    /// Build the store, keyed by its fixture key.
    pub fn into_store(self, key: &str) -> Store {
        let coordinates = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        };

        Store {
            id: StoreId::new(key),
            name: self.name,
            travel_time_minutes: self.travel_time_minutes,
            distance_km: self.distance_km,
            coordinates,
            address: self.address,
        }
    }
}
