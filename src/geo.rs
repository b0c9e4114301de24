//! Geo
//!
//! Great-circle distances for locating stores relative to a shopper. The engine itself never calls
//! into this module; callers use it to pre-compute [`Store::distance_km`](crate::stores::Store)
//! before handing stores over.

use serde::{Deserialize, Serialize};

use crate::stores::Store;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// WGS-84 latitude / longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance between two points, in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Fill in `distance_km` for every store with known coordinates.
///
/// Stores without coordinates keep whatever distance they were given.
pub fn locate_stores(stores: &[Store], shopper: Coordinates) -> Vec<Store> {
    stores
        .iter()
        .map(|store| match store.coordinates {
            Some(coordinates) => store
                .clone()
                .with_distance_km(haversine_km(shopper, coordinates)),
            None => store.clone(),
        })
        .collect()
}
