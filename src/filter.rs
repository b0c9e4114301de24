//! Store Filter

use tracing::debug;

use crate::{geo::Coordinates, stores::Store};

/// Default travel radius, in kilometres.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Stores the shopper can reach.
///
/// Without a shopper location every store is eligible, and a store with no known coordinates is
/// never excluded. Otherwise a store is kept when its pre-computed `distance_km` is within
/// `max_distance_km`.
pub fn eligible_stores<'a>(
    stores: &'a [Store],
    location: Option<Coordinates>,
    max_distance_km: f64,
) -> Vec<&'a Store> {
    if location.is_none() {
        return stores.iter().collect();
    }

    let eligible: Vec<&Store> = stores
        .iter()
        .filter(|store| store.coordinates.is_none() || store.distance_km <= max_distance_km)
        .collect();

    debug!(
        total = stores.len(),
        eligible = eligible.len(),
        max_distance_km,
        "filtered stores by distance"
    );

    eligible
}
