//! Shopping List Fixtures

use serde::Deserialize;

use crate::geo::Coordinates;

/// A shopper's list and, optionally, where they are.
#[derive(Debug, Deserialize)]
pub struct ListFixture {
    /// Requested item names
    pub items: Vec<String>,

    /// Shopper location
    pub location: Option<Coordinates>,
}
