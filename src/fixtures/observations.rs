//! Observation Fixtures

use serde::Deserialize;

/// Wrapper for observations in YAML
#[derive(Debug, Deserialize)]
pub struct ObservationsFixture {
    /// Observed prices
    pub observations: Vec<ObservationFixture>,
}

/// Observation Fixture
#[derive(Debug, Deserialize)]
pub struct ObservationFixture {
    /// Catalog item name
    pub item: String,

    /// Store key
    pub store: String,

    /// Shelf price (e.g., "3.99 USD")
    pub price: String,

    /// Sale price (e.g., "2.49 USD")
    pub sale_price: Option<String>,

    /// Sale label
    pub sale_label: Option<String>,
}
