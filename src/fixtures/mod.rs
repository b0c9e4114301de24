//! Fixtures
//!
//! Catalog snapshots stored as YAML, one file per category under a base directory:
//! `stores/<name>.yml`, `observations/<name>.yml` and `lists/<name>.yml`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use rusty_money::iso::{self, Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    engine::StrategyRequest,
    fixtures::{
        lists::ListFixture, observations::ObservationsFixture, prices::parse_price,
        stores::StoresFixture,
    },
    geo::Coordinates,
    observations::PriceObservation,
    stores::Store,
};

pub mod lists;
pub mod observations;
pub mod prices;
pub mod stores;

/// Currency used for reports when no prices have been loaded.
pub const DEFAULT_CURRENCY: &Currency = iso::USD;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying IO error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// An observation refers to a store that was not loaded
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// Currency mismatch between observations
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No observations loaded yet
    #[error("No observations loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Stores keyed by fixture key
    stores: BTreeMap<String, Store>,

    /// Observed prices, in file order
    observations: Vec<PriceObservation>,

    /// Requested items from the shopping list
    items: Vec<String>,

    /// Shopper location from the shopping list
    location: Option<Coordinates>,

    /// Currency shared by every observation
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            stores: BTreeMap::new(),
            observations: Vec::new(),
            items: Vec::new(),
            location: None,
            currency: None,
        }
    }

    /// Load stores from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_stores(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = read_fixture(&self.base_path, "stores", name)?;
        let fixture: StoresFixture = serde_norway::from_str(&contents)?;

        for (key, store_fixture) in fixture.stores {
            let store = store_fixture.into_store(&key);

            self.stores.insert(key, store);
        }

        debug!(set = name, stores = self.stores.len(), "loaded store fixtures");

        Ok(self)
    }

    /// Load price observations from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is malformed, if prices
    /// use more than one currency, or if an observation references an unknown store.
    pub fn load_observations(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = read_fixture(&self.base_path, "observations", name)?;
        let fixture: ObservationsFixture = serde_norway::from_str(&contents)?;

        for observation_fixture in fixture.observations {
            let (store_id, store_name) = self
                .stores
                .get(&observation_fixture.store)
                .map(|store| (store.id.clone(), store.name.clone()))
                .ok_or_else(|| FixtureError::StoreNotFound(observation_fixture.store.clone()))?;

            let (regular_price, currency) = parse_price(&observation_fixture.price)?;
            self.check_currency(currency)?;

            let sale_price = match observation_fixture.sale_price.as_deref() {
                Some(sale) => {
                    let (sale_price, sale_currency) = parse_price(sale)?;
                    self.check_currency(sale_currency)?;

                    Some(sale_price)
                }
                None => None,
            };

            self.observations.push(PriceObservation {
                item_name: observation_fixture.item,
                store_id,
                store_name,
                regular_price,
                sale_price,
                sale_label: observation_fixture.sale_label,
            });
        }

        debug!(
            set = name,
            observations = self.observations.len(),
            "loaded observation fixtures"
        );

        Ok(self)
    }

    /// Load a shopping list from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_list(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = read_fixture(&self.base_path, "lists", name)?;
        let fixture: ListFixture = serde_norway::from_str(&contents)?;

        self.items = fixture.items;
        self.location = fixture.location;

        Ok(self)
    }

    /// Load a complete fixture set (stores, observations and list with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_stores(name)?
            .load_observations(name)?
            .load_list(name)?;

        Ok(fixture)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }

    /// Replace the requested items
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
    }

    /// Replace the shopper location
    pub fn set_location(&mut self, location: Option<Coordinates>) {
        self.location = location;
    }

    /// Get all stores, ordered by key
    pub fn stores(&self) -> Vec<Store> {
        self.stores.values().cloned().collect()
    }

    /// Get all observations
    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// Get the requested items
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Get the shopper location
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no observations have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Currency to report amounts in, falling back to [`DEFAULT_CURRENCY`] for an empty catalog.
    pub fn report_currency(&self) -> &'static Currency {
        self.currency.unwrap_or(DEFAULT_CURRENCY)
    }

    /// Build an engine request over the loaded data, using `stores` for travel metrics.
    pub fn request<'a>(&'a self, stores: &'a [Store]) -> StrategyRequest<'a> {
        StrategyRequest {
            items: &self.items,
            observations: &self.observations,
            stores,
            location: self.location,
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn read_fixture(base_path: &Path, category: &str, name: &str) -> Result<String, FixtureError> {
    let path = base_path.join(category).join(format!("{name}.yml"));

    fs::read_to_string(&path).map_err(|source| FixtureError::Io { path, source })
}
