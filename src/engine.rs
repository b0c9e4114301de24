//! Strategy engine
//!
//! [`compute_strategies`] is the single entry point: it narrows the stores, indexes the
//! observations and runs the three allocation strategies over the result.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    filter::{DEFAULT_MAX_DISTANCE_KM, eligible_stores},
    geo::Coordinates,
    index::PriceIndex,
    matching::{MatchRule, normalize},
    observations::PriceObservation,
    plans::{DEFAULT_INTER_STORE_TRANSIT_MINUTES, Plan},
    stores::Store,
    strategies::{
        AllocationStrategy, Balanced, MoneySaver, OneStop, balanced::DEFAULT_BALANCED_STORE_COUNT,
    },
};

/// Errors for requests that must be rejected before reaching the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// No items were requested.
    #[error("no items requested")]
    NoItems,

    /// A requested item name is empty or whitespace (index).
    #[error("item {0} has an empty name")]
    BlankItem(usize),
}

/// Validate a requested item list.
///
/// # Errors
///
/// - [`RequestError::NoItems`]: the list is empty.
/// - [`RequestError::BlankItem`]: an entry is empty after trimming.
pub fn validate_items(items: &[String]) -> Result<(), RequestError> {
    if items.is_empty() {
        return Err(RequestError::NoItems);
    }

    match items.iter().position(|item| item.trim().is_empty()) {
        Some(idx) => Err(RequestError::BlankItem(idx)),
        None => Ok(()),
    }
}

/// Tunables for a strategy computation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Stores further than this from the shopper are ignored
    pub max_distance_km: f64,

    /// Number of top-ranked stores the balanced plan shops at
    pub balanced_store_count: usize,

    /// Minutes added for each hop between stores
    pub inter_store_transit_minutes: u32,

    /// How requested names are matched to catalog names
    pub match_rule: MatchRule,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            balanced_store_count: DEFAULT_BALANCED_STORE_COUNT,
            inter_store_transit_minutes: DEFAULT_INTER_STORE_TRANSIT_MINUTES,
            match_rule: MatchRule::default(),
        }
    }
}

/// Snapshot of everything a computation needs, fetched by the caller beforehand.
#[derive(Clone, Copy, Debug)]
pub struct StrategyRequest<'a> {
    /// Requested item names, duplicates allowed
    pub items: &'a [String],

    /// Catalog price observations
    pub observations: &'a [PriceObservation],

    /// Stores with travel metrics relative to the shopper
    pub stores: &'a [Store],

    /// Shopper location, if known
    pub location: Option<Coordinates>,
}

/// The three plans for a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySet {
    /// Cheapest plan
    pub money: Plan,

    /// One-stop plan
    pub time: Plan,

    /// Compromise plan
    pub balanced: Plan,

    /// Requested items no eligible store stocks, or that the one-stop store does not stock
    pub unavailable_items: Vec<String>,
}

impl StrategySet {
    /// Plans in money, time, balanced order.
    pub fn plans(&self) -> [&Plan; 3] {
        [&self.money, &self.time, &self.balanced]
    }
}

/// Compute the money, time and balanced plans for a request.
///
/// Never fails: unknown items are reported in [`StrategySet::unavailable_items`], and an empty
/// request or catalog yields three empty plans.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        items = request.items.len(),
        observations = request.observations.len(),
        stores = request.stores.len(),
    )
)]
pub fn compute_strategies(request: &StrategyRequest<'_>, options: &EngineOptions) -> StrategySet {
    // Travel metrics are only meaningful relative to a known shopper location.
    let unlocated: Vec<Store>;
    let stores = if request.location.is_some() {
        request.stores
    } else {
        unlocated = request.stores.iter().map(Store::without_travel).collect();
        unlocated.as_slice()
    };

    let eligible = eligible_stores(stores, request.location, options.max_distance_km);

    let index = PriceIndex::build(
        request.items,
        request.observations,
        &eligible,
        options.match_rule,
    );

    let transit = options.inter_store_transit_minutes;
    let balanced = Balanced::new(options.balanced_store_count);

    let (money, (time, balanced)) = rayon::join(
        || plan_for(&MoneySaver, &index, transit),
        || {
            rayon::join(
                || plan_for(&OneStop, &index, transit),
                || plan_for(&balanced, &index, transit),
            )
        },
    );

    let unavailable_items = unavailable_items(&index, &time);

    debug!(
        money_total = %money.total_cost(),
        time_total = %time.total_cost(),
        balanced_total = %balanced.total_cost(),
        unavailable = unavailable_items.len(),
        "computed strategies"
    );

    StrategySet {
        money,
        time,
        balanced,
        unavailable_items,
    }
}

/// Items nothing can supply, plus the ones the one-stop plan leaves out, once per normalised name
/// in request order.
fn unavailable_items(index: &PriceIndex<'_>, time: &Plan) -> Vec<String> {
    let mut seen = FxHashSet::default();

    time.unassigned()
        .iter()
        .cloned()
        .chain(index.unavailable_items())
        .filter(|name| seen.insert(normalize(name)))
        .collect()
}

fn plan_for(strategy: &impl AllocationStrategy, index: &PriceIndex<'_>, transit: u32) -> Plan {
    Plan::from_allocation(strategy.kind(), &strategy.allocate(index), transit)
}
