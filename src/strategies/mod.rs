//! Allocation Strategies
//!
//! Each strategy assigns every line item in a [`PriceIndex`] to at most one candidate. Strategies
//! never share state, so they can run side by side over the same index.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    index::{Candidate, PriceIndex},
    resolver::cheapest_at,
    stores::Store,
};

pub mod balanced;
pub mod money;
pub mod one_stop;

pub use balanced::Balanced;
pub use money::MoneySaver;
pub use one_stop::OneStop;

/// Which trade-off a plan was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Cheapest price per item, any number of stores
    Money,

    /// One store only
    Time,

    /// Cheapest within the best few stores
    Balanced,
}

impl StrategyKind {
    /// Wire name of the strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Money => "money",
            StrategyKind::Time => "time",
            StrategyKind::Balanced => "balanced",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line item assigned to a candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pick<'a> {
    /// Item name as requested
    pub name: &'a str,

    /// Chosen candidate
    pub candidate: Candidate<'a>,
}

/// Output of a strategy: assigned line items plus the ones it left out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation<'a> {
    /// Assigned line items, in request order
    pub picks: Vec<Pick<'a>>,

    /// Requested names this strategy could not assign, in request order
    pub unassigned: Vec<String>,
}

impl<'a> Allocation<'a> {
    /// Assign each line item with `choose`, recording the ones it returns `None` for.
    pub fn from_index<F>(index: &PriceIndex<'a>, mut choose: F) -> Self
    where
        F: FnMut(&[Candidate<'a>]) -> Option<Candidate<'a>>,
    {
        let mut allocation = Allocation::default();

        for line in index.lines() {
            match choose(line.candidates.as_slice()) {
                Some(candidate) => allocation.picks.push(Pick {
                    name: line.name,
                    candidate,
                }),
                None => allocation.unassigned.push(line.name.to_string()),
            }
        }

        allocation
    }
}

/// An item-to-store assignment algorithm.
pub trait AllocationStrategy {
    /// The plan type this strategy produces.
    fn kind(&self) -> StrategyKind;

    /// Assign the line items of `index`.
    fn allocate<'a>(&self, index: &PriceIndex<'a>) -> Allocation<'a>;
}

/// What a single store can offer for a request.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreCoverage<'a> {
    /// The store
    pub store: &'a Store,

    /// Distinct requested items the store stocks
    pub items: usize,

    /// Cost of every stocked line item at the store's cheapest price
    pub cost: Decimal,

    /// Regular minus effective price over the same line items
    pub savings: Decimal,
}

/// Coverage of every candidate store, ordered by store id.
pub fn store_coverage<'a>(index: &PriceIndex<'a>) -> Vec<StoreCoverage<'a>> {
    index
        .candidate_stores()
        .into_iter()
        .map(|store| {
            let mut keys = FxHashSet::default();
            let mut cost = Decimal::ZERO;
            let mut savings = Decimal::ZERO;

            for line in index.available() {
                if let Some(candidate) = cheapest_at(&line.candidates, &store.id) {
                    keys.insert(line.key.as_str());
                    cost += candidate.observation.effective_price();
                    savings += candidate.observation.savings();
                }
            }

            StoreCoverage {
                store,
                items: keys.len(),
                cost,
                savings,
            }
        })
        .collect()
}
