//! Price Index
//!
//! Groups price observations under the requested line items they match, keeping only
//! observations from eligible stores.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    matching::{MatchRule, normalize},
    observations::PriceObservation,
    stores::{Store, StoreId},
};

/// One way of buying a line item: an observation and the store it was observed at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate<'a> {
    /// Observed price
    pub observation: &'a PriceObservation,

    /// Store the price is valid at
    pub store: &'a Store,
}

impl Candidate<'_> {
    /// Store id of this candidate.
    pub fn store_id(&self) -> &StoreId {
        &self.store.id
    }
}

/// A requested item and every candidate that can satisfy it.
#[derive(Clone, Debug)]
pub struct LineItem<'a> {
    /// Item name as the shopper typed it
    pub name: &'a str,

    /// Normalised item name, shared by duplicate requests
    pub key: String,

    /// Matching candidates, in observation order
    pub candidates: SmallVec<[Candidate<'a>; 4]>,
}

impl LineItem<'_> {
    /// Whether no store can supply this item.
    pub fn is_unavailable(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Requested line items with their candidates.
#[derive(Clone, Debug, Default)]
pub struct PriceIndex<'a> {
    lines: Vec<LineItem<'a>>,
}

impl<'a> PriceIndex<'a> {
    /// Build the index for a request.
    ///
    /// Duplicate requested names become separate line items. Observations at stores not present
    /// in `stores` are ignored.
    pub fn build(
        items: &'a [String],
        observations: &'a [PriceObservation],
        stores: &[&'a Store],
        rule: MatchRule,
    ) -> Self {
        let stores_by_id: FxHashMap<&StoreId, &'a Store> =
            stores.iter().map(|store| (&store.id, *store)).collect();

        let stocked: Vec<(String, Candidate<'a>)> = observations
            .iter()
            .filter_map(|observation| {
                let store = *stores_by_id.get(&observation.store_id)?;

                Some((
                    normalize(&observation.item_name),
                    Candidate { observation, store },
                ))
            })
            .collect();

        let lines: Vec<LineItem<'a>> = items
            .iter()
            .map(|name| {
                let key = normalize(name);

                let candidates = stocked
                    .iter()
                    .filter(|(catalog, _)| rule.matches_normalized(&key, catalog))
                    .map(|(_, candidate)| *candidate)
                    .collect();

                LineItem {
                    name: name.as_str(),
                    key,
                    candidates,
                }
            })
            .collect();

        debug!(
            lines = lines.len(),
            observations = stocked.len(),
            ?rule,
            "built price index"
        );

        Self { lines }
    }

    /// All line items in request order.
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// Line items with at least one candidate.
    pub fn available(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.iter().filter(|line| !line.is_unavailable())
    }

    /// Requested names no store can supply, once per distinct item, in request order.
    pub fn unavailable_items(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();

        self.lines
            .iter()
            .filter(|line| line.is_unavailable() && seen.insert(line.key.as_str()))
            .map(|line| line.name.to_string())
            .collect()
    }

    /// Every store that appears as a candidate, ordered by id.
    pub fn candidate_stores(&self) -> Vec<&'a Store> {
        let mut stores: Vec<&'a Store> = Vec::new();
        let mut seen = FxHashSet::default();

        for candidate in self.lines.iter().flat_map(|line| line.candidates.iter()) {
            if seen.insert(candidate.store_id()) {
                stores.push(candidate.store);
            }
        }

        stores.sort_by(|a, b| a.id.cmp(&b.id));

        stores
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the request had no items.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn observations() -> Vec<PriceObservation> {
        vec![
            PriceObservation::new("Milk", "a", "Store A", Decimal::new(399, 2)),
            PriceObservation::new("Whole Milk", "b", "Store B", Decimal::new(349, 2)),
            PriceObservation::new("Eggs", "a", "Store A", Decimal::new(499, 2)),
            PriceObservation::new("Eggs", "gone", "Closed Store", Decimal::new(100, 2)),
        ]
    }

    fn stores() -> Vec<Store> {
        vec![Store::new("a", "Store A"), Store::new("b", "Store B")]
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exact_rule_matches_whole_names_only() {
        let observations = observations();
        let stores = stores();
        let eligible: Vec<&Store> = stores.iter().collect();
        let items = names(&["milk"]);

        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        let stores: Vec<&str> = index
            .lines()
            .iter()
            .flat_map(|line| line.candidates.iter().map(|c| c.store_id().as_str()))
            .collect();

        assert_eq!(stores, ["a"]);
    }

    #[test]
    fn substring_rule_matches_partial_names() {
        let observations = observations();
        let stores = stores();
        let eligible: Vec<&Store> = stores.iter().collect();
        let items = names(&["milk"]);

        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Substring);

        let count = index.lines().first().map_or(0, |line| line.candidates.len());

        assert_eq!(count, 2);
    }

    #[test]
    fn observations_at_ineligible_stores_are_ignored() {
        let observations = observations();
        let stores = stores();
        let eligible: Vec<&Store> = stores.iter().collect();
        let items = names(&["Eggs"]);

        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        let stores: Vec<&str> = index
            .available()
            .flat_map(|line| line.candidates.iter().map(|c| c.store_id().as_str()))
            .collect();

        assert_eq!(stores, ["a"]);
    }

    #[test]
    fn duplicates_are_separate_lines_and_unavailable_is_deduplicated() {
        let observations = observations();
        let stores = stores();
        let eligible: Vec<&Store> = stores.iter().collect();
        let items = names(&["Eggs", "Caviar", "eggs", "caviar "]);

        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        assert_eq!(index.len(), 4);
        assert_eq!(index.available().count(), 2);
        assert_eq!(index.unavailable_items(), ["Caviar"]);
    }

    #[test]
    fn candidate_stores_are_sorted_by_id() {
        let observations = observations();
        let stores = stores();
        let eligible: Vec<&Store> = stores.iter().rev().collect();
        let items = names(&["Whole Milk", "Milk"]);

        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        let ids: Vec<&str> = index
            .candidate_stores()
            .iter()
            .map(|store| store.id.as_str())
            .collect();

        assert_eq!(ids, ["a", "b"]);
    }
}
