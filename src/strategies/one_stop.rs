//! One-Stop (Time Saver)

use tracing::debug;

use crate::{
    index::PriceIndex,
    resolver::cheapest_at,
    strategies::{Allocation, AllocationStrategy, StoreCoverage, StrategyKind, store_coverage},
};

/// Buys everything it can at the single store that stocks the most requested items.
///
/// Items that store does not stock are left unassigned rather than bought elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneStop;

impl OneStop {
    /// The store a one-stop trip would go to, if any store stocks a requested item.
    ///
    /// Highest coverage wins; ties go to the lower cost at that store, then the lower store id.
    pub fn choose_store<'a>(index: &PriceIndex<'a>) -> Option<StoreCoverage<'a>> {
        store_coverage(index).into_iter().min_by(|a, b| {
            b.items
                .cmp(&a.items)
                .then_with(|| a.cost.cmp(&b.cost))
                .then_with(|| a.store.id.cmp(&b.store.id))
        })
    }
}

impl AllocationStrategy for OneStop {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Time
    }

    fn allocate<'a>(&self, index: &PriceIndex<'a>) -> Allocation<'a> {
        let Some(chosen) = Self::choose_store(index) else {
            return Allocation::from_index(index, |_| None);
        };

        debug!(
            store = %chosen.store.id,
            items = chosen.items,
            cost = %chosen.cost,
            "one-stop store chosen"
        );

        Allocation::from_index(index, |candidates| {
            cheapest_at(candidates, &chosen.store.id).copied()
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{
        matching::MatchRule,
        observations::PriceObservation,
        stores::Store,
        strategies::test_support::{milk_and_eggs, store_of},
    };

    use super::*;

    #[test]
    fn equal_coverage_goes_to_cheaper_store() {
        let (items, observations, stores) = milk_and_eggs();
        let eligible: Vec<&Store> = stores.iter().collect();
        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        let chosen = OneStop::choose_store(&index);

        assert_eq!(chosen.as_ref().map(|c| c.store.id.as_str()), Some("store-a"));
        assert_eq!(chosen.map(|c| c.cost), Some(Decimal::new(648, 2)));

        let allocation = OneStop.allocate(&index);

        assert_eq!(store_of(&allocation.picks, "Milk"), Some("store-a"));
        assert_eq!(store_of(&allocation.picks, "Eggs"), Some("store-a"));
    }

    #[test]
    fn coverage_beats_price() {
        let (mut items, mut observations, stores) = milk_and_eggs();
        items.push("Bread".to_string());
        observations.push(PriceObservation::new(
            "Bread",
            "store-b",
            "Store B",
            Decimal::new(250, 2),
        ));

        let eligible: Vec<&Store> = stores.iter().collect();
        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        let allocation = OneStop.allocate(&index);

        assert_eq!(store_of(&allocation.picks, "Bread"), Some("store-b"));
        assert_eq!(allocation.picks.len(), 3);
    }

    #[test]
    fn uncovered_items_are_not_backfilled() {
        let (mut items, mut observations, stores) = milk_and_eggs();
        items.push("Bread".to_string());
        observations.push(PriceObservation::new(
            "Bread",
            "store-c",
            "Store C",
            Decimal::new(250, 2),
        ));

        let mut stores = stores;
        stores.push(Store::new("store-c", "Store C"));

        let eligible: Vec<&Store> = stores.iter().collect();
        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        let allocation = OneStop.allocate(&index);

        assert_eq!(allocation.picks.len(), 2);
        assert_eq!(allocation.unassigned, ["Bread"]);
        assert!(
            allocation
                .picks
                .iter()
                .all(|pick| pick.candidate.store.id.as_str() == "store-a")
        );
    }

    #[test]
    fn full_ties_go_to_lowest_store_id() {
        let items = vec!["Milk".to_string()];
        let observations = [
            PriceObservation::new("Milk", "z", "Z", Decimal::new(300, 2)),
            PriceObservation::new("Milk", "m", "M", Decimal::new(300, 2)),
        ];
        let stores = [Store::new("z", "Z"), Store::new("m", "M")];
        let eligible: Vec<&Store> = stores.iter().collect();
        let index = PriceIndex::build(&items, &observations, &eligible, MatchRule::Exact);

        let chosen = OneStop::choose_store(&index).map(|c| c.store.id.as_str());

        assert_eq!(chosen, Some("m"));
    }

    #[test]
    fn nothing_stocked_leaves_everything_unassigned() {
        let items = vec!["Milk".to_string()];
        let index = PriceIndex::build(&items, &[], &[], MatchRule::Exact);

        let allocation = OneStop.allocate(&index);

        assert!(allocation.picks.is_empty());
        assert_eq!(allocation.unassigned, ["Milk"]);
    }
}
