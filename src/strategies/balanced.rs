//! Balanced

use tracing::debug;

use crate::{
    index::PriceIndex,
    resolver::{cheapest_for, cheapest_within},
    stores::StoreId,
    strategies::{Allocation, AllocationStrategy, StrategyKind, store_coverage},
};

/// Default number of stores a balanced plan aims for.
pub const DEFAULT_BALANCED_STORE_COUNT: usize = 2;

/// Buys each item at its cheapest store among the top-ranked few.
///
/// Stores are ranked by how many requested items they stock, then by how much the shopper would
/// save there. An item none of the top stores stock falls back to its cheapest store overall, so a
/// balanced plan can visit more than `store_count` stores.
#[derive(Clone, Copy, Debug)]
pub struct Balanced {
    /// Number of top-ranked stores to shop at
    pub store_count: usize,
}

impl Balanced {
    /// Create a balanced strategy over `store_count` top-ranked stores.
    pub fn new(store_count: usize) -> Self {
        Self { store_count }
    }

    /// Ids of the top-ranked stores, best first.
    pub fn top_stores<'a>(&self, index: &PriceIndex<'a>) -> Vec<&'a StoreId> {
        let mut ranked = store_coverage(index);

        ranked.sort_by(|a, b| {
            b.items
                .cmp(&a.items)
                .then_with(|| b.savings.cmp(&a.savings))
                .then_with(|| a.store.id.cmp(&b.store.id))
        });

        ranked
            .into_iter()
            .take(self.store_count)
            .map(|coverage| coverage.store)
            .map(|store| &store.id)
            .collect()
    }
}

impl Default for Balanced {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCED_STORE_COUNT)
    }
}

impl AllocationStrategy for Balanced {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Balanced
    }

    fn allocate<'a>(&self, index: &PriceIndex<'a>) -> Allocation<'a> {
        let top = self.top_stores(index);
        let mut fallbacks = 0_usize;

        let allocation = Allocation::from_index(index, |candidates| {
            cheapest_within(candidates, &top)
                .or_else(|| {
                    let fallback = cheapest_for(candidates);
                    fallbacks += usize::from(fallback.is_some());
                    fallback
                })
                .copied()
        });

        debug!(
            top_stores = ?top.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            fallbacks,
            "balanced allocated"
        );

        allocation
    }
}
