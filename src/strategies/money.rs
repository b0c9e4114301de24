//! Money Saver

use tracing::debug;

use crate::{
    index::PriceIndex,
    resolver::cheapest_for,
    strategies::{Allocation, AllocationStrategy, StrategyKind},
};

/// Buys every item wherever it is cheapest, however many stores that takes.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoneySaver;

impl AllocationStrategy for MoneySaver {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Money
    }

    fn allocate<'a>(&self, index: &PriceIndex<'a>) -> Allocation<'a> {
        let allocation =
            Allocation::from_index(index, |candidates| cheapest_for(candidates).copied());

        debug!(
            assigned = allocation.picks.len(),
            unassigned = allocation.unassigned.len(),
            "money saver allocated"
        );

        allocation
    }
}
