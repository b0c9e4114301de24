//! Plans
//!
//! A [`Plan`] is the shopper-facing result of one strategy: the items grouped by the store they
//! should be bought at, with cost and travel totals.

use std::collections::BTreeMap;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    stores::StoreId,
    strategies::{Allocation, Pick, StrategyKind},
};

/// Default minutes added for each hop between two stores.
pub const DEFAULT_INTER_STORE_TRANSIT_MINUTES: u32 = 1;

/// One resolved line item within a plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    /// Item name as the shopper requested it
    pub item_name: String,

    /// Catalog name of the product bought for it
    pub product_name: String,

    /// Store the item is bought at
    pub store_id: StoreId,

    /// Store display name
    pub store_name: String,

    /// Shelf price
    pub regular_price: Decimal,

    /// Sale price, if on sale
    pub sale_price: Option<Decimal>,

    /// Sale label, if on sale
    pub sale_label: Option<String>,
}

impl AllocationEntry {
    /// The price paid for this entry.
    pub fn effective_price(&self) -> Decimal {
        self.sale_price
            .map_or(self.regular_price, |sale| sale.min(self.regular_price))
    }
}

impl From<&Pick<'_>> for AllocationEntry {
    fn from(pick: &Pick<'_>) -> Self {
        let observation = pick.candidate.observation;
        let store = pick.candidate.store;

        AllocationEntry {
            item_name: pick.name.to_string(),
            product_name: observation.item_name.clone(),
            store_id: store.id.clone(),
            store_name: store.name.clone(),
            regular_price: observation.regular_price,
            sale_price: observation.sale_price,
            sale_label: observation.sale_label.clone(),
        }
    }
}

/// Everything a plan buys at one store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreVisit {
    /// Store display name
    pub store_name: String,

    /// Travel time to the store, in minutes
    pub travel_time_minutes: u32,

    /// Sum of effective prices of the entries
    pub subtotal: Decimal,

    /// Entries in request order
    pub entries: Vec<AllocationEntry>,
}

/// A shopping plan for one strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    strategy_type: StrategyKind,
    total_cost: Decimal,
    regular_cost: Decimal,
    total_time_minutes: u32,
    store_count: usize,
    stores: BTreeMap<StoreId, StoreVisit>,
    unassigned: Vec<String>,
}

impl Plan {
    /// A plan that buys nothing.
    pub fn empty(strategy_type: StrategyKind) -> Self {
        Self {
            strategy_type,
            total_cost: Decimal::ZERO,
            regular_cost: Decimal::ZERO,
            total_time_minutes: 0,
            store_count: 0,
            stores: BTreeMap::new(),
            unassigned: Vec::new(),
        }
    }

    /// Aggregate a strategy's allocation into a plan.
    ///
    /// Total time is the travel time to every visited store plus `transit_minutes` for each hop
    /// between stores.
    pub fn from_allocation(
        strategy_type: StrategyKind,
        allocation: &Allocation<'_>,
        transit_minutes: u32,
    ) -> Self {
        let mut stores: BTreeMap<StoreId, StoreVisit> = BTreeMap::new();

        for pick in &allocation.picks {
            let store = pick.candidate.store;
            let entry = AllocationEntry::from(pick);

            let visit = stores
                .entry(store.id.clone())
                .or_insert_with(|| StoreVisit {
                    store_name: store.name.clone(),
                    travel_time_minutes: store.travel_time_minutes,
                    subtotal: Decimal::ZERO,
                    entries: Vec::new(),
                });

            visit.subtotal += entry.effective_price();
            visit.entries.push(entry);
        }

        let total_cost = stores.values().map(|visit| visit.subtotal).sum();
        let regular_cost = stores
            .values()
            .flat_map(|visit| visit.entries.iter())
            .map(|entry| entry.regular_price)
            .sum();

        let store_count = stores.len();
        let travel: u32 = stores
            .values()
            .map(|visit| visit.travel_time_minutes)
            .fold(0, u32::saturating_add);
        let hops = u32::try_from(store_count.saturating_sub(1)).unwrap_or(u32::MAX);

        Self {
            strategy_type,
            total_cost,
            regular_cost,
            total_time_minutes: travel.saturating_add(hops.saturating_mul(transit_minutes)),
            store_count,
            stores,
            unassigned: allocation.unassigned.clone(),
        }
    }

    /// Strategy the plan was built with.
    pub fn strategy_type(&self) -> StrategyKind {
        self.strategy_type
    }

    /// Amount paid, with sale prices applied.
    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Amount the same items would cost at shelf prices.
    pub fn regular_cost(&self) -> Decimal {
        self.regular_cost
    }

    /// Amount saved through sale prices.
    pub fn savings(&self) -> Decimal {
        self.regular_cost - self.total_cost
    }

    /// Savings as a fraction of the regular cost.
    pub fn savings_percent(&self) -> Percentage {
        if self.regular_cost.is_zero() {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(self.savings() / self.regular_cost)
    }

    /// Travel time in minutes, including transit between stores.
    pub fn total_time_minutes(&self) -> u32 {
        self.total_time_minutes
    }

    /// Number of stores visited.
    pub fn store_count(&self) -> usize {
        self.store_count
    }

    /// Store visits keyed by store id.
    pub fn stores(&self) -> &BTreeMap<StoreId, StoreVisit> {
        &self.stores
    }

    /// Every entry in the plan, grouped by store.
    pub fn entries(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.stores.values().flat_map(|visit| visit.entries.iter())
    }

    /// Requested items this plan does not buy.
    pub fn unassigned(&self) -> &[String] {
        &self.unassigned
    }

    /// Totals without the entries, as stored when a shopper saves a plan.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            strategy_type: self.strategy_type,
            total_cost: self.total_cost,
            regular_cost: self.regular_cost,
            savings: self.savings(),
            total_time_minutes: self.total_time_minutes,
            store_count: self.store_count,
        }
    }
}

/// Plan totals without the entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Strategy the plan was built with
    pub strategy_type: StrategyKind,

    /// Amount paid
    pub total_cost: Decimal,

    /// Amount at shelf prices
    pub regular_cost: Decimal,

    /// Regular minus total cost
    pub savings: Decimal,

    /// Travel time in minutes
    pub total_time_minutes: u32,

    /// Number of stores visited
    pub store_count: usize,
}
