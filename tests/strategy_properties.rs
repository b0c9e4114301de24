//! Properties every strategy set must hold, independent of fixture data.
//!
//! Milk and Eggs at two stores:
//!
//! | Item | Store A                | Store B |
//! |------|------------------------|---------|
//! | Milk | $3.99                  | $3.49   |
//! | Eggs | $4.99, on sale $2.49   | $5.29   |

use rust_decimal::Decimal;
use testresult::TestResult;

use cartwise::{
    engine::{EngineOptions, StrategyRequest, StrategySet, compute_strategies},
    observations::PriceObservation,
    stores::{Store, StoreId},
};

fn observations() -> Vec<PriceObservation> {
    vec![
        PriceObservation::new("Milk", "store-a", "Store A", Decimal::new(399, 2)),
        PriceObservation::new("Milk", "store-b", "Store B", Decimal::new(349, 2)),
        PriceObservation::new("Eggs", "store-a", "Store A", Decimal::new(499, 2))
            .on_sale(Decimal::new(249, 2)),
        PriceObservation::new("Eggs", "store-b", "Store B", Decimal::new(529, 2)),
    ]
}

fn stores() -> Vec<Store> {
    vec![
        Store::new("store-a", "Store A").with_travel_time(10),
        Store::new("store-b", "Store B").with_travel_time(5),
    ]
}

fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn run(
    items: &[String],
    observations: &[PriceObservation],
    stores: &[Store],
    options: &EngineOptions,
) -> StrategySet {
    let request = StrategyRequest {
        items,
        observations,
        stores,
        location: None,
    };

    compute_strategies(&request, options)
}

fn assert_totals_bounded(set: &StrategySet) {
    for plan in set.plans() {
        assert!(plan.total_cost() >= Decimal::ZERO, "{plan:?}");
        assert!(plan.total_cost() <= plan.regular_cost(), "{plan:?}");
    }
}

#[test]
fn money_saver_picks_cheapest_store_per_item() {
    let set = run(
        &items(&["Milk", "Eggs"]),
        &observations(),
        &stores(),
        &EngineOptions::default(),
    );

    assert_eq!(set.money.total_cost(), Decimal::new(598, 2));
    assert_eq!(set.money.store_count(), 2);

    let milk_store = set
        .money
        .entries()
        .find(|entry| entry.item_name == "Milk")
        .map(|entry| entry.store_id.clone());

    assert_eq!(milk_store, Some(StoreId::from("store-b")));
    assert_totals_bounded(&set);
}

#[test]
fn one_stop_prefers_lower_cost_at_equal_coverage() {
    let set = run(
        &items(&["Milk", "Eggs"]),
        &observations(),
        &stores(),
        &EngineOptions::default(),
    );

    assert_eq!(set.time.store_count(), 1);
    assert_eq!(set.time.total_cost(), Decimal::new(648, 2));
    assert!(set.time.stores().contains_key(&StoreId::from("store-a")));
}

#[test]
fn missing_item_is_unavailable_everywhere_and_costs_nothing() {
    let with_missing = run(
        &items(&["Milk", "Eggs", "Saffron"]),
        &observations(),
        &stores(),
        &EngineOptions::default(),
    );
    let without = run(
        &items(&["Milk", "Eggs"]),
        &observations(),
        &stores(),
        &EngineOptions::default(),
    );

    assert_eq!(with_missing.unavailable_items, ["Saffron"]);

    for (plan, baseline) in with_missing.plans().into_iter().zip(without.plans()) {
        assert!(plan.unassigned().iter().any(|name| name == "Saffron"));
        assert_eq!(plan.total_cost(), baseline.total_cost());
        assert_eq!(plan.regular_cost(), baseline.regular_cost());
        assert_eq!(plan.total_time_minutes(), baseline.total_time_minutes());
    }
}

#[test]
fn item_outside_one_stop_store_is_unavailable() {
    let observations = vec![
        PriceObservation::new("Milk", "store-a", "Store A", Decimal::new(399, 2)),
        PriceObservation::new("Eggs", "store-a", "Store A", Decimal::new(499, 2)),
        PriceObservation::new("Bread", "store-c", "Store C", Decimal::new(250, 2)),
    ];
    let stores = vec![
        Store::new("store-a", "Store A"),
        Store::new("store-c", "Store C"),
    ];

    let set = run(
        &items(&["Milk", "Eggs", "Bread", "bread"]),
        &observations,
        &stores,
        &EngineOptions::default(),
    );

    assert_eq!(set.time.unassigned(), ["Bread", "bread"]);
    assert_eq!(set.unavailable_items, ["Bread"]);

    // The money plan still buys it at the only store that has it.
    assert!(set.money.stores().contains_key(&StoreId::from("store-c")));
}

#[test]
fn duplicate_requests_are_bought_twice() {
    let single = run(
        &items(&["Milk"]),
        &observations(),
        &stores(),
        &EngineOptions::default(),
    );
    let doubled = run(
        &items(&["Milk", "milk"]),
        &observations(),
        &stores(),
        &EngineOptions::default(),
    );

    for (plan, baseline) in doubled.plans().into_iter().zip(single.plans()) {
        assert_eq!(plan.entries().count(), 2, "{plan:?}");
        assert_eq!(plan.total_cost(), baseline.total_cost() * Decimal::TWO);
        assert_eq!(plan.regular_cost(), baseline.regular_cost() * Decimal::TWO);
        assert_eq!(plan.store_count(), baseline.store_count());
    }
}

#[test]
fn balanced_single_store_falls_back_for_missing_items() {
    let mut observations = observations();
    observations.push(PriceObservation::new(
        "Bread",
        "store-c",
        "Store C",
        Decimal::new(250, 2),
    ));

    let mut stores = stores();
    stores.push(Store::new("store-c", "Store C").with_travel_time(20));

    let options = EngineOptions {
        balanced_store_count: 1,
        ..EngineOptions::default()
    };

    // Store A wins the ranking (same coverage as B, more savings) but has no bread.
    let set = run(
        &items(&["Milk", "Eggs", "Bread"]),
        &observations,
        &stores,
        &options,
    );

    assert!(set.balanced.store_count() > 1);

    let bread_store = set
        .balanced
        .entries()
        .find(|entry| entry.item_name == "Bread")
        .map(|entry| entry.store_id.clone());

    assert_eq!(bread_store, Some(StoreId::from("store-c")));
    assert_totals_bounded(&set);
}

#[test]
fn empty_request_yields_empty_plans() {
    let set = run(&[], &observations(), &stores(), &EngineOptions::default());

    for plan in set.plans() {
        assert!(plan.stores().is_empty());
        assert_eq!(plan.total_cost(), Decimal::ZERO);
        assert_eq!(plan.store_count(), 0);
    }

    assert!(set.unavailable_items.is_empty());
}

#[test]
fn empty_catalog_yields_empty_plans() {
    let requested = items(&["Milk"]);

    let no_stores = run(&requested, &observations(), &[], &EngineOptions::default());
    let no_observations = run(&requested, &[], &stores(), &EngineOptions::default());

    for set in [no_stores, no_observations] {
        assert_eq!(set.unavailable_items, ["Milk"]);

        for plan in set.plans() {
            assert_eq!(plan.store_count(), 0);
            assert_eq!(plan.total_cost(), Decimal::ZERO);
            assert_eq!(plan.total_time_minutes(), 0);
        }
    }
}

#[test]
fn repeated_runs_serialize_identically() -> TestResult {
    // Every store offers milk at the same price, so only tie-breaks decide.
    let observations: Vec<PriceObservation> = ["store-c", "store-a", "store-b"]
        .into_iter()
        .map(|store| PriceObservation::new("Milk", store, store, Decimal::new(300, 2)))
        .collect();
    let stores: Vec<Store> = ["store-b", "store-c", "store-a"]
        .into_iter()
        .map(|id| Store::new(id, id))
        .collect();
    let requested = items(&["Milk", "Milk"]);

    let first = serde_json::to_string(&run(
        &requested,
        &observations,
        &stores,
        &EngineOptions::default(),
    ))?;
    let second = serde_json::to_string(&run(
        &requested,
        &observations,
        &stores,
        &EngineOptions::default(),
    ))?;

    assert_eq!(first, second);

    let set: StrategySet = serde_json::from_str(&first)?;

    for plan in set.plans() {
        assert!(plan.stores().contains_key(&StoreId::from("store-a")));
    }

    Ok(())
}
