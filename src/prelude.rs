//! Cartwise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    engine::{
        EngineOptions, RequestError, StrategyRequest, StrategySet, compute_strategies,
        validate_items,
    },
    fixtures::{Fixture, FixtureError},
    geo::{Coordinates, haversine_km, locate_stores},
    matching::MatchRule,
    observations::PriceObservation,
    plans::{AllocationEntry, Plan, PlanSummary, StoreVisit},
    report::{ReportError, write_plans},
    search::{SearchError, search_observations},
    stores::{Store, StoreId},
    strategies::{AllocationStrategy, Balanced, MoneySaver, OneStop, StrategyKind},
};
