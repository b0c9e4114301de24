//! Engine Config

use clap::Args;

use crate::{
    engine::EngineOptions, filter::DEFAULT_MAX_DISTANCE_KM, matching::MatchRule,
    plans::DEFAULT_INTER_STORE_TRANSIT_MINUTES, strategies::balanced::DEFAULT_BALANCED_STORE_COUNT,
};

/// Strategy engine settings.
#[derive(Debug, Args)]
pub struct EngineConfig {
    /// Largest distance, in kilometres, a located shopper will travel to a store
    #[arg(long, env = "MAX_DISTANCE_KM", default_value_t = DEFAULT_MAX_DISTANCE_KM)]
    pub max_distance_km: f64,

    /// How many stores the balanced plan shops at before falling back
    #[arg(long, env = "BALANCED_STORE_COUNT", default_value_t = DEFAULT_BALANCED_STORE_COUNT)]
    pub balanced_store_count: usize,

    /// Minutes added for each store visited after the first
    #[arg(
        long,
        env = "INTER_STORE_TRANSIT_MINUTES",
        default_value_t = DEFAULT_INTER_STORE_TRANSIT_MINUTES
    )]
    pub inter_store_transit_minutes: u32,

    /// How requested items are matched to catalog names (exact, substring)
    #[arg(long, env = "MATCH_RULE", value_enum, default_value_t = MatchRule::Exact)]
    pub match_rule: MatchRule,
}

impl From<&EngineConfig> for EngineOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_distance_km: config.max_distance_km,
            balanced_store_count: config.balanced_store_count,
            inter_store_transit_minutes: config.inter_store_transit_minutes,
            match_rule: config.match_rule,
        }
    }
}
