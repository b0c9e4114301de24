//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::{
    config::{engine::EngineConfig, observability::LoggingConfig},
    engine::EngineOptions,
    geo::Coordinates,
    search::DEFAULT_SEARCH_LIMIT,
};

pub mod engine;
pub mod observability;

/// Plan output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One table per plan.
    Table,

    /// The strategy set as JSON.
    Json,
}

/// Shopping list input settings.
#[derive(Debug, Args)]
pub struct InputConfig {
    /// Fixture set to load (stores, observations and list with this name)
    #[arg(short, long, env = "FIXTURE_SET", default_value = "grocery")]
    pub fixture: String,

    /// Directory containing the fixture sets
    #[arg(long, env = "FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Item to shop for, replacing the fixture's list (repeatable)
    #[arg(short, long = "item")]
    pub items: Vec<String>,

    /// Shopper latitude, replacing the fixture's location
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Shopper longitude, replacing the fixture's location
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Search the catalog for this text instead of computing plans
    #[arg(short, long)]
    pub search: Option<String>,

    /// Maximum number of search results
    #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,

    /// Output format (table, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl InputConfig {
    /// Shopper location given on the command line, if any.
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        self.lat
            .zip(self.lng)
            .map(|(lat, lng)| Coordinates::new(lat, lng))
    }
}

/// Cartwise configuration
#[derive(Debug, Parser)]
#[command(name = "cartwise", about = "Compare shopping strategies across nearby stores", long_about = None)]
pub struct AppConfig {
    /// Shopping list input settings.
    #[command(flatten)]
    pub input: InputConfig,

    /// Strategy engine settings.
    #[command(flatten)]
    pub engine: EngineConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Engine options derived from the engine settings.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions::from(&self.engine)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{config::observability::LogFormat, matching::MatchRule};

    use super::*;

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = AppConfig::try_parse_from([
            "cartwise",
            "--fixture",
            "weekend",
            "--item",
            "Milk",
            "--item",
            "Eggs",
            "--lat",
            "-33.87",
            "--lng",
            "151.21",
            "--balanced-store-count",
            "3",
            "--match-rule",
            "substring",
            "--log-format",
            "json",
            "--output",
            "json",
        ])?;

        assert_eq!(config.input.fixture, "weekend");
        assert_eq!(config.input.items, ["Milk", "Eggs"]);
        assert_eq!(config.input.location(), Some(Coordinates::new(-33.87, 151.21)));
        assert_eq!(config.input.output, OutputFormat::Json);
        assert_eq!(config.logging.log_format, LogFormat::Json);

        let options = config.engine_options();

        assert_eq!(options.balanced_store_count, 3);
        assert_eq!(options.match_rule, MatchRule::Substring);

        Ok(())
    }

    #[test]
    fn latitude_requires_longitude() {
        let result = AppConfig::try_parse_from(["cartwise", "--lat", "1.0"]);

        assert!(result.is_err());
    }

    #[test]
    fn no_location_without_coordinates() -> TestResult {
        let config = AppConfig::try_parse_from(["cartwise", "--item", "Milk"])?;

        assert_eq!(config.input.location(), None);
        assert_eq!(config.input.search, None);
        assert_eq!(config.input.limit, DEFAULT_SEARCH_LIMIT);

        Ok(())
    }
}
