//! Cartwise
//!
//! Loads a fixture set, computes the money, time and balanced plans for its shopping list and
//! prints them.
//!
//! Use `-f` to load a fixture set by name
//! Use `-i` (repeatable) to replace the fixture's shopping list
//! Use `--lat` / `--lng` to replace the fixture's shopper location
//! Use `-s` to search the catalog instead of computing plans
//! Use `-o json` to print JSON instead of tables

use std::io;

use anyhow::Result;
use tracing::info;

use cartwise::{
    config::{AppConfig, OutputFormat},
    engine::{compute_strategies, validate_items},
    fixtures::Fixture,
    geo::locate_stores,
    observability::init_logging,
    report::{write_observations, write_plans},
    search::search_observations,
};

/// Cartwise entry point
pub fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| e.exit());

    init_logging(&config.logging)?;

    let mut fixture =
        Fixture::from_set_in(config.input.fixtures_dir.clone(), &config.input.fixture)?;

    if !config.input.items.is_empty() {
        fixture.set_items(config.input.items.clone());
    }

    if let Some(location) = config.input.location() {
        fixture.set_location(Some(location));
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Some(query) = config.input.search.as_deref() {
        let results = search_observations(fixture.observations(), query, config.input.limit)?;

        info!(query, results = results.len(), "searched catalog");

        match config.input.output {
            OutputFormat::Table => {
                write_observations(&mut handle, &results, fixture.report_currency())?;
            }
            OutputFormat::Json => serde_json::to_writer_pretty(&mut handle, &results)?,
        }

        return Ok(());
    }

    validate_items(fixture.items())?;

    let stores = match fixture.location() {
        Some(location) => locate_stores(&fixture.stores(), location),
        None => fixture.stores(),
    };

    let options = config.engine_options();
    let set = compute_strategies(&fixture.request(&stores), &options);

    info!(
        fixture = %config.input.fixture,
        items = fixture.items().len(),
        unavailable = set.unavailable_items.len(),
        "computed strategies"
    );

    match config.input.output {
        OutputFormat::Table => write_plans(&mut handle, &set, fixture.report_currency())?,
        OutputFormat::Json => serde_json::to_writer_pretty(&mut handle, &set)?,
    }

    Ok(())
}
