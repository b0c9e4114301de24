//! Plan report
//!
//! Renders a [`StrategySet`] as one table per plan followed by its totals.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::Columns, object::Rows},
};
use thiserror::Error;

use crate::{
    engine::StrategySet, observations::PriceObservation, plans::Plan, strategies::StrategyKind,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An amount does not fit in the currency's minor units.
    #[error("amount {0} cannot be represented in minor units")]
    UnrepresentableAmount(Decimal),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write every plan in the set, then the items no store stocks.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or the output cannot be written.
pub fn write_plans(
    mut out: impl io::Write,
    set: &StrategySet,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    for plan in set.plans() {
        write_plan(&mut out, plan, currency)?;
    }

    if !set.unavailable_items.is_empty() {
        writeln!(out, "Unavailable: {}", set.unavailable_items.join(", "))?;
    }

    Ok(())
}

/// Write a single plan as a table with a totals summary.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or the output cannot be written.
pub fn write_plan(
    mut out: impl io::Write,
    plan: &Plan,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    writeln!(out, "\n\x1b[1m{}\x1b[0m", title(plan.strategy_type()))?;

    if plan.store_count() == 0 {
        writeln!(out, " Nothing to buy.")?;
    } else {
        let mut builder = Builder::default();

        builder.push_record(["Store", "Item", "Product", "Regular", "Sale", "Label"]);

        for (store_id, visit) in plan.stores() {
            for (idx, entry) in visit.entries.iter().enumerate() {
                let store_cell = if idx == 0 {
                    format!("{} ({store_id})", visit.store_name)
                } else {
                    String::new()
                };

                let sale_cell = match entry.sale_price {
                    Some(sale) => format_money(sale, currency)?,
                    None => String::new(),
                };

                builder.push_record([
                    store_cell,
                    entry.item_name.clone(),
                    entry.product_name.clone(),
                    format_money(entry.regular_price, currency)?,
                    sale_cell,
                    entry.sale_label.clone().unwrap_or_default(),
                ]);
            }
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..5), Alignment::right());

        writeln!(out, "{table}")?;
    }

    write_summary(&mut out, plan, currency)
}

fn write_summary(
    out: &mut impl io::Write,
    plan: &Plan,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    let savings_percent_points = percent_points(plan.savings_percent());

    let rows = [
        (" Total:", format_money(plan.total_cost(), currency)?),
        (" Regular:", format_money(plan.regular_cost(), currency)?),
        (
            " Savings:",
            format!(
                "({savings_percent_points:.2}%) {}",
                format_money(plan.savings(), currency)?
            ),
        ),
        (" Time:", format!("{} min", plan.total_time_minutes())),
        (" Stores:", plan.store_count().to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:<label_width$} {value}")?;
    }

    if !plan.unassigned().is_empty() {
        writeln!(out, " Not in this plan: {}", plan.unassigned().join(", "))?;
    }

    Ok(())
}

fn title(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Money => "Money Saver",
        StrategyKind::Time => "Time Saver (one stop)",
        StrategyKind::Balanced => "Balanced",
    }
}

/// Write catalog search results as a single table.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be formatted or the output cannot be written.
pub fn write_observations(
    mut out: impl io::Write,
    observations: &[&PriceObservation],
    currency: &'static Currency,
) -> Result<(), ReportError> {
    if observations.is_empty() {
        writeln!(out, "No matching products.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Store", "Regular", "Sale", "Label"]);

    for observation in observations {
        let sale_cell = match observation.sale_price {
            Some(sale) => format_money(sale, currency)?,
            None => String::new(),
        };

        builder.push_record([
            observation.item_name.clone(),
            observation.store_name.clone(),
            format_money(observation.regular_price, currency)?,
            sale_cell,
            observation.sale_label.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..4), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Format a decimal amount in the given currency.
///
/// # Errors
///
/// Returns [`ReportError::UnrepresentableAmount`] if the amount overflows the currency's minor
/// units.
pub fn format_money(amount: Decimal, currency: &'static Currency) -> Result<String, ReportError> {
    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(ReportError::UnrepresentableAmount(amount))?;

    Ok(Money::from_minor(minor_units, currency).to_string())
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}
