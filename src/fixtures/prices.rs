//! Price parsing

use rust_decimal::Decimal;
use rusty_money::{Findable, iso::Currency};

use crate::fixtures::FixtureError;

/// Parse a price string (e.g. "2.99 USD") into an amount and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is not a
/// non-negative decimal, or if the currency code is not a known ISO code.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency =
        Currency::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Ok((amount, currency))
}
