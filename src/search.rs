//! Catalog search
//!
//! Lets a shopper look up what the catalog calls an item before adding it to their list.

use thiserror::Error;

use crate::{matching::normalize, observations::PriceObservation};

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Search errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The query was empty or whitespace.
    #[error("missing search query")]
    EmptyQuery,
}

/// Observations whose item name contains `query`, case-insensitively.
///
/// Results are ordered by effective price, then store id, and truncated to `limit`.
///
/// # Errors
///
/// Returns [`SearchError::EmptyQuery`] if the query is blank.
pub fn search_observations<'a>(
    observations: &'a [PriceObservation],
    query: &str,
    limit: usize,
) -> Result<Vec<&'a PriceObservation>, SearchError> {
    let query = normalize(query);

    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let mut results: Vec<&PriceObservation> = observations
        .iter()
        .filter(|observation| normalize(&observation.item_name).contains(&query))
        .collect();

    results.sort_by(|a, b| {
        a.effective_price()
            .cmp(&b.effective_price())
            .then_with(|| a.store_id.cmp(&b.store_id))
    });
    results.truncate(limit);

    Ok(results)
}
