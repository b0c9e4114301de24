//! Cost Resolver

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::{index::Candidate, observations::PriceObservation, stores::StoreId};

/// The price the shopper pays for an observation: sale price if present, else regular price.
pub fn effective_price(observation: &PriceObservation) -> Decimal {
    observation.effective_price()
}

/// Returns the cheapest candidate.
///
/// Ties on effective price go to the lowest store id, then the lowest regular price, then the
/// earliest candidate.
pub fn cheapest_for<'c, 'a>(candidates: &'c [Candidate<'a>]) -> Option<&'c Candidate<'a>> {
    cheapest(candidates.iter())
}

/// Returns the cheapest candidate at a single store.
pub fn cheapest_at<'c, 'a>(
    candidates: &'c [Candidate<'a>],
    store_id: &StoreId,
) -> Option<&'c Candidate<'a>> {
    cheapest(
        candidates
            .iter()
            .filter(|candidate| candidate.store_id() == store_id),
    )
}

/// Returns the cheapest candidate among a set of stores.
pub fn cheapest_within<'c, 'a>(
    candidates: &'c [Candidate<'a>],
    store_ids: &[&StoreId],
) -> Option<&'c Candidate<'a>> {
    cheapest(
        candidates
            .iter()
            .filter(|candidate| store_ids.iter().any(|id| *id == candidate.store_id())),
    )
}

fn cheapest<'c, 'a>(
    candidates: impl Iterator<Item = &'c Candidate<'a>>,
) -> Option<&'c Candidate<'a>>
where
    'a: 'c,
{
    // `min_by` keeps the first of equal elements, which makes input order the last tie-break.
    candidates.min_by(|a, b| compare(a, b))
}

fn compare(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    effective_price(a.observation)
        .cmp(&effective_price(b.observation))
        .then_with(|| a.store_id().cmp(b.store_id()))
        .then_with(|| {
            a.observation
                .regular_price
                .cmp(&b.observation.regular_price)
        })
}
