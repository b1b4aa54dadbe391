use crate::models::RankedSpot;
use thiserror::Error;

/// Error returned when a random pick is requested from an empty result set
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot pick from an empty result set")]
pub struct EmptyResultError;

/// Pick one spot uniformly at random from a non-empty ranked list
///
/// Callers check for emptiness first and present the no-matches outcome;
/// calling this on an empty slice is a contract violation surfaced as
/// `EmptyResultError`.
pub fn pick_random(spots: &[RankedSpot]) -> Result<&RankedSpot, EmptyResultError> {
    if spots.is_empty() {
        return Err(EmptyResultError);
    }

    let index = rand::random_range(0..spots.len());
    Ok(&spots[index])
}
