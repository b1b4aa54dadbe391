use crate::models::{Candidate, PickySettings, SearchCriteria};

/// Check if a candidate's name matches any blacklist term
///
/// This is Stage 1 of the filtering pipeline. Terms are expected in
/// normalized (trimmed, lowercase) form; empty terms never match.
#[inline]
pub fn matches_blacklist(candidate: &Candidate, blacklist: &[String]) -> bool {
    let name = candidate.name.to_lowercase();
    blacklist
        .iter()
        .any(|term| !term.is_empty() && name.contains(term.as_str()))
}

/// Check if a candidate clears the minimum-rating floor
///
/// Stage 2. A missing floor admits everything; a missing provider rating
/// has already been defaulted to 0.0.
#[inline]
pub fn meets_rating_floor(candidate: &Candidate, min_rating: Option<f64>) -> bool {
    match min_rating {
        Some(floor) => candidate.rating >= floor,
        None => true,
    }
}

/// Check if a candidate falls under the picky exclusion
///
/// Stage 3. Applies only when the criteria opt in and the vibe's place
/// type is gated; an empty gate list gates every vibe.
#[inline]
pub fn picky_excluded(
    candidate: &Candidate,
    criteria: &SearchCriteria,
    picky: &PickySettings,
) -> bool {
    if !criteria.picky {
        return false;
    }

    let gated = if picky.gate_types.is_empty() {
        true
    } else {
        criteria
            .vibe
            .place_type
            .as_deref()
            .map_or(false, |place_type| {
                picky.gate_types.iter().any(|gate| gate == place_type)
            })
    };

    if !gated {
        return false;
    }

    candidate
        .tags
        .iter()
        .any(|tag| picky.exclude_types.contains(tag))
}
