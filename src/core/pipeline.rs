use crate::core::filters::{matches_blacklist, meets_rating_floor, picky_excluded};
use crate::models::{Candidate, PickySettings, RankedSpot, SearchCriteria};

/// Result of one filtering run
#[derive(Debug)]
pub struct FilterOutcome {
    pub spots: Vec<RankedSpot>,
    pub total_candidates: usize,
}

/// Filter pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Blacklist name match
/// 2. Minimum-rating floor
/// 3. Picky category exclusion
/// 4. Ranking by rating, descending (stable: ties keep provider order)
///
/// Each stage is a pure predicate over immutable candidates; the picky
/// exclusion and gate sets are injected configuration so deployments can
/// vary them without code changes.
#[derive(Debug, Clone)]
pub struct SpotFilter {
    picky: PickySettings,
}

impl SpotFilter {
    pub fn new(picky: PickySettings) -> Self {
        Self { picky }
    }

    pub fn with_default_settings() -> Self {
        Self {
            picky: PickySettings::default(),
        }
    }

    /// Filter and rank raw provider candidates against the criteria
    ///
    /// # Arguments
    /// * `criteria` - The immutable search criteria for this run
    /// * `candidates` - Raw candidates from the search provider, in
    ///   provider order
    ///
    /// # Returns
    /// FilterOutcome with the surviving spots ranked by rating and the
    /// pre-filter candidate count
    pub fn apply(&self, criteria: &SearchCriteria, candidates: Vec<Candidate>) -> FilterOutcome {
        let total_candidates = candidates.len();

        let mut spots: Vec<RankedSpot> = candidates
            .into_iter()
            // Stage 1: user-supplied blacklist
            .filter(|candidate| !matches_blacklist(candidate, &criteria.blacklist))
            // Stage 2: minimum-rating floor
            .filter(|candidate| meets_rating_floor(candidate, criteria.min_rating))
            // Stage 3: picky category exclusion
            .filter(|candidate| !picky_excluded(candidate, criteria, &self.picky))
            .map(RankedSpot::from)
            .collect();

        // sort_by is stable, so equal ratings keep provider order
        spots.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        FilterOutcome {
            spots,
            total_candidates,
        }
    }
}

impl Default for SpotFilter {
    fn default() -> Self {
        Self::with_default_settings()
    }
}
