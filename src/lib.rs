//! Spotfinder - restaurant discovery and random-pick service
//!
//! This library provides the search/filter/selection pipeline behind the
//! spotfinder service: geocode a postal code, query nearby places, apply
//! blacklist/rating/picky filters, rank by rating, and either list the
//! results or pick one at random.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{pick_random, EmptyResultError, FilterOutcome, SpotFilter};
pub use models::{Candidate, Coordinates, PickySettings, RankedSpot, SearchCriteria, Vibe};
