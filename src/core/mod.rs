// Core pipeline exports
pub mod filters;
pub mod pipeline;
pub mod selection;

pub use filters::{matches_blacklist, meets_rating_floor, picky_excluded};
pub use pipeline::{FilterOutcome, SpotFilter};
pub use selection::{pick_random, EmptyResultError};
