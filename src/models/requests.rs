use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to search for spots near a postal code
///
/// Radius and vibe are validated against the configured tables in the
/// handler; serde only enforces shape here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchSpotsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "postal_code", rename = "postalCode")]
    pub postal_code: String,
    #[serde(alias = "radius_m", rename = "radiusM", default = "default_radius_m")]
    pub radius_m: u32,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(alias = "min_rating", rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[validate(length(min = 1))]
    #[serde(alias = "vibe", rename = "vibe")]
    pub vibe: String,
    #[serde(alias = "gluten_free", rename = "glutenFree", default)]
    pub gluten_free: bool,
    #[serde(default = "default_picky")]
    pub picky: bool,
    /// Free-text comma-separated terms, as typed into the form
    #[serde(default)]
    pub blacklist: String,
}

fn default_radius_m() -> u32 {
    1600
}

fn default_picky() -> bool {
    true
}
