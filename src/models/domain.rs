use serde::{Deserialize, Serialize};

/// Base URL for the map link attached to every ranked spot
pub const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";

/// Search radii accepted by the service, in meters
pub const RADIUS_OPTIONS_M: [u32; 6] = [1600, 4800, 8000, 16000, 32000, 50000];

/// Rating floors offered to the presentation layer
pub const RATING_FLOORS: [f64; 4] = [3.0, 3.5, 4.0, 4.5];

/// Keyword term appended when a gluten-free search is requested
pub const GLUTEN_FREE_TERM: &str = "gluten free";

/// Geographic coordinates resolved from a postal code
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A named search preset binding a display label to provider search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vibe {
    pub label: String,
    #[serde(rename = "placeType", default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
}

impl Vibe {
    /// Final search keyword for this vibe, with the gluten-free term
    /// appended (or standing alone) when requested
    pub fn search_keyword(&self, gluten_free: bool) -> Option<String> {
        match (&self.keyword, gluten_free) {
            (Some(keyword), true) => Some(format!("{} {}", keyword, GLUTEN_FREE_TERM)),
            (Some(keyword), false) => Some(keyword.clone()),
            (None, true) => Some(GLUTEN_FREE_TERM.to_string()),
            (None, false) => None,
        }
    }
}

/// Immutable criteria for a single pipeline run
///
/// Fully determined before any network call is issued; never mutated
/// mid-pipeline and discarded once the run completes.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub postal_code: String,
    pub radius_m: u32,
    pub min_rating: Option<f64>,
    pub vibe: Vibe,
    pub gluten_free: bool,
    pub picky: bool,
    pub blacklist: Vec<String>,
}

impl SearchCriteria {
    /// Normalize a free-text comma-separated blacklist into trimmed
    /// lowercase terms, dropping empties
    pub fn normalize_blacklist(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect()
    }
}

/// One raw place record from the search provider, before filtering
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub rating: f64,
    pub address: String,
    pub tags: Vec<String>,
    pub place_id: String,
    pub photo_url: Option<String>,
}

impl Candidate {
    /// Map link derived purely from the place id
    pub fn map_url(&self) -> String {
        format!("{}&query_place_id={}", MAP_SEARCH_URL, self.place_id)
    }
}

/// A candidate that survived filtering, ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSpot {
    pub name: String,
    pub rating: f64,
    pub address: String,
    #[serde(rename = "placeId")]
    pub place_id: String,
    #[serde(rename = "mapUrl")]
    pub map_url: String,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

impl From<Candidate> for RankedSpot {
    fn from(candidate: Candidate) -> Self {
        let map_url = candidate.map_url();
        Self {
            name: candidate.name,
            rating: candidate.rating,
            address: candidate.address,
            place_id: candidate.place_id,
            map_url,
            photo_url: candidate.photo_url,
        }
    }
}

/// Picky-filter configuration
///
/// `exclude_types` are the provider category tags that get dropped;
/// `gate_types` are the vibe place types the filter applies to. An empty
/// gate list applies the filter to every vibe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickySettings {
    #[serde(default = "default_exclude_types")]
    pub exclude_types: Vec<String>,
    #[serde(default = "default_gate_types")]
    pub gate_types: Vec<String>,
}

impl Default for PickySettings {
    fn default() -> Self {
        Self {
            exclude_types: default_exclude_types(),
            gate_types: default_gate_types(),
        }
    }
}

fn default_exclude_types() -> Vec<String> {
    [
        "sushi_restaurant",
        "seafood_restaurant",
        "raw_bar",
        "vegetarian_restaurant",
        "vegan_restaurant",
        "thai_restaurant",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_gate_types() -> Vec<String> {
    ["restaurant", "meal_takeaway"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
