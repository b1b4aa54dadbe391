use crate::models::domain::{RankedSpot, Vibe};
use serde::{Deserialize, Serialize};

/// Response for the spot search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSpotsResponse {
    pub spots: Vec<RankedSpot>,
    /// Number of raw candidates the provider returned before filtering
    pub total_candidates: usize,
    /// Advisory text when no spot survived filtering
    pub message: Option<String>,
}

/// Response for the random pick endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickSpotResponse {
    pub spot: RankedSpot,
    pub total_candidates: usize,
}

/// Form catalog consumed by the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub vibes: Vec<Vibe>,
    pub radius_options_m: Vec<u32>,
    pub rating_floors: Vec<f64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
