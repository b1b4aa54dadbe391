// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Coordinates, PickySettings, RankedSpot, SearchCriteria, Vibe, GLUTEN_FREE_TERM,
    MAP_SEARCH_URL, RADIUS_OPTIONS_M, RATING_FLOORS,
};
pub use requests::SearchSpotsRequest;
pub use responses::{
    ErrorResponse, HealthResponse, OptionsResponse, PickSpotResponse, SearchSpotsResponse,
};
