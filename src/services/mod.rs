// Service exports
pub mod photo;
pub mod places;

pub use photo::PhotoValidator;
pub use places::{PlacesClient, PlacesEndpoints, PlacesError};
