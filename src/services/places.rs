use crate::models::{Candidate, Coordinates};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the places provider
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("API credential is not configured")]
    MissingKey,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("location lookup failed: {0}")]
    Geocoding(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Endpoint URLs for the places provider
#[derive(Debug, Clone)]
pub struct PlacesEndpoints {
    pub geocode_url: String,
    pub search_url: String,
    pub photo_url: String,
}

/// Google Maps API client
///
/// Handles all communication with the places provider:
/// - Resolving postal codes to coordinates
/// - Querying nearby places
/// - Building photo resource URLs
pub struct PlacesClient {
    endpoints: PlacesEndpoints,
    api_key: String,
    photo_max_width: u32,
    client: Client,
}

impl PlacesClient {
    /// Create a new places client
    ///
    /// A missing credential is a fatal precondition: no pipeline run can
    /// start without one.
    pub fn new(
        endpoints: PlacesEndpoints,
        api_key: String,
        photo_max_width: u32,
    ) -> Result<Self, PlacesError> {
        if api_key.trim().is_empty() {
            return Err(PlacesError::MissingKey);
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            endpoints,
            api_key,
            photo_max_width,
            client,
        })
    }

    /// Resolve a postal code to geographic coordinates
    ///
    /// Succeeds only when the provider reports status "OK" with at least
    /// one result. Any other status carries the provider's error text and
    /// aborts the run; there is no retry.
    pub async fn geocode(&self, postal_code: &str) -> Result<Coordinates, PlacesError> {
        tracing::debug!("Geocoding postal code: {}", postal_code);

        let response = self
            .client
            .get(&self.endpoints.geocode_url)
            .query(&[("address", postal_code), ("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError(format!(
                "Geocoding request failed: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response.json().await?;

        if body.status != "OK" {
            let message = body.error_message.unwrap_or(body.status);
            return Err(PlacesError::Geocoding(message));
        }

        body.results
            .into_iter()
            .next()
            .map(|result| result.geometry.location)
            .ok_or_else(|| PlacesError::InvalidResponse("geocoding returned no results".into()))
    }

    /// Query the nearby-search endpoint around resolved coordinates
    ///
    /// `place_type` and `keyword` are included only when present. An
    /// empty result list is not an error. Only the first page is read;
    /// pagination tokens are ignored.
    pub async fn nearby_search(
        &self,
        coords: Coordinates,
        radius_m: u32,
        place_type: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let mut params: Vec<(&str, String)> = vec![
            ("location", format!("{},{}", coords.lat, coords.lng)),
            ("radius", radius_m.to_string()),
            ("key", self.api_key.clone()),
        ];

        if let Some(place_type) = place_type {
            params.push(("type", place_type.to_string()));
        }

        if let Some(keyword) = keyword {
            params.push(("keyword", keyword.to_string()));
        }

        let response = self
            .client
            .get(&self.endpoints.search_url)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError(format!(
                "Nearby search failed: {}",
                response.status()
            )));
        }

        let body: SearchResponse = response.json().await?;
        let total = body.results.len();

        // Records without a place_id can never carry a map link, so they
        // are skipped here rather than surfaced half-formed.
        let candidates: Vec<Candidate> = body
            .results
            .into_iter()
            .filter_map(|place| self.into_candidate(place))
            .collect();

        tracing::debug!(
            "Nearby search returned {} candidates ({} raw records)",
            candidates.len(),
            total
        );

        Ok(candidates)
    }

    fn into_candidate(&self, place: NearbyPlace) -> Option<Candidate> {
        let place_id = place.place_id?;

        let photo_url = place
            .photos
            .into_iter()
            .next()
            .and_then(|photo| photo.photo_reference)
            .map(|reference| self.photo_url(&reference));

        Some(Candidate {
            name: place.name,
            rating: place.rating,
            address: place
                .vicinity
                .unwrap_or_else(|| "Address unavailable".to_string()),
            tags: place.types,
            place_id,
            photo_url,
        })
    }

    /// Photo resource URL for a photo reference
    ///
    /// Fetching it redirects to the actual image binary.
    pub fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{}?maxwidth={}&photoreference={}&key={}",
            self.endpoints.photo_url,
            self.photo_max_width,
            urlencoding::encode(photo_reference),
            self.api_key,
        )
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<PhotoRef>,
}

fn default_name() -> String {
    "Unknown Spot".to_string()
}

#[derive(Debug, Deserialize)]
struct PhotoRef {
    #[serde(default)]
    photo_reference: Option<String>,
}
