use crate::config::CatalogSettings;
use crate::core::{pick_random, FilterOutcome, SpotFilter};
use crate::models::{
    ErrorResponse, HealthResponse, OptionsResponse, PickSpotResponse, SearchCriteria,
    SearchSpotsRequest, SearchSpotsResponse, RADIUS_OPTIONS_M, RATING_FLOORS,
};
use crate::services::{PhotoValidator, PlacesClient, PlacesError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub places: Arc<PlacesClient>,
    /// Photo probe capability; None when disabled in configuration
    pub photos: Option<Arc<PhotoValidator>>,
    pub filter: SpotFilter,
    pub catalog: CatalogSettings,
}

/// Failure of a pipeline run, pattern-matched into an HTTP response
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("location lookup failed: {0}")]
    Location(String),

    #[error(transparent)]
    Provider(#[from] PlacesError),
}

/// Configure all spot-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/spots/search", web::post().to(search_spots))
        .route("/spots/pick", web::post().to(pick_spot))
        .route("/spots/options", web::get().to(spot_options));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Form catalog endpoint
///
/// GET /api/v1/spots/options
///
/// Publishes the tables the engine validates against so the presentation
/// layer renders its form from the same data.
async fn spot_options(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(OptionsResponse {
        vibes: state.catalog.vibes.clone(),
        radius_options_m: RADIUS_OPTIONS_M.to_vec(),
        rating_floors: RATING_FLOORS.to_vec(),
    })
}

/// Spot search endpoint
///
/// POST /api/v1/spots/search
///
/// Request body:
/// ```json
/// {
///   "postalCode": "77494",
///   "radiusM": 8000,
///   "minRating": 4.0,
///   "vibe": "Brunch Spot",
///   "glutenFree": false,
///   "picky": true,
///   "blacklist": "denny's, ihop"
/// }
/// ```
async fn search_spots(
    state: web::Data<AppState>,
    req: web::Json<SearchSpotsRequest>,
) -> impl Responder {
    let criteria = match validate_and_build(&state, &req) {
        Ok(criteria) => criteria,
        Err(body) => return HttpResponse::BadRequest().json(body),
    };

    tracing::info!(
        "Searching spots near {} (radius {} m, vibe '{}')",
        criteria.postal_code,
        criteria.radius_m,
        criteria.vibe.label
    );

    let outcome = match run_search(&state, &criteria).await {
        Ok(outcome) => outcome,
        Err(error) => return search_error_response(&error),
    };

    tracing::info!(
        "Returning {} spots near {} (from {} candidates)",
        outcome.spots.len(),
        criteria.postal_code,
        outcome.total_candidates
    );

    let message = if outcome.spots.is_empty() {
        Some(no_matches_message(&criteria))
    } else {
        None
    };

    HttpResponse::Ok().json(SearchSpotsResponse {
        spots: outcome.spots,
        total_candidates: outcome.total_candidates,
        message,
    })
}

/// Random pick endpoint
///
/// POST /api/v1/spots/pick
///
/// Same request body as the search endpoint; returns one spot chosen
/// uniformly at random from the filtered result set.
async fn pick_spot(
    state: web::Data<AppState>,
    req: web::Json<SearchSpotsRequest>,
) -> impl Responder {
    let criteria = match validate_and_build(&state, &req) {
        Ok(criteria) => criteria,
        Err(body) => return HttpResponse::BadRequest().json(body),
    };

    tracing::info!(
        "Picking a spot near {} (radius {} m, vibe '{}')",
        criteria.postal_code,
        criteria.radius_m,
        criteria.vibe.label
    );

    let outcome = match run_search(&state, &criteria).await {
        Ok(outcome) => outcome,
        Err(error) => return search_error_response(&error),
    };

    // The no-matches outcome is checked here, before random selection
    if outcome.spots.is_empty() {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "no_matches".to_string(),
            message: no_matches_message(&criteria),
            status_code: 404,
        });
    }

    match pick_random(&outcome.spots) {
        Ok(spot) => HttpResponse::Ok().json(PickSpotResponse {
            spot: spot.clone(),
            total_candidates: outcome.total_candidates,
        }),
        Err(error) => {
            tracing::error!("Random pick failed: {}", error);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "selection_failed".to_string(),
                message: error.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Validate the request DTO and assemble immutable search criteria
fn validate_and_build(
    state: &AppState,
    req: &SearchSpotsRequest,
) -> Result<SearchCriteria, ErrorResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for spot search request: {:?}", errors);
        return Err(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if !RADIUS_OPTIONS_M.contains(&req.radius_m) {
        return Err(ErrorResponse {
            error: "invalid_radius".to_string(),
            message: format!(
                "Radius must be one of {:?} meters, got {}",
                RADIUS_OPTIONS_M, req.radius_m
            ),
            status_code: 400,
        });
    }

    let vibe = match state.catalog.find_vibe(&req.vibe) {
        Some(vibe) => vibe.clone(),
        None => {
            return Err(ErrorResponse {
                error: "unknown_vibe".to_string(),
                message: format!("Unknown vibe: {}", req.vibe),
                status_code: 400,
            });
        }
    };

    Ok(SearchCriteria {
        postal_code: req.postal_code.trim().to_string(),
        radius_m: req.radius_m,
        min_rating: req.min_rating,
        vibe,
        gluten_free: req.gluten_free,
        picky: req.picky,
        blacklist: SearchCriteria::normalize_blacklist(&req.blacklist),
    })
}

/// Run the full pipeline: geocode, nearby search, filter, photo probe
///
/// Returns an explicit error for the presentation layer to pattern-match;
/// an empty outcome is not an error.
pub async fn run_search(
    state: &AppState,
    criteria: &SearchCriteria,
) -> Result<FilterOutcome, SearchError> {
    let coords = state
        .places
        .geocode(&criteria.postal_code)
        .await
        .map_err(|error| match error {
            PlacesError::Geocoding(message) => SearchError::Location(message),
            other => SearchError::Provider(other),
        })?;

    let keyword = criteria.vibe.search_keyword(criteria.gluten_free);

    let candidates = state
        .places
        .nearby_search(
            coords,
            criteria.radius_m,
            criteria.vibe.place_type.as_deref(),
            keyword.as_deref(),
        )
        .await?;

    tracing::debug!(
        "Found {} candidates near {}",
        candidates.len(),
        criteria.postal_code
    );

    let mut outcome = state.filter.apply(criteria, candidates);

    // Best-effort photo probe, one blocking request per spot in rank
    // order. Failure only clears the photo, never drops the spot.
    if let Some(validator) = &state.photos {
        for spot in &mut outcome.spots {
            if let Some(url) = &spot.photo_url {
                if !validator.is_resolvable(url).await {
                    tracing::debug!("Dropping unresolvable photo for {}", spot.name);
                    spot.photo_url = None;
                }
            }
        }
    }

    Ok(outcome)
}

fn search_error_response(error: &SearchError) -> HttpResponse {
    match error {
        SearchError::Location(message) => {
            tracing::info!("Location resolution failed: {}", message);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "location_resolution_failed".to_string(),
                message: message.clone(),
                status_code: 400,
            })
        }
        SearchError::Provider(provider_error) => {
            tracing::error!("Places provider failed: {}", provider_error);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "places_provider_failed".to_string(),
                message: provider_error.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Advisory shown when filtering removed every candidate
fn no_matches_message(criteria: &SearchCriteria) -> String {
    let mut message = format!(
        "Couldn't find any {} places matching your criteria.",
        criteria.vibe.label.to_lowercase()
    );

    if criteria.gluten_free {
        message.push_str(" Finding good gluten-free options via search can be tricky!");
    }

    message.push_str(" Try lowering your standards or increasing your radius.");
    message
}
