mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::SpotFilter;
use routes::spots::AppState;
use services::{PhotoValidator, PlacesClient, PlacesEndpoints};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting spotfinder service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the places client; a missing credential blocks startup
    let endpoints = PlacesEndpoints {
        geocode_url: settings.google.geocode_url,
        search_url: settings.google.search_url,
        photo_url: settings.google.photo_url,
    };

    let places = Arc::new(
        PlacesClient::new(endpoints, settings.google.api_key, settings.photos.max_width)
            .unwrap_or_else(|e| {
                error!("Failed to initialize places client: {}", e);
                error!("Set GOOGLE_API_KEY (or SPOT_GOOGLE__API_KEY) and restart");
                panic!("Places client error: {}", e);
            }),
    );

    info!("Places client initialized");

    // Photo probe is an optional capability
    let photos = if settings.photos.validate {
        let timeout = Duration::from_secs(settings.photos.timeout_secs);
        match PhotoValidator::new(timeout) {
            Ok(validator) => {
                info!(
                    "Photo validation enabled (timeout: {}s)",
                    settings.photos.timeout_secs
                );
                Some(Arc::new(validator))
            }
            Err(e) => {
                error!("Failed to initialize photo validator ({}), photos pass through unvalidated", e);
                None
            }
        }
    } else {
        info!("Photo validation disabled, photos pass through unvalidated");
        None
    };

    // Initialize the filter pipeline with configured picky settings
    let filter = SpotFilter::new(settings.picky.clone());

    info!(
        "Filter pipeline initialized ({} picky exclusions, {} vibes)",
        settings.picky.exclude_types.len(),
        settings.catalog.vibes.len()
    );

    // Build application state
    let app_state = AppState {
        places,
        photos,
        filter,
        catalog: settings.catalog,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
