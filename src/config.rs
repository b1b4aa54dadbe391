use crate::models::{PickySettings, Vibe};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub google: GoogleSettings,
    #[serde(default)]
    pub picky: PickySettings,
    #[serde(default)]
    pub photos: PhotoSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Google Maps API endpoints and credential
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_photo_url")]
    pub photo_url: String,
    /// Usually supplied via GOOGLE_API_KEY rather than a config file
    #[serde(default)]
    pub api_key: String,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            geocode_url: default_geocode_url(),
            search_url: default_search_url(),
            photo_url: default_photo_url(),
            api_key: String::new(),
        }
    }
}

fn default_geocode_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_search_url() -> String {
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string()
}

fn default_photo_url() -> String {
    "https://maps.googleapis.com/maps/api/place/photo".to_string()
}

/// Photo probe capability
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSettings {
    #[serde(default = "default_validate")]
    pub validate: bool,
    #[serde(default = "default_photo_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_photo_max_width")]
    pub max_width: u32,
}

impl Default for PhotoSettings {
    fn default() -> Self {
        Self {
            validate: default_validate(),
            timeout_secs: default_photo_timeout_secs(),
            max_width: default_photo_max_width(),
        }
    }
}

fn default_validate() -> bool {
    true
}

fn default_photo_timeout_secs() -> u64 {
    5
}

fn default_photo_max_width() -> u32 {
    400
}

/// Vibe catalog offered to the presentation layer
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_vibes")]
    pub vibes: Vec<Vibe>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            vibes: default_vibes(),
        }
    }
}

impl CatalogSettings {
    /// Resolve a vibe by its display label
    pub fn find_vibe(&self, label: &str) -> Option<&Vibe> {
        self.vibes
            .iter()
            .find(|vibe| vibe.label.eq_ignore_ascii_case(label))
    }
}

fn vibe(label: &str, place_type: Option<&str>, keyword: Option<&str>) -> Vibe {
    Vibe {
        label: label.to_string(),
        place_type: place_type.map(|t| t.to_string()),
        keyword: keyword.map(|k| k.to_string()),
    }
}

fn default_vibes() -> Vec<Vibe> {
    vec![
        vibe("Restaurant (General)", Some("restaurant"), None),
        vibe("Brunch Spot", Some("restaurant"), Some("brunch")),
        vibe("Lunch Spot", Some("restaurant"), Some("lunch")),
        vibe("Dinner Spot", Some("restaurant"), Some("dinner")),
        vibe("Cafe / Coffee Shop", Some("cafe"), None),
        vibe("Bar / Pub", Some("bar"), None),
        vibe("Craft Beer Bar", Some("bar"), Some("craft beer")),
        vibe("Pizza Place", Some("meal_takeaway"), Some("pizza")),
        vibe("Mexican Restaurant", Some("restaurant"), Some("mexican food")),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SPOT_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SPOT_)
            // e.g., SPOT_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SPOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SPOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute credential overrides from the environment
///
/// The bare GOOGLE_API_KEY name wins over the prefixed form so the same
/// variable the provider documents can be dropped straight into a .env.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GOOGLE_API_KEY")
        .or_else(|_| env::var("SPOT_GOOGLE__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("google.api_key", api_key)?;
    }

    builder.build()
}
