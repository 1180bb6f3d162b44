//! Application configuration
//!
//! Loaded from built-in defaults, an optional `config.toml` and environment
//! variables prefixed with `WAYFINDER_` (nested keys separated by `__`,
//! e.g. `WAYFINDER_ROUTING__BASE_URL`).

use std::fmt;
use std::path::Path;

use application::error::ApplicationError;
use application::ports::FitOptions;
use application::services::SearchConfig;
use domain::{EdgeInsets, GeoPoint, MapRegion};
use integration_osm::{DEFAULT_USER_AGENT, NominatimConfig, OsrmConfig};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WAYFINDER";

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {s}. Use 'text' or 'json'")),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent sent to OpenStreetMap services unless a section overrides it
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Attribution line shown with map data
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Routing service configuration
    #[serde(default)]
    pub routing: OsrmConfig,

    /// Debounced search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Map viewport configuration
    #[serde(default)]
    pub map: MapConfig,

    /// Device location configuration
    #[serde(default)]
    pub location: LocationConfig,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            attribution: default_attribution(),
            log_format: LogFormat::default(),
            geocoding: NominatimConfig::default(),
            routing: OsrmConfig::default(),
            search: SearchConfig::default(),
            map: MapConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

/// Map viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Margin in points kept around a fitted route
    #[serde(default = "default_edge_inset")]
    pub edge_inset: f64,

    /// Viewport width in points
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,

    /// Viewport height in points
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,

    /// Latitude of the default region's center
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    /// Longitude of the default region's center
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,

    /// Span of the default region in degrees
    #[serde(default = "default_delta")]
    pub default_delta: f64,
}

const fn default_edge_inset() -> f64 {
    40.0
}

const fn default_viewport_width() -> f64 {
    390.0
}

const fn default_viewport_height() -> f64 {
    844.0
}

const fn default_latitude() -> f64 {
    12.9716
}

const fn default_longitude() -> f64 {
    77.5946
}

const fn default_delta() -> f64 {
    0.08
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            edge_inset: default_edge_inset(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            default_delta: default_delta(),
        }
    }
}

impl MapConfig {
    /// Region shown initially and after recentring
    #[must_use]
    pub const fn default_region(&self) -> MapRegion {
        MapRegion::new(
            GeoPoint::new_unchecked(self.default_latitude, self.default_longitude),
            self.default_delta,
            self.default_delta,
        )
    }

    /// How routes are fitted into the viewport
    #[must_use]
    pub const fn fit_options(&self) -> FitOptions {
        FitOptions {
            edge_insets: EdgeInsets::uniform(self.edge_inset),
            animated: true,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err("map viewport size must be positive".to_string());
        }
        if self.edge_inset < 0.0 {
            return Err("map.edge_inset must not be negative".to_string());
        }
        if self.edge_inset * 2.0 >= self.viewport_width.min(self.viewport_height) {
            return Err("map.edge_inset leaves no room for the route".to_string());
        }
        if !(self.default_delta > 0.0 && self.default_delta <= 180.0) {
            return Err("map.default_delta must be in (0, 180]".to_string());
        }
        GeoPoint::new(self.default_latitude, self.default_longitude)
            .map_err(|e| format!("map default center: {e}"))?;
        Ok(())
    }
}

/// Device location configuration
///
/// A terminal has no positioning hardware; the position used for
/// "current location" is configured here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Whether the configured position may be used
    #[serde(default)]
    pub enabled: bool,

    /// Latitude of the configured position
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude of the configured position
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// Configured position, `None` when location is disabled
    ///
    /// # Errors
    ///
    /// Returns an error if location is enabled without valid coordinates.
    pub fn position(&self) -> Result<Option<GeoPoint>, ApplicationError> {
        if !self.enabled {
            return Ok(None);
        }
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                Ok(Some(GeoPoint::new(latitude, longitude)?))
            },
            _ => Err(ApplicationError::Configuration(
                "location.enabled requires latitude and longitude".to_string(),
            )),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file, then environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(config::File::from(path));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config = builder
            // Override with environment variables (e.g., WAYFINDER_ROUTING__BASE_URL)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        Ok(app.with_shared_user_agent())
    }

    /// Propagate the top-level user agent into sections left at the default
    #[must_use]
    pub fn with_shared_user_agent(mut self) -> Self {
        if self.geocoding.user_agent == DEFAULT_USER_AGENT {
            self.geocoding.user_agent.clone_from(&self.user_agent);
        }
        if self.routing.user_agent == DEFAULT_USER_AGENT {
            self.routing.user_agent.clone_from(&self.user_agent);
        }
        self
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        self.geocoding
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        self.routing.validate().map_err(|e| format!("routing: {e}"))?;
        self.search.validate()?;
        self.map.validate()?;
        self.location
            .position()
            .map_err(|e| format!("location: {e}"))?;
        Ok(())
    }
}
