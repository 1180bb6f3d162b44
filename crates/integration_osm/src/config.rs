//! Routing service configuration

use domain::TravelProfile;
use serde::{Deserialize, Serialize};

/// User agent sent to OpenStreetMap services (required by their usage policies)
pub const DEFAULT_USER_AGENT: &str = "Wayfinder/0.1";

/// Encoding requested for route geometries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFormat {
    /// GeoJSON `LineString` with `[lon, lat]` coordinate pairs
    #[default]
    GeoJson,
    /// Encoded polyline with precision 5
    Polyline,
}

impl GeometryFormat {
    /// Value of the `geometries` query parameter
    #[must_use]
    pub const fn as_query_value(&self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Polyline => "polyline",
        }
    }
}

/// Configuration for the OSRM routing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL for the OSRM HTTP API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Geometry encoding requested from the service
    #[serde(default)]
    pub geometry_format: GeometryFormat,

    /// Profile used when the caller does not pick one
    #[serde(default)]
    pub default_profile: TravelProfile,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            geometry_format: GeometryFormat::default(),
            default_profile: TravelProfile::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}
