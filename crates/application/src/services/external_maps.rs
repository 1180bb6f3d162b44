//! External maps handoff
//!
//! Builds directions links understood by the platform maps applications.

use std::fmt;
use std::str::FromStr;

use domain::{DomainError, GeoPoint};
use serde::{Deserialize, Serialize};

/// Maps application that receives the handoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapsPlatform {
    /// Apple Maps
    Apple,
    /// Google Maps (web or app)
    Google,
}

impl MapsPlatform {
    /// Platform maps application of the running target
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Self::Apple
        } else {
            Self::Google
        }
    }

    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for MapsPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapsPlatform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apple" | "ios" => Ok(Self::Apple),
            "google" | "android" | "web" => Ok(Self::Google),
            other => Err(DomainError::ValidationError(format!(
                "unknown maps platform '{other}'"
            ))),
        }
    }
}

/// Build a driving directions link between two points
#[must_use]
pub fn directions_link(origin: GeoPoint, destination: GeoPoint, platform: MapsPlatform) -> String {
    let saddr = format!("{},{}", origin.latitude(), origin.longitude());
    let daddr = format!("{},{}", destination.latitude(), destination.longitude());
    match platform {
        MapsPlatform::Apple => format!("http://maps.apple.com/?saddr={saddr}&daddr={daddr}"),
        MapsPlatform::Google => format!(
            "https://www.google.com/maps/dir/?api=1&origin={saddr}&destination={daddr}&travelmode=driving"
        ),
    }
}
