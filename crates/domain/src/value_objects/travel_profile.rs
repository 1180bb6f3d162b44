//! Travel profile value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Travel mode used when requesting a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    /// Car
    #[default]
    Driving,
    /// On foot
    Walking,
    /// Bicycle
    Cycling,
}

impl TravelProfile {
    /// All supported profiles
    pub const ALL: [Self; 3] = [Self::Driving, Self::Walking, Self::Cycling];

    /// Path segment used by routing services (`/route/v1/{profile}/...`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelProfile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "car" => Ok(Self::Driving),
            "walking" | "foot" => Ok(Self::Walking),
            "cycling" | "bike" => Ok(Self::Cycling),
            other => Err(DomainError::ValidationError(format!(
                "Unknown travel profile: {other}. Use driving, walking or cycling"
            ))),
        }
    }
}
