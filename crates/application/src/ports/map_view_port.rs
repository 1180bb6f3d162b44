//! Map view port
//!
//! The map widget as seen by the route orchestrator: it can be fitted to a
//! path and recentred on its default region.

use domain::{EdgeInsets, GeoPoint};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Margin in screen points kept around a fitted route
pub const DEFAULT_FIT_EDGE_INSET: f64 = 40.0;

/// How a viewport fit is performed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Margin kept between the path and the viewport edges
    pub edge_insets: EdgeInsets,
    /// Animate the camera change
    pub animated: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            edge_insets: EdgeInsets::uniform(DEFAULT_FIT_EDGE_INSET),
            animated: true,
        }
    }
}

/// Port for the map viewport
#[cfg_attr(test, automock)]
pub trait MapViewPort: Send + Sync {
    /// Move the viewport so every coordinate is visible
    fn fit_to_coordinates(&self, path: &[GeoPoint], options: FitOptions);

    /// Return to the default region
    fn recenter_to_default(&self);
}
