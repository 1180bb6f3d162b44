//! Headless map view - Implements MapViewPort without a rendering surface
//!
//! Tracks the region a real map widget would show, so the fitted viewport
//! can be printed by the CLI and asserted in tests.

use application::ports::{FitOptions, MapViewPort};
use domain::{GeoPoint, MapRegion};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::config::MapConfig;

/// Smallest span a fit may produce, about 100 m
const MIN_FIT_DELTA: f64 = 0.001;

#[derive(Debug, Clone, Copy)]
struct ViewState {
    region: MapRegion,
    fit_count: usize,
    animated: bool,
}

/// Map view that only keeps track of its visible region
#[derive(Debug)]
pub struct HeadlessMapView {
    default_region: MapRegion,
    viewport_width: f64,
    viewport_height: f64,
    state: Mutex<ViewState>,
}

impl HeadlessMapView {
    /// Create a view of the given size in points, showing `default_region`
    #[must_use]
    pub fn new(default_region: MapRegion, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            default_region,
            viewport_width,
            viewport_height,
            state: Mutex::new(ViewState {
                region: default_region,
                fit_count: 0,
                animated: false,
            }),
        }
    }

    /// Create from the `map` configuration section
    #[must_use]
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(
            config.default_region(),
            config.viewport_width,
            config.viewport_height,
        )
    }

    /// Region currently visible
    #[must_use]
    pub fn region(&self) -> MapRegion {
        self.state.lock().region
    }

    /// Number of fits performed so far
    #[must_use]
    pub fn fit_count(&self) -> usize {
        self.state.lock().fit_count
    }

    /// Whether the last camera change was animated
    #[must_use]
    pub fn last_change_animated(&self) -> bool {
        self.state.lock().animated
    }

    /// Region showing every point with the requested screen margins
    fn fitted_region(&self, path: &[GeoPoint], options: FitOptions) -> Option<MapRegion> {
        let bounds = MapRegion::bounding(path)?.with_minimum_delta(MIN_FIT_DELTA);

        let usable_width = (self.viewport_width - options.edge_insets.horizontal()).max(1.0);
        let usable_height = (self.viewport_height - options.edge_insets.vertical()).max(1.0);

        Some(bounds.padded(
            self.viewport_height / usable_height,
            self.viewport_width / usable_width,
        ))
    }
}

impl MapViewPort for HeadlessMapView {
    #[instrument(skip(self, path), fields(points = path.len()))]
    fn fit_to_coordinates(&self, path: &[GeoPoint], options: FitOptions) {
        let Some(region) = self.fitted_region(path, options) else {
            debug!("Empty path, viewport unchanged");
            return;
        };

        let mut state = self.state.lock();
        state.region = region;
        state.fit_count += 1;
        state.animated = options.animated;
        debug!(
            center = %region.center,
            lat_delta = region.latitude_delta,
            lon_delta = region.longitude_delta,
            "Viewport fitted"
        );
    }

    fn recenter_to_default(&self) {
        let mut state = self.state.lock();
        state.region = self.default_region;
        state.animated = true;
        debug!(center = %self.default_region.center, "Viewport recentred");
    }
}
