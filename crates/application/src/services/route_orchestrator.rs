//! Route orchestrator
//!
//! Owns the trip being planned and drives one route search at a time:
//! endpoint resolution, the routing request, committing the result and
//! fitting the map to it. Phase changes are broadcast to subscribers.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::{Endpoint, GeoPoint, PlaceCandidate, RouteResult, TravelProfile, TripState};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{FitOptions, GeocodingPort, LocationPort, MapViewPort, RoutingPort, UrlOpenerPort};
use crate::services::external_maps::{MapsPlatform, directions_link};

/// Text shown in the origin field when it holds the device position
pub const CURRENT_LOCATION_LABEL: &str = "Current location";

const PHASE_CHANNEL_CAPACITY: usize = 16;

/// Where a route search currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePhase {
    /// Nothing running
    #[default]
    Idle,
    /// Turning endpoint text into coordinates
    ResolvingEndpoints,
    /// Waiting for the routing service
    RequestingRoute,
    /// Last search committed a route
    Success,
    /// Last search failed; the route was cleared
    Failed,
}

impl RoutePhase {
    /// Whether a search is running
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::ResolvingEndpoints | Self::RequestingRoute)
    }
}

/// Alert content for a failed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNotice {
    /// Short headline
    pub title: String,
    /// Explanation for the user
    pub message: String,
}

impl UserNotice {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }

    /// Notice for a failed route search
    #[must_use]
    pub fn for_error(error: &ApplicationError) -> Self {
        match error {
            ApplicationError::MissingEndpoint => {
                Self::new("Missing place", "Please select valid From and To.")
            },
            ApplicationError::NoRouteFound => Self::new(
                "No route",
                "No route found between the selected points. Try different nearby points.",
            ),
            ApplicationError::RouteRequestFailed(_) | ApplicationError::GeocodingFailed(_) => {
                Self::new(
                    "Network error",
                    "Please check your internet connection and try again.",
                )
            },
            ApplicationError::LocationPermissionDenied => {
                Self::new("Location unavailable", error.to_string())
            },
            ApplicationError::Cancelled => {
                Self::new("Search cancelled", "The route search was cancelled.")
            },
            other => Self::new("Route error", other.to_string()),
        }
    }

    /// Notice for a maps handoff without both endpoints
    #[must_use]
    pub fn nothing_to_open() -> Self {
        Self::new("Nothing to open", "Set From and To first.")
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Keeps `loading` set for as long as it lives
struct LoadingGuard {
    trip: Arc<Mutex<TripState>>,
}

impl LoadingGuard {
    fn engage(trip: &Arc<Mutex<TripState>>) -> Self {
        trip.lock().loading = true;
        Self {
            trip: Arc::clone(trip),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.trip.lock().loading = false;
    }
}

/// Directions pipeline for a single trip
pub struct RouteOrchestrator {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
    map_view: Arc<dyn MapViewPort>,
    location: Option<Arc<dyn LocationPort>>,
    url_opener: Option<Arc<dyn UrlOpenerPort>>,
    trip: Arc<Mutex<TripState>>,
    profile: Mutex<TravelProfile>,
    phase: Mutex<RoutePhase>,
    phase_tx: broadcast::Sender<RoutePhase>,
    /// Bumped by `clear`; results of searches started before are dropped
    epoch: AtomicU64,
    fit_options: FitOptions,
}

impl fmt::Debug for RouteOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOrchestrator")
            .field("phase", &*self.phase.lock())
            .field("profile", &*self.profile.lock())
            .finish_non_exhaustive()
    }
}

impl RouteOrchestrator {
    /// Create an orchestrator over the required ports
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        router: Arc<dyn RoutingPort>,
        map_view: Arc<dyn MapViewPort>,
    ) -> Self {
        let (phase_tx, _) = broadcast::channel(PHASE_CHANNEL_CAPACITY);
        Self {
            geocoder,
            router,
            map_view,
            location: None,
            url_opener: None,
            trip: Arc::new(Mutex::new(TripState::default())),
            profile: Mutex::new(TravelProfile::default()),
            phase: Mutex::new(RoutePhase::Idle),
            phase_tx,
            epoch: AtomicU64::new(0),
            fit_options: FitOptions::default(),
        }
    }

    /// Use a device location provider
    #[must_use]
    pub fn with_location(mut self, location: Arc<dyn LocationPort>) -> Self {
        self.location = Some(location);
        self
    }

    /// Use a URL opener for the maps handoff
    #[must_use]
    pub fn with_url_opener(mut self, url_opener: Arc<dyn UrlOpenerPort>) -> Self {
        self.url_opener = Some(url_opener);
        self
    }

    /// Override how the map is fitted to a route
    #[must_use]
    pub const fn with_fit_options(mut self, fit_options: FitOptions) -> Self {
        self.fit_options = fit_options;
        self
    }

    /// Start with a travel profile other than the default
    #[must_use]
    pub fn with_profile(self, profile: TravelProfile) -> Self {
        *self.profile.lock() = profile;
        self
    }

    /// Receive every subsequent phase change
    pub fn subscribe(&self) -> broadcast::Receiver<RoutePhase> {
        self.phase_tx.subscribe()
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> RoutePhase {
        *self.phase.lock()
    }

    /// Copy of the trip state
    #[must_use]
    pub fn snapshot(&self) -> TripState {
        self.trip.lock().clone()
    }

    /// Travel profile used for routing
    #[must_use]
    pub fn profile(&self) -> TravelProfile {
        *self.profile.lock()
    }

    /// Change the travel profile; the current route stays until the next search
    pub fn set_profile(&self, profile: TravelProfile) {
        debug!(%profile, "Travel profile changed");
        *self.profile.lock() = profile;
    }

    /// Edit the origin text
    pub fn set_from_text(&self, text: impl Into<String>) {
        self.trip.lock().set_text(Endpoint::Origin, text);
    }

    /// Edit the destination text
    pub fn set_to_text(&self, text: impl Into<String>) {
        self.trip.lock().set_text(Endpoint::Destination, text);
    }

    /// Use a picked suggestion as origin
    pub fn pick_origin(&self, candidate: &PlaceCandidate) {
        self.pick(Endpoint::Origin, candidate);
    }

    /// Use a picked suggestion as destination
    pub fn pick_destination(&self, candidate: &PlaceCandidate) {
        self.pick(Endpoint::Destination, candidate);
    }

    fn pick(&self, endpoint: Endpoint, candidate: &PlaceCandidate) {
        debug!(endpoint = endpoint.label(), label = %candidate.label, "Endpoint picked");
        self.trip.lock().pick(endpoint, candidate);
    }

    /// Set the origin to the device's position
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::LocationPermissionDenied`] when no
    /// position is available.
    #[instrument(skip(self))]
    pub async fn use_current_location(&self) -> Result<GeoPoint, ApplicationError> {
        let location = self
            .location
            .as_ref()
            .ok_or(ApplicationError::LocationPermissionDenied)?;
        let position = location.current_position().await?;

        let mut trip = self.trip.lock();
        trip.set_point(Endpoint::Origin, position);
        trip.set_text(Endpoint::Origin, CURRENT_LOCATION_LABEL);
        info!(%position, "Origin set to current location");
        Ok(position)
    }

    /// Resolve both endpoints, fetch a route and fit the map to it
    ///
    /// On failure the previous route is cleared and the phase becomes
    /// [`RoutePhase::Failed`]; [`UserNotice::for_error`] turns the error
    /// into an alert.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingEndpoint`] if a side cannot be
    /// resolved, [`ApplicationError::Cancelled`] if the trip was cleared
    /// meanwhile, otherwise the classified geocoding or routing error.
    #[instrument(skip(self))]
    pub async fn find_route(&self) -> Result<RouteResult, ApplicationError> {
        let _loading = LoadingGuard::engage(&self.trip);
        let epoch = self.epoch.load(Ordering::SeqCst);

        let result = match self.acquire_route(epoch).await {
            Err(e) if self.epoch.load(Ordering::SeqCst) != epoch => {
                debug!(error = %e, "Route search cancelled by clear");
                Err(ApplicationError::Cancelled)
            },
            other => other,
        };
        match &result {
            Ok(route) => {
                info!(
                    points = route.path.len(),
                    distance_m = route.distance_meters,
                    duration_s = route.duration_seconds,
                    "Route found"
                );
            },
            Err(ApplicationError::Cancelled) => {},
            Err(e) => {
                warn!(error = %e, "Route search failed");
                self.trip.lock().route = None;
                self.set_phase(RoutePhase::Failed);
            },
        }
        result
    }

    async fn acquire_route(&self, epoch: u64) -> Result<RouteResult, ApplicationError> {
        self.set_phase(RoutePhase::ResolvingEndpoints);

        let (from_text, origin, to_text, destination) = {
            let trip = self.trip.lock();
            if !trip.has_input(Endpoint::Origin) || !trip.has_input(Endpoint::Destination) {
                return Err(ApplicationError::MissingEndpoint);
            }
            (
                trip.from_text.clone(),
                trip.origin,
                trip.to_text.clone(),
                trip.destination,
            )
        };

        let origin = self.resolve_endpoint(Endpoint::Origin, origin, &from_text).await?;
        let destination = self
            .resolve_endpoint(Endpoint::Destination, destination, &to_text)
            .await?;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            return Err(ApplicationError::Cancelled);
        }
        {
            let mut trip = self.trip.lock();
            trip.set_point(Endpoint::Origin, origin);
            trip.set_point(Endpoint::Destination, destination);
        }

        self.set_phase(RoutePhase::RequestingRoute);
        let profile = self.profile();
        let route = self.router.get_route(origin, destination, profile).await?;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            return Err(ApplicationError::Cancelled);
        }
        self.commit_route(&route);
        self.set_phase(RoutePhase::Success);
        Ok(route)
    }

    async fn resolve_endpoint(
        &self,
        endpoint: Endpoint,
        picked: Option<GeoPoint>,
        text: &str,
    ) -> Result<GeoPoint, ApplicationError> {
        if let Some(point) = picked {
            return Ok(point);
        }

        let query = text.trim();
        if query.is_empty() {
            return Err(ApplicationError::MissingEndpoint);
        }

        match self.geocoder.resolve_one(query).await? {
            Some(candidate) => {
                debug!(endpoint = endpoint.label(), label = %candidate.label, "Endpoint resolved");
                Ok(candidate.point())
            },
            None => {
                debug!(endpoint = endpoint.label(), %query, "Endpoint did not resolve");
                Err(ApplicationError::MissingEndpoint)
            },
        }
    }

    /// Store the route and fit the map once
    fn commit_route(&self, route: &RouteResult) {
        let both_endpoints = {
            let mut trip = self.trip.lock();
            trip.route = Some(route.clone());
            trip.has_both_endpoints()
        };

        if both_endpoints && route.has_drawable_path() {
            self.map_view
                .fit_to_coordinates(&route.path, self.fit_options);
        }
    }

    /// Alert content for an error returned by this orchestrator
    ///
    /// `None` for [`ApplicationError::Cancelled`]: a search abandoned by
    /// [`clear`](Self::clear) is not reported to the user.
    #[must_use]
    pub fn notice_for(&self, error: &ApplicationError) -> Option<UserNotice> {
        (!error.is_cancelled()).then(|| UserNotice::for_error(error))
    }

    /// Reset the trip and return to idle, even while a search is running
    ///
    /// A running `find_route` then returns [`ApplicationError::Cancelled`]
    /// without committing anything or changing the phase.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        {
            let mut trip = self.trip.lock();
            let loading = trip.loading;
            trip.clear();
            // The running search's guard owns the flag
            trip.loading = loading;
        }
        self.set_phase(RoutePhase::Idle);
        info!("Trip cleared");
    }

    /// Move the map back to its default region
    pub fn recenter(&self) {
        self.map_view.recenter_to_default();
    }

    /// Directions link for the current endpoints
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingEndpoint`] unless both endpoints are set.
    pub fn directions_link(&self, platform: MapsPlatform) -> Result<String, ApplicationError> {
        let trip = self.trip.lock();
        match (trip.origin, trip.destination) {
            (Some(origin), Some(destination)) => Ok(directions_link(origin, destination, platform)),
            _ => Err(ApplicationError::MissingEndpoint),
        }
    }

    /// Hand the trip to an external maps application
    ///
    /// Returns the link that was opened.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingEndpoint`] unless both endpoints are
    /// set, or [`ApplicationError::Configuration`] without a URL opener.
    #[instrument(skip(self))]
    pub fn open_in_maps(&self, platform: MapsPlatform) -> Result<String, ApplicationError> {
        let link = self.directions_link(platform)?;
        let opener = self
            .url_opener
            .as_ref()
            .ok_or_else(|| ApplicationError::Configuration("no URL opener available".to_string()))?;
        opener.open_url(&link)?;
        info!(%platform, "Opened directions in external maps");
        Ok(link)
    }

    fn set_phase(&self, phase: RoutePhase) {
        *self.phase.lock() = phase;
        debug!(?phase, "Route phase changed");
        // No subscribers is fine
        let _ = self.phase_tx.send(phase);
    }
}
