//! Location adapter - Implements LocationPort from configuration
//!
//! A terminal has no GPS; the "device" position is whatever the user
//! configured. Without one the provider answers like a denied permission.

use application::error::ApplicationError;
use application::ports::LocationPort;
use async_trait::async_trait;
use domain::GeoPoint;
use tracing::{debug, instrument};

use crate::config::LocationConfig;

/// Location provider answering with a fixed, configured position
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocationProvider {
    position: Option<GeoPoint>,
}

impl ConfiguredLocationProvider {
    /// Provider with a known position
    #[must_use]
    pub const fn new(position: GeoPoint) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Provider that never has a position
    #[must_use]
    pub const fn denied() -> Self {
        Self { position: None }
    }

    /// Create from the `location` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if configured coordinates are out of range.
    pub fn from_config(config: &LocationConfig) -> Result<Self, ApplicationError> {
        match config.position()? {
            Some(position) => Ok(Self::new(position)),
            None => Ok(Self::denied()),
        }
    }
}

#[async_trait]
impl LocationPort for ConfiguredLocationProvider {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<GeoPoint, ApplicationError> {
        let position = self
            .position
            .ok_or(ApplicationError::LocationPermissionDenied)?;
        debug!(%position, "Current position");
        Ok(position)
    }
}
