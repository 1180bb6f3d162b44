//! Geocoding adapter - Implements GeocodingPort using integration_osm

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::PlaceCandidate;
use integration_osm::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
use tracing::{debug, instrument};

/// Adapter for place search using the Nominatim API
pub struct NominatimGeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl std::fmt::Debug for NominatimGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocodingAdapter")
            .field("client", &"NominatimGeocodingClient")
            .finish()
    }
}

impl NominatimGeocodingAdapter {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: NominatimGeocodingClient) -> Self {
        Self { client }
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config).map_err(Self::map_error)?;
        Ok(Self::new(client))
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ConnectionFailed(e) | GeocodingError::RequestFailed(e) => {
                ApplicationError::GeocodingFailed(e)
            },
            GeocodingError::Timeout => ApplicationError::GeocodingFailed(err.to_string()),
            GeocodingError::ParseError(e) => ApplicationError::InvalidResponse(e),
            GeocodingError::ConfigurationError(e) => ApplicationError::Configuration(e),
        }
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, ApplicationError> {
        let result = self.client.search(query).await.map_err(Self::map_error);

        match &result {
            Ok(candidates) => debug!(count = candidates.len(), "Place search completed"),
            Err(e) => debug!(error = %e, "Place search failed"),
        }

        result
    }

    #[instrument(skip(self))]
    async fn resolve_one(&self, query: &str) -> Result<Option<PlaceCandidate>, ApplicationError> {
        self.client.resolve_one(query).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_become_geocoding_failed() {
        let err = NominatimGeocodingAdapter::map_error(GeocodingError::ConnectionFailed(
            "dns error".into(),
        ));
        assert!(matches!(err, ApplicationError::GeocodingFailed(ref m) if m == "dns error"));

        let err = NominatimGeocodingAdapter::map_error(GeocodingError::RequestFailed(
            "HTTP 503".into(),
        ));
        assert!(err.is_transport());

        let err = NominatimGeocodingAdapter::map_error(GeocodingError::Timeout);
        assert!(err.is_transport());
    }

    #[test]
    fn parse_errors_are_invalid_response() {
        let err = NominatimGeocodingAdapter::map_error(GeocodingError::ParseError("eof".into()));
        assert!(matches!(err, ApplicationError::InvalidResponse(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = NominatimConfig {
            timeout_secs: 0,
            ..NominatimConfig::for_testing()
        };
        assert!(matches!(
            NominatimGeocodingAdapter::with_config(&config),
            Err(ApplicationError::Configuration(_))
        ));
    }

    #[test]
    fn debug_hides_client() {
        let adapter =
            NominatimGeocodingAdapter::with_config(&NominatimConfig::for_testing()).unwrap();
        assert!(format!("{adapter:?}").contains("NominatimGeocodingAdapter"));
    }
}
