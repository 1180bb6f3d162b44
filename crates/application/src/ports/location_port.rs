//! Device location port

use async_trait::async_trait;
use domain::GeoPoint;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the device's current position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// Current position of the device
    ///
    /// Fails with [`ApplicationError::LocationPermissionDenied`] when the
    /// position is not available to the application.
    async fn current_position(&self) -> Result<GeoPoint, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reports_denied_permission() {
        let mut mock = MockLocationPort::new();
        mock.expect_current_position()
            .returning(|| Err(ApplicationError::LocationPermissionDenied));

        let result = tokio_test::block_on(mock.current_position());
        assert!(matches!(result, Err(ApplicationError::LocationPermissionDenied)));
    }

    #[test]
    fn mock_returns_position() {
        let mut mock = MockLocationPort::new();
        mock.expect_current_position()
            .returning(|| Ok(GeoPoint::bengaluru()));

        let position = tokio_test::block_on(mock.current_position()).unwrap();
        assert_eq!(position, GeoPoint::bengaluru());
    }
}
