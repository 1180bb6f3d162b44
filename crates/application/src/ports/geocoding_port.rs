//! Geocoding port
//!
//! Defines the interface for turning free-form place text into candidates.

use async_trait::async_trait;
use domain::PlaceCandidate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for place search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search candidates for a query, in the service's ranking order
    ///
    /// Queries below the minimum length yield an empty list without a
    /// network call.
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, ApplicationError>;

    /// Resolve a query to its best candidate, if any
    async fn resolve_one(&self, query: &str) -> Result<Option<PlaceCandidate>, ApplicationError> {
        Ok(self.search(query).await?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }

    #[tokio::test]
    async fn mock_search_returns_candidates() {
        let mut mock = MockGeocodingPort::new();
        mock.expect_search()
            .withf(|q| q == "Mysuru")
            .returning(|_| Ok(vec![PlaceCandidate::new("Mysuru", 12.2958, 76.6394)]));

        let results = mock.search("Mysuru").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Mysuru");
    }
}
