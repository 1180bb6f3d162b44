//! Nominatim geocoding client
//!
//! Resolves free-form place queries to labelled coordinates using
//! the [Nominatim](https://nominatim.openstreetmap.org) search API (OpenStreetMap).
//!
//! The client neither caches nor rate-limits; callers throttle (see the
//! debounced search controller in the application layer).

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoPoint, PlaceCandidate};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::default_user_agent;

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of candidates per search
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Queries shorter than this (trimmed, in characters) never hit the network
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    10
}

const fn default_result_limit() -> u8 {
    5
}

const fn default_min_query_len() -> usize {
    2
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            result_limit: default_result_limit(),
            min_query_len: default_min_query_len(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
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

        if self.result_limit == 0 || self.result_limit > 50 {
            return Err("result_limit must be between 1 and 50".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,

    /// Invalid client configuration
    #[error("Geocoding configuration error: {0}")]
    ConfigurationError(String),
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search candidates for a free-form query, in the service's ranking order
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodingError>;

    /// Resolve a query to its best candidate
    async fn resolve_one(&self, query: &str) -> Result<Option<PlaceCandidate>, GeocodingError> {
        Ok(self.search(query).await?.into_iter().next())
    }
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        config
            .validate()
            .map_err(GeocodingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Whether a query is long enough to be sent
    fn is_searchable(&self, query: &str) -> bool {
        query.chars().count() >= self.config.min_query_len.max(1)
    }

    /// Convert raw results into candidates, keeping the service's order
    fn convert_results(results: Vec<NominatimResult>) -> Result<Vec<PlaceCandidate>, GeocodingError> {
        results
            .into_iter()
            .map(|result| {
                let latitude: f64 = result
                    .lat
                    .parse()
                    .map_err(|_| GeocodingError::ParseError("Invalid latitude".to_string()))?;
                let longitude: f64 = result
                    .lon
                    .parse()
                    .map_err(|_| GeocodingError::ParseError("Invalid longitude".to_string()))?;
                let point = GeoPoint::new(latitude, longitude)
                    .map_err(|e| GeocodingError::ParseError(e.to_string()))?;
                Ok(PlaceCandidate::new(
                    result.display_name.unwrap_or_default(),
                    point.latitude(),
                    point.longitude(),
                ))
            })
            .collect()
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodingError> {
        let query = query.trim();
        if !self.is_searchable(query) {
            debug!(%query, "Query too short, skipping geocoding");
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let params = [
            ("format", "json".to_string()),
            ("q", query.to_string()),
            ("limit", self.config.result_limit.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        debug!(%query, "Geocoding query");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let mut candidates = Self::convert_results(results)?;
        candidates.truncate(usize::from(self.config.result_limit));

        debug!(%query, count = candidates.len(), "Geocoded query");
        Ok(candidates)
    }
}

/// Raw Nominatim API response entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}
