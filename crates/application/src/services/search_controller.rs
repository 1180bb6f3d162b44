//! Debounced place search
//!
//! Turns keystrokes in a place field into at most one geocoding request per
//! pause in typing. Every text change bumps a generation counter; a result
//! is applied only while its generation is still the latest, so a slow
//! response to an old query never overwrites a newer one.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use domain::PlaceCandidate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::ports::GeocodingPort;

/// Debounce settings for place search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before searching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Trimmed queries shorter than this clear the suggestions instead
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

const fn default_debounce_ms() -> u64 {
    350
}

const fn default_min_query_len() -> usize {
    2
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl SearchConfig {
    /// Debounce window as a duration
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_query_len == 0 {
            return Err("search.min_query_len must be at least 1".to_string());
        }
        if self.debounce_ms > 10_000 {
            return Err("search.debounce_ms must not exceed 10000".to_string());
        }
        Ok(())
    }
}

/// What the suggestion list currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text as last typed
    pub query: String,
    /// Candidates for the latest applied query
    pub suggestions: Vec<PlaceCandidate>,
    /// A search for the current query is running
    pub loading: bool,
}

/// Debounced, last-request-wins place search for one input field
pub struct SearchController {
    geocoder: Arc<dyn GeocodingPort>,
    config: SearchConfig,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<SearchState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for SearchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchController")
            .field("config", &self.config)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SearchController {
    /// Create a controller searching through the given port
    pub fn new(geocoder: Arc<dyn GeocodingPort>, config: SearchConfig) -> Self {
        Self {
            geocoder,
            config,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(SearchState::default())),
            pending: Mutex::new(None),
        }
    }

    /// React to a change of the field's text
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn on_text_changed(&self, text: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_pending();

        let query = text.trim().to_string();
        let searchable = query.chars().count() >= self.config.min_query_len.max(1);
        {
            let mut state = self.state.lock();
            state.query = text.to_string();
            if !searchable {
                state.suggestions.clear();
                state.loading = false;
            }
        }

        if !searchable {
            debug!(generation, "Query too short, suggestions cleared");
            return;
        }

        let task = DebouncedSearch {
            geocoder: Arc::clone(&self.geocoder),
            latest: Arc::clone(&self.generation),
            state: Arc::clone(&self.state),
            generation,
            query,
            window: self.config.debounce(),
        };
        *self.pending.lock() = Some(tokio::spawn(task.run()));
    }

    /// Current suggestion list
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.state.lock().clone()
    }

    /// Choose a suggestion; the list is cleared and the field takes its label
    pub fn pick(&self, index: usize) -> Option<PlaceCandidate> {
        let mut state = self.state.lock();
        let candidate = state.suggestions.get(index).cloned()?;

        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_pending();

        state.query.clone_from(&candidate.label);
        state.suggestions.clear();
        state.loading = false;
        Some(candidate)
    }

    /// Wait until the pending search, if any, has finished or was superseded
    pub async fn settle(&self) {
        let handle = self.pending.lock().take();
        if let Some(handle) = handle {
            // A cancelled task has nothing left to apply
            let _ = handle.await;
        }
    }

    fn abort_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

/// One scheduled search
struct DebouncedSearch {
    geocoder: Arc<dyn GeocodingPort>,
    latest: Arc<AtomicU64>,
    state: Arc<Mutex<SearchState>>,
    generation: u64,
    query: String,
    window: Duration,
}

impl DebouncedSearch {
    fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    async fn run(self) {
        tokio::time::sleep(self.window).await;
        if !self.is_current() {
            return;
        }

        self.state.lock().loading = true;
        debug!(generation = self.generation, query = %self.query, "Searching places");

        let suggestions = match self.geocoder.search(&self.query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, query = %self.query, "Place search failed");
                Vec::new()
            },
        };

        let mut state = self.state.lock();
        if self.is_current() {
            debug!(generation = self.generation, count = suggestions.len(), "Suggestions updated");
            state.suggestions = suggestions;
            state.loading = false;
        } else {
            debug!(generation = self.generation, "Discarding stale suggestions");
        }
    }
}
