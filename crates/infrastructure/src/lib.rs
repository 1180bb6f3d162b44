//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! OpenStreetMap clients, plus a headless map view, a configured location
//! provider, a command-based URL opener and configuration loading.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{AppConfig, LocationConfig, LogFormat, MapConfig};
