//! Application layer - Use cases and orchestration
//!
//! Contains the directions pipeline: debounced place search, route
//! acquisition and map synchronization, plus the ports adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
