//! URL opener port
//!
//! Hands a link to the platform (external maps application, browser).

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for opening external links, fire-and-forget
#[cfg_attr(test, automock)]
pub trait UrlOpenerPort: Send + Sync {
    /// Ask the platform to open a URL without waiting for it
    fn open_url(&self, url: &str) -> Result<(), ApplicationError>;
}
