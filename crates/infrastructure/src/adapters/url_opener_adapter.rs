//! URL opener adapter - Implements UrlOpenerPort by spawning the platform opener

use std::process::{Command, Stdio};

use application::error::ApplicationError;
use application::ports::UrlOpenerPort;
use tracing::{debug, instrument};

/// Opens links with a system command (`open`, `xdg-open`, `rundll32`)
///
/// The URL is always a single argument and never passes through a shell,
/// so `&` in query strings reaches the opener intact.
#[derive(Debug, Clone)]
pub struct CommandUrlOpener {
    program: String,
    leading_args: Vec<String>,
}

impl CommandUrlOpener {
    /// Use an explicit program; the URL is passed after `leading_args`
    #[must_use]
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// Opener of the running platform
    #[must_use]
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open", Vec::new())
        } else if cfg!(target_os = "windows") {
            Self::windows()
        } else {
            Self::new("xdg-open", Vec::new())
        }
    }

    fn windows() -> Self {
        Self::new("rundll32", vec!["url.dll,FileProtocolHandler".to_string()])
    }

    /// Program that will be spawned
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, url: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Default for CommandUrlOpener {
    fn default() -> Self {
        Self::native()
    }
}

impl UrlOpenerPort for CommandUrlOpener {
    #[instrument(skip(self))]
    fn open_url(&self, url: &str) -> Result<(), ApplicationError> {
        let mut child = self
            .command(url)
            .spawn()
            .map_err(|e| {
                ApplicationError::Internal(format!("Failed to spawn {}: {e}", self.program))
            })?;

        // Reap the opener in the background
        std::thread::spawn(move || child.wait());

        debug!(program = %self.program, "URL handed to opener");
        Ok(())
    }
}
