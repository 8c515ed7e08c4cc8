//! Application context that holds resolved settings
//!
//! The credentials file is located with the precedence:
//! 1. `--credentials` flag or `NEXUS_CREDENTIALS`
//! 2. `.credentials` in the working directory
//! 3. `nexus/credentials` under the user config directory
//!
//! When none of them exists the working directory path is used, so errors
//! and `nexus configure` point at `.credentials`.
//!
//! Once built, the context is passed as read-only throughout the application.

use crate::format::{self, ColorChoice, OutputFormatter};
use libnexus::{Config, Nexus};
use std::path::{Path, PathBuf};

/// Default credentials file name in the working directory
pub const CREDENTIALS_FILE: &str = ".credentials";

/// Application context with resolved settings and the output formatter
pub struct AppContext {
    /// Credentials file used by this invocation
    pub credentials_path: PathBuf,
    formatter: Box<dyn OutputFormatter>,
}

impl AppContext {
    /// Build context from CLI flags
    pub fn build(color: ColorChoice, credentials: Option<PathBuf>) -> Self {
        let credentials_path = resolve_credentials_path(
            credentials,
            Path::new(CREDENTIALS_FILE),
            dirs::config_dir().as_deref(),
        );
        tracing::debug!(path = %credentials_path.display(), %color, "credentials file");

        Self {
            credentials_path,
            formatter: format::create_formatter(color),
        }
    }

    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }

    /// Load and validate the credentials file
    pub fn load_config(&self) -> libnexus::Result<Config> {
        let config = Config::load(&self.credentials_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Connect to the repository named in the credentials file
    pub fn connect(&self) -> libnexus::Result<Nexus> {
        Nexus::connect(&self.load_config()?)
    }
}

/// Pick the credentials file for this invocation
pub fn resolve_credentials_path(
    explicit: Option<PathBuf>,
    local: &Path,
    config_dir: Option<&Path>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if local.exists() {
        return local.to_path_buf();
    }
    if let Some(dir) = config_dir {
        let user_file = dir.join("nexus").join("credentials");
        if user_file.exists() {
            return user_file;
        }
    }
    local.to_path_buf()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
