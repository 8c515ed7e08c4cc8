//! Credentials file configuration.
//!
//! The CLI reads the Nexus host, repository and account from a small TOML
//! file (`.credentials` by default). Values are layered: built-in defaults,
//! then the file, then `NEXUS_*` environment variables.

use crate::auth::Credentials;
use crate::error::{NexusError, Result};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;


/// Header written at the top of generated credentials files.
pub const CREDENTIALS_HEADER: &str = "# Nexus Credentials";

/// Prefix of environment variables overriding file values (`NEXUS_PASSWORD`, ...).
pub const ENV_PREFIX: &str = "NEXUS";

/// Connection settings for one Nexus docker repository.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Nexus instance, e.g. `https://nexus.example.com`
    #[serde(default)]
    pub nexus_host: String,

    #[serde(default)]
    pub nexus_username: String,

    #[serde(default)]
    pub nexus_password: String,

    /// Name of the docker repository inside Nexus
    #[serde(default)]
    pub nexus_repository: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nexus_host: String::new(),
            nexus_username: String::new(),
            nexus_password: String::new(),
            nexus_repository: String::new(),
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("nexus_host", &self.nexus_host)
            .field("nexus_username", &self.nexus_username)
            .field("nexus_password", &"********")
            .field("nexus_repository", &self.nexus_repository)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Creates a configuration from explicit values.
    pub fn new(
        host: impl Into<String>,
        repository: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            nexus_host: host.into(),
            nexus_username: username.into(),
            nexus_password: password.into(),
            nexus_repository: repository.into(),
            timeout: default_timeout(),
        }
    }

    /// Parses a `Config` from a TOML string without environment overrides.
    ///
    /// This function is primarily used for testing.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(s, FileFormat::Toml));
        Self::from_builder(builder, None)
    }

    /// Loads the credentials file at `path`, applying `NEXUS_*` overrides.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(
            path,
            Environment::with_prefix(ENV_PREFIX).keep_prefix(true),
        )
    }

    /// Loads the credentials file with a caller-supplied environment source.
    pub fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(NexusError::config(
                format!(
                    "Credentials file not found: {}. Run 'nexus configure' first",
                    display
                ),
                Some(display),
            ));
        }

        let builder = Self::defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .add_source(env);

        Self::from_builder(builder, Some(&display))
    }

    /// Checks that the settings needed to reach the registry are present.
    pub fn validate(&self) -> Result<()> {
        if self.nexus_host.trim().is_empty() {
            return Err(NexusError::config("nexus_host is not set", None));
        }
        if self.nexus_repository.trim().is_empty() {
            return Err(NexusError::config("nexus_repository is not set", None));
        }
        Ok(())
    }

    /// Returns the credentials to send with registry requests.
    pub fn credentials(&self) -> Credentials {
        Credentials::from_parts(&self.nexus_username, &self.nexus_password)
    }

    /// Base URL of the docker repository, e.g. `http://nexus:8081/repository/docker`.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::config::Config;
    ///
    /// let config = Config::new("http://nexus:8081/", "docker", "admin", "secret");
    /// assert_eq!(config.repository_url(), "http://nexus:8081/repository/docker");
    /// ```
    pub fn repository_url(&self) -> String {
        format!(
            "{}/repository/{}",
            self.nexus_host.trim().trim_end_matches('/'),
            self.nexus_repository.trim().trim_matches('/')
        )
    }

    /// Renders the configuration as a credentials file.
    pub fn to_file_contents(&self) -> Result<String> {
        let body = toml::to_string(self).map_err(|e| {
            NexusError::config_with_source("Failed to serialize credentials", None, e)
        })?;
        Ok(format!("{}\n{}", CREDENTIALS_HEADER, body))
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = ConfigRs::try_from(&Config::default()).map_err(|e| {
            NexusError::config_with_source("Failed to build default configuration", None, e)
        })?;
        Ok(ConfigRs::builder().add_source(defaults))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&str>,
    ) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                NexusError::config_with_source(
                    "Failed to read credentials file".to_string(),
                    path.map(str::to_string),
                    e,
                )
            })
    }
}
