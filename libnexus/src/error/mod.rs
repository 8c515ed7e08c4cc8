//! Error types for libnexus
//!
//! Every fallible operation in the crate returns [`NexusError`]. Registry
//! failures (network, authentication, missing resources) are kept apart from
//! input errors raised by the selection engine so the CLI can tell an
//! operator mistake from an unreachable registry.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for libnexus operations
#[derive(Error, Debug)]
pub enum NexusError {
    /// Network-related errors (connection, timeout, DNS)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication errors (401, 403)
    #[error("Authentication error (status: {status_code:?}): {message}")]
    Authentication {
        message: String,
        status_code: Option<u16>,
    },

    /// Resource not found errors (404)
    #[error("{resource_type} not found: {name}")]
    NotFound { resource_type: String, name: String },

    /// Server errors (500, 503)
    #[error("Server error (status: {status_code}): {message}")]
    Server { message: String, status_code: u16 },

    /// Validation errors (malformed manifest, unexpected response shape)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (unreadable credentials file, missing settings)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A filter expression did not compile as a regular expression
    #[error("Invalid filter expression '{expression}': {source}")]
    InvalidExpression {
        expression: String,
        #[source]
        source: regex::Error,
    },

    /// Tags that cannot be ordered as semantic versions
    #[error("Cannot sort by semantic version, invalid tags: {}", .tags.join(", "))]
    InvalidVersion { tags: Vec<String> },

    /// The command was invoked without enough selection criteria
    #[error("{message}")]
    Usage { message: String },

    /// Filtering left nothing to delete and no keep count was given
    #[error("No images selected for deletion in {image}")]
    NothingSelected { image: String },
}

/// Result type alias for libnexus operations
pub type Result<T> = std::result::Result<T, NexusError>;

impl NexusError {
    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::network("connection refused");
    /// assert!(matches!(err, NexusError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new authentication error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::authentication("invalid credentials", Some(401));
    /// assert!(matches!(err, NexusError::Authentication { .. }));
    /// ```
    pub fn authentication<S: Into<String>>(message: S, status_code: Option<u16>) -> Self {
        Self::Authentication {
            message: message.into(),
            status_code,
        }
    }

    /// Creates a new not found error.
    pub fn not_found<S: Into<String>>(resource_type: S, name: S) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Creates a new server error.
    pub fn server<S: Into<String>>(message: S, status_code: u16) -> Self {
        Self::Server {
            message: message.into(),
            status_code,
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::validation("invalid manifest format");
    /// assert!(matches!(err, NexusError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new validation error with a source error.
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new usage error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::usage("specify a tag or a keep count");
    /// assert_eq!(err.to_string(), "specify a tag or a keep count");
    /// ```
    pub fn usage<S: Into<String>>(message: S) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by operator input rather than the registry.
    ///
    /// Input errors are raised before any registry mutation takes place.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidExpression { .. }
                | Self::InvalidVersion { .. }
                | Self::Usage { .. }
                | Self::NothingSelected { .. }
        )
    }
}
