//! Authentication handling for the Nexus registry.
//!
//! Nexus docker repositories accept HTTP Basic authentication. Requests are
//! sent anonymously when no username is configured.

#[cfg(test)]
mod tests;

/// Credentials for registry authentication.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No authentication (anonymous access)
    Anonymous,

    /// HTTP Basic authentication with username and password
    Basic {
        /// Username for authentication
        username: String,
        /// Password for authentication
        password: String,
    },
}

impl Credentials {
    /// Creates anonymous credentials.
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Creates Basic authentication credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::auth::Credentials;
    ///
    /// let creds = Credentials::basic("admin", "admin123");
    /// assert!(creds.to_header_value().is_some());
    /// ```
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds credentials from optional configuration values.
    ///
    /// An empty username means anonymous access.
    pub fn from_parts(username: &str, password: &str) -> Self {
        if username.is_empty() {
            Self::Anonymous
        } else {
            Self::basic(username, password)
        }
    }

    /// Returns the Authorization header value for these credentials.
    pub fn to_header_value(&self) -> Option<String> {
        match self {
            Self::Anonymous => None,
            Self::Basic { username, password } => {
                use base64::{Engine as _, engine::general_purpose};
                let credentials = format!("{}:{}", username, password);
                let encoded = general_purpose::STANDARD.encode(credentials);
                Some(format!("Basic {}", encoded))
            }
        }
    }
}

// Keep passwords out of debug output and logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"********")
                .finish(),
        }
    }
}
