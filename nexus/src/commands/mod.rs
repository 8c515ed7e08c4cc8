/// Credentials file setup
pub mod configure;

/// Image command handlers and output types
pub mod image;

/// Version command handlers
pub mod version;
