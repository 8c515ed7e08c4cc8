//! libnexus - image management for Sonatype Nexus docker repositories
//!
//! libnexus lists, inspects and prunes container images stored in a docker
//! repository hosted by Nexus, through the Docker Registry v2 API that Nexus
//! serves under `{host}/repository/{name}/v2/`.
//!
//! # Quick Start
//!
//! ```no_run
//! use libnexus::{ComparisonStrategy, Config, DeleteRequest, Nexus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(std::path::Path::new(".credentials"))?;
//!     let nexus = Nexus::connect(&config)?;
//!
//!     // Keep the three newest release tags of an image
//!     let request = DeleteRequest {
//!         keep: Some(3),
//!         expressions: vec![r"^v\d".to_string()],
//!         ..Default::default()
//!     };
//!     let plan = nexus
//!         .plan_deletion("team/api", &request, false, ComparisonStrategy::Numeric)
//!         .await?;
//!     nexus
//!         .execute_deletion(&plan, |tag| println!("deleting {}", tag))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Nexus`] - Main entry point for image operations
//! - [`ExpressionSet`] - Include/exclude regex filter over names
//! - [`ComparisonStrategy`] - Tag ordering, numeric or semantic version
//! - [`RetentionPlan`] - Keep-N split of a sorted tag list
//! - [`SizeReport`] - Deduplicated layer sizes of one or more tags
//! - [`Config`] - Credentials file contents

#![warn(clippy::all)]

/// Returns the libnexus crate version.
///
/// # Examples
///
/// ```
/// let version = libnexus::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod nexus;
pub use nexus::{DeletionPlan, Nexus, NexusBuilder};

// Re-export commonly used types for convenience
pub use auth::Credentials;
pub use config::Config;
pub use error::{NexusError, Result};
pub use filter::ExpressionSet;
pub use manifest::{BlobDescriptor, ManifestDescriptor};
pub use registry::ImageRegistry;
pub use retention::{DeleteRequest, RetentionPlan};
pub use size::SizeReport;
pub use sort::ComparisonStrategy;

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod manifest;
pub mod registry;
pub mod retention;
pub mod size;
pub mod sort;
