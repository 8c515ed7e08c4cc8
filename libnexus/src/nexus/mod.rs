//! High-level API for libnexus.
//!
//! [`Nexus`] runs the image workflows of the CLI on top of an
//! [`ImageRegistry`]: list and filter images, filter and sort tags, report
//! layer sizes, and plan and execute retention deletes.
//!
//! # Examples
//!
//! ```no_run
//! use libnexus::{ComparisonStrategy, Config, ExpressionSet, Nexus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("http://localhost:8081", "docker", "admin", "admin123");
//!     let nexus = Nexus::connect(&config)?;
//!
//!     let filter = ExpressionSet::parse(&["^v"], false)?;
//!     let tags = nexus
//!         .list_tags("team/api", &filter, ComparisonStrategy::Semver)
//!         .await?;
//!     for tag in tags {
//!         println!("{}", tag);
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::auth::Credentials;
use crate::client::{Client, ClientConfig};
use crate::config::Config;
use crate::error::{NexusError, Result};
use crate::filter::ExpressionSet;
use crate::registry::{ImageRegistry, Registry};
use crate::retention::{
    DeleteMode, DeleteRequest, RetentionPlan, ensure_selected, select_for_deletion,
};
use crate::size::{LayerAggregator, SizeReport, image_total_size};
use crate::sort::{ComparisonStrategy, sort_tags};
use serde::Serialize;


/// Tags chosen for deletion from one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DeletionPlan {
    /// One explicitly named tag.
    Single { image: String, tag: String },
    /// The result of filtering, sorting and applying a keep count.
    Retention { image: String, plan: RetentionPlan },
}

impl DeletionPlan {
    pub fn image(&self) -> &str {
        match self {
            DeletionPlan::Single { image, .. } | DeletionPlan::Retention { image, .. } => image,
        }
    }

    /// Tags that will be deleted, in deletion order.
    pub fn tags_to_delete(&self) -> &[String] {
        match self {
            DeletionPlan::Single { tag, .. } => std::slice::from_ref(tag),
            DeletionPlan::Retention { plan, .. } => &plan.to_delete,
        }
    }

    /// The retention split, if the plan came from a keep policy.
    pub fn retention(&self) -> Option<&RetentionPlan> {
        match self {
            DeletionPlan::Single { .. } => None,
            DeletionPlan::Retention { plan, .. } => Some(plan),
        }
    }
}

/// High-level interface to one Nexus docker repository.
///
/// Every registry call is awaited in turn; nothing runs concurrently.
pub struct Nexus<R = Registry> {
    registry: R,
}

impl Nexus<Registry> {
    /// Connects to the repository described by a loaded credentials file.
    ///
    /// No request is sent until the first operation.
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::with_registry(Registry::from_config(config)?))
    }

    /// Create a builder for configuring a connection without a credentials file.
    pub fn builder() -> NexusBuilder {
        NexusBuilder::new()
    }
}

impl<R: ImageRegistry> Nexus<R> {
    /// Wraps any [`ImageRegistry`] implementation.
    pub fn with_registry(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Lists images whose names pass `filter`, in registry order.
    pub async fn list_images(&self, filter: &ExpressionSet) -> Result<Vec<String>> {
        let images = self.registry.list_images().await?;
        Ok(filter.filter(images))
    }

    /// Lists the tags of `image` that pass `filter`, sorted ascending.
    pub async fn list_tags(
        &self,
        image: &str,
        filter: &ExpressionSet,
        strategy: ComparisonStrategy,
    ) -> Result<Vec<String>> {
        let tags = self.registry.list_tags(image).await?;
        let mut tags = filter.filter(tags);
        sort_tags(&mut tags, strategy)?;
        Ok(tags)
    }

    /// Aggregates the sizes of one tag, or of every tag passing `filter` when
    /// `tag` is `None`.
    ///
    /// The filter is ignored when a tag is named.
    pub async fn image_info(
        &self,
        image: &str,
        tag: Option<&str>,
        filter: &ExpressionSet,
    ) -> Result<SizeReport> {
        let tags = match tag {
            Some(tag) => vec![tag.to_string()],
            None => filter.filter(self.registry.list_tags(image).await?),
        };

        let mut aggregator = LayerAggregator::new();
        for tag in &tags {
            let manifest = self.registry.image_manifest(image, tag).await?;
            aggregator.add(&manifest);
        }

        tracing::debug!(image, tags = aggregator.manifest_count(), "aggregated manifests");
        Ok(aggregator.finish())
    }

    /// Storage used by every tag of `image`, counting shared layers once per tag.
    pub async fn image_size(&self, image: &str) -> Result<u64> {
        let tags = self.registry.list_tags(image).await?;

        let mut manifests = Vec::with_capacity(tags.len());
        for tag in &tags {
            manifests.push(self.registry.image_manifest(image, tag).await?);
        }

        Ok(image_total_size(&manifests))
    }

    /// Decides which tags of `image` a delete request removes.
    ///
    /// The request and its expressions are validated before the registry is
    /// contacted. Nothing is deleted.
    ///
    /// # Errors
    ///
    /// [`NexusError::Usage`] when no criteria were given,
    /// [`NexusError::InvalidExpression`] for a malformed expression,
    /// [`NexusError::NothingSelected`] when the expressions match no tag and
    /// no keep count was given, and [`NexusError::InvalidVersion`] when a
    /// selected tag is not a semantic version under the semver strategy.
    pub async fn plan_deletion(
        &self,
        image: &str,
        request: &DeleteRequest,
        invert: bool,
        strategy: ComparisonStrategy,
    ) -> Result<DeletionPlan> {
        let (keep, keep_explicit) = match request.validate()? {
            DeleteMode::Single(tag) => {
                return Ok(DeletionPlan::Single {
                    image: image.to_string(),
                    tag,
                });
            }
            DeleteMode::Retention {
                keep,
                keep_explicit,
            } => (keep, keep_explicit),
        };
        let filter = ExpressionSet::parse(&request.expressions, invert)?;

        let tags = self.registry.list_tags(image).await?;
        let mut selected = filter.filter(tags);
        ensure_selected(image, &selected, keep_explicit)?;
        sort_tags(&mut selected, strategy)?;

        let plan = select_for_deletion(&selected, keep);
        tracing::debug!(
            image,
            delete = plan.to_delete.len(),
            keep = plan.to_keep.len(),
            "retention plan"
        );

        Ok(DeletionPlan::Retention {
            image: image.to_string(),
            plan,
        })
    }

    /// Deletes the tags of `plan` one by one, stopping at the first failure.
    ///
    /// `before_delete` is called with each tag right before its delete
    /// request. Returns the number of deleted tags.
    pub async fn execute_deletion<F>(
        &self,
        plan: &DeletionPlan,
        mut before_delete: F,
    ) -> Result<usize>
    where
        F: FnMut(&str),
    {
        let image = plan.image();
        let mut deleted = 0;

        for tag in plan.tags_to_delete() {
            before_delete(tag);
            self.registry.delete_image_by_tag(image, tag).await?;
            tracing::info!(image, tag = tag.as_str(), "deleted tag");
            deleted += 1;
        }

        Ok(deleted)
    }
}

/// Builder for a [`Nexus`] connection from explicit settings.
///
/// # Examples
///
/// ```
/// use libnexus::{Credentials, Nexus};
///
/// let nexus = Nexus::builder()
///     .repository_url("http://localhost:8081/repository/docker")
///     .credentials(Credentials::basic("admin", "admin123"))
///     .timeout(10)
///     .build()
///     .unwrap();
/// assert_eq!(
///     nexus.registry().client().base_url(),
///     "http://localhost:8081/repository/docker"
/// );
/// ```
#[derive(Debug, Default)]
pub struct NexusBuilder {
    repository_url: Option<String>,
    credentials: Option<Credentials>,
    client_config: ClientConfig,
}

impl NexusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repository URL, e.g. `http://nexus:8081/repository/docker`.
    pub fn repository_url(mut self, url: &str) -> Self {
        self.repository_url = Some(url.to_string());
        self
    }

    /// Set credentials for authentication.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.client_config = self.client_config.with_timeout(seconds);
        self
    }

    /// Build the `Nexus` instance.
    pub fn build(self) -> Result<Nexus> {
        let url = self
            .repository_url
            .ok_or_else(|| NexusError::validation("Repository URL is required"))?;

        let client = Client::with_config(&url, self.client_config)?
            .with_credentials(self.credentials.unwrap_or(Credentials::Anonymous));

        Ok(Nexus::with_registry(Registry::new(client)))
    }
}
