//! Registry operations.
//!
//! [`ImageRegistry`] is the seam between the image commands and the remote
//! Nexus repository. [`Registry`] implements it over the HTTP [`Client`];
//! tests substitute an in-memory implementation.

use crate::client::{Client, ClientConfig};
use crate::config::Config;
use crate::error::Result;
use crate::manifest::ManifestDescriptor;


/// Operations the image commands need from a registry.
#[allow(async_fn_in_trait)]
pub trait ImageRegistry {
    /// Names of every image in the repository, in registry order.
    async fn list_images(&self) -> Result<Vec<String>>;

    /// Tags of `image`, in registry order. An image without tags yields an
    /// empty list.
    async fn list_tags(&self, image: &str) -> Result<Vec<String>>;

    /// The manifest of `image:tag`.
    async fn image_manifest(&self, image: &str, tag: &str) -> Result<ManifestDescriptor>;

    /// Deletes `image:tag` from the repository.
    async fn delete_image_by_tag(&self, image: &str, tag: &str) -> Result<()>;
}

/// Nexus-backed [`ImageRegistry`].
#[derive(Debug, Clone)]
pub struct Registry {
    client: Client,
}

impl Registry {
    /// Creates a registry over an existing client.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::client::Client;
    /// use libnexus::registry::Registry;
    ///
    /// let client = Client::new("http://localhost:8081/repository/docker").unwrap();
    /// let registry = Registry::new(client);
    /// assert_eq!(registry.client().base_url(), "http://localhost:8081/repository/docker");
    /// ```
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a registry for the repository described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = Client::with_config(
            &config.repository_url(),
            ClientConfig::new().with_timeout(config.timeout),
        )?
        .with_credentials(config.credentials());

        Ok(Self::new(client))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl ImageRegistry for Registry {
    async fn list_images(&self) -> Result<Vec<String>> {
        self.client.fetch_catalog().await
    }

    async fn list_tags(&self, image: &str) -> Result<Vec<String>> {
        self.client.fetch_tags(image).await
    }

    async fn image_manifest(&self, image: &str, tag: &str) -> Result<ManifestDescriptor> {
        self.client.fetch_manifest(image, tag).await
    }

    /// Manifests can only be deleted by digest, so the tag is resolved first.
    async fn delete_image_by_tag(&self, image: &str, tag: &str) -> Result<()> {
        let digest = self.client.fetch_manifest_digest(image, tag).await?;
        tracing::debug!(image, tag, digest = %digest, "resolved manifest digest");
        self.client.delete_manifest(image, &digest).await
    }
}
