//! Image manifest model.
//!
//! Only the blob digests and sizes of a manifest matter for size reporting,
//! so the registry response is parsed with `oci-spec` and reduced to a
//! [`ManifestDescriptor`].

use crate::error::{NexusError, Result};
use oci_spec::image::{Descriptor, ImageManifest};
use serde::{Deserialize, Serialize};


/// Media type requested when fetching manifests from Nexus.
pub const DOCKER_MANIFEST_V2: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// A content-addressed blob referenced by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobDescriptor {
    pub digest: String,
    pub size: u64,
}

impl BlobDescriptor {
    pub fn new(digest: impl Into<String>, size: u64) -> Self {
        Self {
            digest: digest.into(),
            size,
        }
    }
}

impl From<&Descriptor> for BlobDescriptor {
    fn from(descriptor: &Descriptor) -> Self {
        Self {
            digest: descriptor.digest().to_string(),
            size: descriptor.size(),
        }
    }
}

/// Config blob plus ordered layer blobs of one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDescriptor {
    pub config: BlobDescriptor,
    pub layers: Vec<BlobDescriptor>,
}

impl ManifestDescriptor {
    pub fn new(config: BlobDescriptor, layers: Vec<BlobDescriptor>) -> Self {
        Self { config, layers }
    }

    /// Parses a schema 2 image manifest.
    ///
    /// Manifest lists (multi-platform indexes) carry no layers of their own
    /// and are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| NexusError::validation_with_source("Failed to parse manifest JSON", e))?;

        let media_type = value
            .get("mediaType")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        if media_type.contains("index")
            || media_type.contains("list")
            || value.get("manifests").is_some()
        {
            return Err(NexusError::validation(
                "Manifest lists are not supported, expected a single image manifest",
            ));
        }

        let manifest: ImageManifest = serde_json::from_value(value).map_err(|e| {
            NexusError::validation_with_source("Failed to parse image manifest", e)
        })?;

        Ok(Self::from(&manifest))
    }

    /// Sum of the layer sizes as listed, without deduplication.
    pub fn layers_size(&self) -> u64 {
        self.layers.iter().map(|layer| layer.size).sum()
    }
}

impl From<&ImageManifest> for ManifestDescriptor {
    fn from(manifest: &ImageManifest) -> Self {
        Self {
            config: BlobDescriptor::from(manifest.config()),
            layers: manifest.layers().iter().map(BlobDescriptor::from).collect(),
        }
    }
}
