//! Layer size aggregation.
//!
//! Tags of one image usually share most of their layers. The aggregator
//! counts each layer digest once across all manifests it is fed, while config
//! blobs are counted once per manifest.

use crate::manifest::ManifestDescriptor;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[cfg(test)]
mod tests;

/// One row of a [`SizeTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSize {
    pub digest: String,
    pub size: u64,
}

/// Layer digest to size, first-seen wins, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeTable {
    entries: Vec<LayerSize>,
    index: HashMap<String, usize>,
}

impl SizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `size` for `digest` unless the digest is already present.
    ///
    /// Returns true if the digest was new.
    pub fn insert(&mut self, digest: &str, size: u64) -> bool {
        if self.index.contains_key(digest) {
            return false;
        }
        self.index.insert(digest.to_string(), self.entries.len());
        self.entries.push(LayerSize {
            digest: digest.to_string(),
            size,
        });
        true
    }

    pub fn get(&self, digest: &str) -> Option<u64> {
        self.index.get(digest).map(|&i| self.entries[i].size)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerSize> {
        self.entries.iter()
    }

    /// Sum of every recorded layer size.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }

    pub fn into_entries(self) -> Vec<LayerSize> {
        self.entries
    }
}

/// Sizes reported for one or more tags of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    /// Config blob sizes, summed once per manifest
    pub config_size: u64,
    /// Unique layers in first-seen order
    pub layers: Vec<LayerSize>,
    /// Sum of the unique layer sizes
    pub total_layer_size: u64,
    /// `config_size + total_layer_size`
    pub total_size: u64,
}

/// Accumulates manifests of one image into a [`SizeReport`].
#[derive(Debug, Default)]
pub struct LayerAggregator {
    config_size: u64,
    layers: SizeTable,
    manifests: usize,
}

impl LayerAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one tag's manifest.
    pub fn add(&mut self, manifest: &ManifestDescriptor) {
        self.manifests += 1;
        self.config_size += manifest.config.size;
        for layer in &manifest.layers {
            self.layers.insert(&layer.digest, layer.size);
        }
    }

    /// Number of manifests added so far.
    pub fn manifest_count(&self) -> usize {
        self.manifests
    }

    pub fn finish(self) -> SizeReport {
        let total_layer_size = self.layers.total();
        SizeReport {
            config_size: self.config_size,
            total_layer_size,
            total_size: self.config_size + total_layer_size,
            layers: self.layers.into_entries(),
        }
    }
}

/// Aggregates a set of manifests in one call.
///
/// # Examples
///
/// ```
/// use libnexus::manifest::{BlobDescriptor, ManifestDescriptor};
/// use libnexus::size::aggregate;
///
/// let manifest = ManifestDescriptor::new(
///     BlobDescriptor::new("sha256:cfg", 10),
///     vec![BlobDescriptor::new("sha256:base", 100)],
/// );
/// let report = aggregate([&manifest, &manifest]);
/// assert_eq!(report.config_size, 20);
/// assert_eq!(report.total_layer_size, 100);
/// assert_eq!(report.total_size, 120);
/// ```
pub fn aggregate<'a, I>(manifests: I) -> SizeReport
where
    I: IntoIterator<Item = &'a ManifestDescriptor>,
{
    let mut aggregator = LayerAggregator::new();
    for manifest in manifests {
        aggregator.add(manifest);
    }
    aggregator.finish()
}

/// Storage attributed to an image across all its tags.
///
/// Layers are deduplicated within each tag only, so a layer shared by two
/// tags counts twice. Config blobs are not included.
pub fn image_total_size<'a, I>(manifests: I) -> u64
where
    I: IntoIterator<Item = &'a ManifestDescriptor>,
{
    manifests
        .into_iter()
        .map(|manifest| {
            let mut seen = HashSet::new();
            manifest
                .layers
                .iter()
                .filter(|layer| seen.insert(layer.digest.as_str()))
                .map(|layer| layer.size)
                .sum::<u64>()
        })
        .sum()
}
