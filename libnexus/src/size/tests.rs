use super::*;
use crate::manifest::BlobDescriptor;

fn manifest(config: (&str, u64), layers: &[(&str, u64)]) -> ManifestDescriptor {
    ManifestDescriptor::new(
        BlobDescriptor::new(config.0, config.1),
        layers
            .iter()
            .map(|(digest, size)| BlobDescriptor::new(*digest, *size))
            .collect(),
    )
}

#[test]
fn test_size_table_first_seen_wins() {
    let mut table = SizeTable::new();
    assert!(table.insert("sha256:a", 100));
    assert!(table.insert("sha256:b", 50));
    assert!(!table.insert("sha256:a", 999));

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("sha256:a"), Some(100));
    assert_eq!(table.get("sha256:missing"), None);
    assert_eq!(table.total(), 150);

    let digests: Vec<&str> = table.iter().map(|e| e.digest.as_str()).collect();
    assert_eq!(digests, ["sha256:a", "sha256:b"]);
}

#[test]
fn test_aggregate_single_manifest() {
    let m = manifest(("sha256:cfg", 7), &[("sha256:l1", 100), ("sha256:l2", 20)]);
    let report = aggregate([&m]);

    assert_eq!(report.config_size, 7);
    assert_eq!(report.total_layer_size, 120);
    assert_eq!(report.total_size, 127);
    assert_eq!(report.layers.len(), 2);
}

#[test]
fn test_aggregate_same_manifest_twice() {
    let m = manifest(("sha256:cfg", 7), &[("sha256:l1", 100), ("sha256:l2", 20)]);
    let once = aggregate([&m]);
    let twice = aggregate([&m, &m]);

    assert_eq!(twice.total_layer_size, once.total_layer_size);
    assert_eq!(twice.config_size, once.config_size * 2);
    assert_eq!(twice.layers, once.layers);
}

#[test]
fn test_aggregate_dedups_shared_layers_across_tags() {
    let v1 = manifest(("sha256:c1", 5), &[("sha256:base", 1000), ("sha256:app1", 10)]);
    let v2 = manifest(("sha256:c2", 6), &[("sha256:base", 1000), ("sha256:app2", 12)]);

    let mut aggregator = LayerAggregator::new();
    aggregator.add(&v1);
    aggregator.add(&v2);
    assert_eq!(aggregator.manifest_count(), 2);

    let report = aggregator.finish();
    assert_eq!(report.config_size, 11);
    assert_eq!(report.total_layer_size, 1022);
    assert_eq!(report.total_size, 1033);

    let digests: Vec<&str> = report.layers.iter().map(|l| l.digest.as_str()).collect();
    assert_eq!(digests, ["sha256:base", "sha256:app1", "sha256:app2"]);
}

#[test]
fn test_aggregate_keeps_first_size_for_digest() {
    let first = manifest(("sha256:c", 1), &[("sha256:x", 10)]);
    let second = manifest(("sha256:c", 1), &[("sha256:x", 99)]);

    let report = aggregate([&first, &second]);
    assert_eq!(report.layers[0].size, 10);
    assert_eq!(report.total_layer_size, 10);
}

#[test]
fn test_aggregate_nothing() {
    let report = aggregate(std::iter::empty());
    assert_eq!(report, SizeReport::default());
}

#[test]
fn test_image_total_size_counts_shared_layers_per_tag() {
    let v1 = manifest(("sha256:c1", 5), &[("sha256:base", 1000), ("sha256:app1", 10)]);
    let v2 = manifest(("sha256:c2", 6), &[("sha256:base", 1000), ("sha256:app2", 12)]);

    assert_eq!(image_total_size([&v1, &v2]), 2022);
}

#[test]
fn test_image_total_size_dedups_within_a_tag() {
    let m = manifest(("sha256:c", 5), &[("sha256:x", 10), ("sha256:x", 10)]);
    assert_eq!(image_total_size([&m]), 10);
}
