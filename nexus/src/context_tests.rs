use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_explicit_path_wins() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join(".credentials");
    fs::write(&local, "").unwrap();

    let explicit = dir.path().join("other.toml");
    let resolved = resolve_credentials_path(Some(explicit.clone()), &local, None);
    assert_eq!(resolved, explicit);
}

#[test]
fn test_local_file_before_user_config() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join(".credentials");
    fs::write(&local, "").unwrap();

    let config_dir = dir.path().join("config");
    fs::create_dir_all(config_dir.join("nexus")).unwrap();
    fs::write(config_dir.join("nexus").join("credentials"), "").unwrap();

    let resolved = resolve_credentials_path(None, &local, Some(&config_dir));
    assert_eq!(resolved, local);
}

#[test]
fn test_user_config_when_no_local_file() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join(".credentials");
    let config_dir = dir.path().join("config");
    fs::create_dir_all(config_dir.join("nexus")).unwrap();
    fs::write(config_dir.join("nexus").join("credentials"), "").unwrap();

    let resolved = resolve_credentials_path(None, &local, Some(&config_dir));
    assert_eq!(resolved, config_dir.join("nexus").join("credentials"));
}

#[test]
fn test_falls_back_to_local_path() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join(".credentials");

    let resolved = resolve_credentials_path(None, &local, Some(dir.path()));
    assert_eq!(resolved, local);
}

#[test]
fn test_load_config_missing_file_mentions_configure() {
    let dir = TempDir::new().unwrap();
    let ctx = AppContext::build(
        ColorChoice::Never,
        Some(dir.path().join("missing.credentials")),
    );

    let err = ctx.load_config().unwrap_err();
    assert!(err.to_string().contains("nexus configure"));
}

#[test]
fn test_load_config_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".credentials");
    fs::write(
        &path,
        "nexus_host = \"http://nexus:8081\"\nnexus_repository = \"docker\"\n",
    )
    .unwrap();

    let ctx = AppContext::build(ColorChoice::Never, Some(path));
    let config = ctx.load_config().unwrap();
    assert_eq!(config.repository_url(), "http://nexus:8081/repository/docker");
}
