use super::*;
use tempfile::TempDir;

#[test]
fn test_validate_host_adds_scheme() {
    assert_eq!(
        validate_host("nexus.local:8081").unwrap(),
        "http://nexus.local:8081"
    );
}

#[test]
fn test_validate_host_keeps_https_and_path() {
    assert_eq!(
        validate_host("https://example.com/nexus/").unwrap(),
        "https://example.com/nexus"
    );
}

#[test]
fn test_validate_host_rejects_other_schemes() {
    let err = validate_host("ftp://example.com").unwrap_err();
    assert!(err.contains("Only 'http' and 'https'"));
}

#[test]
fn test_validate_host_rejects_empty() {
    assert!(validate_host("").is_err());
}

#[test]
fn test_build_config_requires_repository() {
    let err = build_config("http://nexus", " / ", "admin", "pw").unwrap_err();
    assert!(err.contains("Repository"));
}

#[test]
fn test_build_config_normalizes_values() {
    let config = build_config(" nexus:8081 ", "/docker/", " admin ", "s3cret ").unwrap();
    assert_eq!(config.nexus_host, "http://nexus:8081");
    assert_eq!(config.nexus_repository, "docker");
    assert_eq!(config.nexus_username, "admin");
    assert_eq!(config.nexus_password, "s3cret ");
}

#[test]
fn test_write_credentials_round_trips_through_loader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join(".credentials");
    let config = build_config("http://nexus:8081", "docker", "admin", "admin123").unwrap();

    write_credentials(&path, &config).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("# Nexus Credentials\n"));
    assert!(contents.contains("nexus_repository = \"docker\""));

    let loaded = Config::from_toml_str(&contents).unwrap();
    assert_eq!(loaded, config);
}

#[cfg(unix)]
#[test]
fn test_write_credentials_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".credentials");
    let config = build_config("http://nexus:8081", "docker", "admin", "admin123").unwrap();
    write_credentials(&path, &config).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_configure_args_skip_prompts() {
    let config = collect_config(ConfigureArgs {
        host: Some("nexus:8081".into()),
        repository: Some("docker".into()),
        username: Some("admin".into()),
        password: Some("admin123".into()),
    })
    .unwrap();
    assert_eq!(config.repository_url(), "http://nexus:8081/repository/docker");
}
