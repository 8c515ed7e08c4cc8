use super::*;
use std::error::Error;

#[test]
fn test_network_error_display() {
    let err = NexusError::network("connection refused");
    assert!(matches!(err, NexusError::Network { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_network_with_source_keeps_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = NexusError::network_with_source("failed to connect", io_err);
    assert!(err.source().is_some());
}

#[test]
fn test_authentication_error_status() {
    let err = NexusError::authentication("invalid username or password", Some(401));
    assert!(err.to_string().contains("401"));
    assert!(err.to_string().contains("invalid username or password"));
}

#[test]
fn test_not_found_error_names_resource() {
    let err = NexusError::not_found("tag", "v1.0.0");
    assert!(err.to_string().contains("tag"));
    assert!(err.to_string().contains("v1.0.0"));
}

#[test]
fn test_server_error() {
    let err = NexusError::server("internal server error", 500);
    assert!(matches!(err, NexusError::Server { status_code: 500, .. }));
}

#[test]
fn test_validation_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid data");
    let err = NexusError::validation_with_source("invalid manifest", io_err);
    assert!(err.source().unwrap().to_string().contains("invalid data"));
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err = NexusError::config_with_source("failed to read", Some(".credentials"), io_err);

    match &err {
        NexusError::Config { path, .. } => assert_eq!(path.as_deref(), Some(".credentials")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.source().is_some());
}

#[test]
fn test_invalid_expression_message() {
    let regex_err = regex::Regex::new("(").unwrap_err();
    let err = NexusError::InvalidExpression {
        expression: "(".to_string(),
        source: regex_err,
    };
    assert!(err.to_string().contains("Invalid filter expression '('"));
    assert!(err.source().is_some());
}

#[test]
fn test_invalid_version_lists_tags() {
    let err = NexusError::InvalidVersion {
        tags: vec!["dev".to_string(), "v1".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Cannot sort by semantic version, invalid tags: dev, v1"
    );
}

#[test]
fn test_nothing_selected_message() {
    let err = NexusError::NothingSelected {
        image: "alpine".to_string(),
    };
    assert_eq!(err.to_string(), "No images selected for deletion in alpine");
}

#[test]
fn test_input_error_classification() {
    assert!(NexusError::usage("missing criteria").is_input_error());
    assert!(
        NexusError::InvalidVersion {
            tags: vec!["x".to_string()]
        }
        .is_input_error()
    );
    assert!(!NexusError::network("down").is_input_error());
    assert!(!NexusError::not_found("image", "alpine").is_input_error());
}
