use super::*;

#[test]
fn test_credentials_anonymous() {
    let creds = Credentials::anonymous();
    assert_eq!(creds, Credentials::Anonymous);
    assert_eq!(creds.to_header_value(), None);
}

#[test]
fn test_credentials_basic_header() {
    let creds = Credentials::basic("admin", "admin123");
    // base64("admin:admin123")
    assert_eq!(
        creds.to_header_value().as_deref(),
        Some("Basic YWRtaW46YWRtaW4xMjM=")
    );
}

#[test]
fn test_from_parts_empty_username_is_anonymous() {
    assert_eq!(Credentials::from_parts("", "secret"), Credentials::Anonymous);
    assert_eq!(
        Credentials::from_parts("user", "secret"),
        Credentials::basic("user", "secret")
    );
}

#[test]
fn test_debug_hides_password() {
    let creds = Credentials::basic("user", "hunter2");
    let debug = format!("{:?}", creds);
    assert!(debug.contains("user"));
    assert!(!debug.contains("hunter2"));
}
