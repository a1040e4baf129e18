//! Tests for the auth module

use super::*;

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
    assert!(!auth.is_authenticated());
}

#[test]
fn test_bearer_auth() {
    let auth = Authenticator::new(AuthConfig::bearer("access-token"));
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer access-token"
    );
    assert!(auth.is_authenticated());
}

#[test]
fn test_api_key_header() {
    let auth = Authenticator::new(AuthConfig::api_key("X-API-Key", "test-key-123"));
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(built.headers().get("X-API-Key").unwrap(), "test-key-123");
}

#[test]
fn test_api_key_header_with_prefix() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        header_name: "Authorization".to_string(),
        prefix: Some("Token ".to_string()),
        value: "my-token".to_string(),
    });

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Token my-token"
    );
}

#[test]
fn test_auth_config_from_yaml() {
    let config: AuthConfig = serde_yaml::from_str("type: bearer\ntoken: abc").unwrap();
    assert_eq!(config, AuthConfig::bearer("abc"));

    let config: AuthConfig = serde_yaml::from_str("type: api_key\nvalue: k").unwrap();
    assert_eq!(config, AuthConfig::api_key("Authorization", "k"));

    let config: AuthConfig = serde_yaml::from_str("type: none").unwrap();
    assert_eq!(config, AuthConfig::None);
}

#[test]
fn test_auth_config_default() {
    assert!(matches!(AuthConfig::default(), AuthConfig::None));
}
