//! Tests for the auth module

use super::*;
use crate::config::TapConfig;
use crate::error::Error;

#[test]
fn test_header_map_contains_credentials() {
    let auth = AuthHeaders::new("app-123", "user-456", "mcc@example.com");
    let headers = auth.to_header_map();

    assert_eq!(headers.get(APP_KEY_HEADER).unwrap(), "app-123");
    assert_eq!(headers.get(USER_KEY_HEADER).unwrap(), "user-456");
    assert_eq!(headers.get(USERNAME_HEADER).unwrap(), "mcc@example.com");
    assert_eq!(headers.get("Accept").unwrap(), "application/json");
    assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
}

#[test]
fn test_from_config() {
    let config = TapConfig {
        app_key: "a".to_string(),
        user_key: "u".to_string(),
        username: "n".to_string(),
        ..Default::default()
    };

    let auth = AuthHeaders::from_config(&config).unwrap();
    assert_eq!(auth, AuthHeaders::new("a", "u", "n"));
    assert_eq!(auth.username(), "n");
}

#[test]
fn test_from_config_missing_key() {
    let config = TapConfig {
        app_key: "a".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        AuthHeaders::from_config(&config),
        Err(Error::MissingConfigField { field }) if field == "userKey"
    ));
}

#[test]
fn test_debug_redacts_keys() {
    let auth = AuthHeaders::new("secret-app", "secret-user", "mcc");
    let debug = format!("{auth:?}");

    assert!(!debug.contains("secret-app"));
    assert!(!debug.contains("secret-user"));
    assert!(debug.contains("mcc"));
}
