//! Static header authentication

use crate::config::TapConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Header carrying the application key
pub const APP_KEY_HEADER: &str = "X-App-Key";
/// Header carrying the user key
pub const USER_KEY_HEADER: &str = "X-User-Key";
/// Header carrying the account username
pub const USERNAME_HEADER: &str = "MccUsername";

/// Credentials sent with every API request
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    app_key: String,
    user_key: String,
    username: String,
}

impl AuthHeaders {
    /// Create auth headers from raw credentials
    pub fn new(
        app_key: impl Into<String>,
        user_key: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            user_key: user_key.into(),
            username: username.into(),
        }
    }

    /// Build auth headers from configuration
    pub fn from_config(config: &TapConfig) -> Result<Self> {
        if config.app_key.is_empty() {
            return Err(Error::missing_field("appKey"));
        }
        if config.user_key.is_empty() {
            return Err(Error::missing_field("userKey"));
        }
        if config.username.is_empty() {
            return Err(Error::missing_field("username"));
        }

        Ok(Self::new(
            config.app_key.clone(),
            config.user_key.clone(),
            config.username.clone(),
        ))
    }

    /// All headers an API request carries, including the JSON content headers
    pub fn to_header_map(&self) -> HashMap<String, String> {
        HashMap::from([
            (APP_KEY_HEADER.to_string(), self.app_key.clone()),
            (USER_KEY_HEADER.to_string(), self.user_key.clone()),
            (USERNAME_HEADER.to_string(), self.username.clone()),
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ])
    }

    /// The account username
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("app_key", &"***")
            .field("user_key", &"***")
            .field("username", &self.username)
            .finish()
    }
}
