use crate::error::{ClientError, Result};
use crate::session::ROOM_TOKEN_KEY;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_MULTIPLAYER_BASE: &str = "/api/multiplayer";
pub const DEFAULT_LOGIN_PAGE: &str = "login.html";
pub const DEFAULT_USER_INFO_ELEMENT: &str = "user-info";

/// Client settings.
///
/// `room_token_key` is the storage key the room client reads its bearer token
/// from. It defaults to `token`, which is *not* the key the session store
/// writes (`authToken`); set it to `authToken` to make both agree.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub multiplayer_base: String,
    pub login_page: String,
    pub user_info_element: String,
    pub room_token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            multiplayer_base: DEFAULT_MULTIPLAYER_BASE.to_string(),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            user_info_element: DEFAULT_USER_INFO_ELEMENT.to_string(),
            room_token_key: ROOM_TOKEN_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `CHECKMATE_BASE_URL`, `CHECKMATE_LOGIN_PAGE`
    /// and `CHECKMATE_ROOM_TOKEN_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup("CHECKMATE_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(login_page) = lookup("CHECKMATE_LOGIN_PAGE") {
            config.login_page = login_page;
        }
        if let Some(key) = lookup("CHECKMATE_ROOM_TOKEN_KEY") {
            config.room_token_key = key;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_room_token_key(mut self, key: impl Into<String>) -> Self {
        self.room_token_key = key.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base url must be http(s): {}",
                self.base_url
            )));
        }
        if !self.multiplayer_base.starts_with('/') {
            return Err(ClientError::Config(format!(
                "multiplayer base must be an absolute path: {}",
                self.multiplayer_base
            )));
        }
        if self.room_token_key.is_empty() {
            return Err(ClientError::Config("room token key is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_keep_room_token_key() {
        let config = ClientConfig::default();

        assert_eq!(config.room_token_key, "token");
        assert_eq!(config.multiplayer_base, "/api/multiplayer");
        assert_eq!(config.login_page, "login.html");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CHECKMATE_BASE_URL", "https://chess.example.com"),
            ("CHECKMATE_ROOM_TOKEN_KEY", "authToken"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.base_url, "https://chess.example.com");
        assert_eq!(config.room_token_key, "authToken");
        assert_eq!(config.login_page, DEFAULT_LOGIN_PAGE);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = ClientConfig::from_lookup(|k| {
            (k == "CHECKMATE_BASE_URL").then(|| "ftp://nope".to_string())
        });

        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
