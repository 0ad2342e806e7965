use std::sync::Arc;

use crate::error::Result;
use crate::navigation::Navigator;
use crate::storage::SessionStorage;
use crate::transport::Headers;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_ID_KEY: &str = "userId";

/// Key the room client reads its bearer token from by default.
///
/// Differs from [`AUTH_TOKEN_KEY`]; see [`crate::ClientConfig::room_token_key`].
pub const ROOM_TOKEN_KEY: &str = "token";

const SESSION_KEYS: [&str; 3] = [AUTH_TOKEN_KEY, USER_NAME_KEY, USER_ID_KEY];

/// Identity of the logged-in user as found in storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

/// `Authorization` value for `token`.
///
/// A missing token yields the literal `Bearer null`, the same header the
/// browser client sends; the server rejects it like any other bad token.
pub fn bearer(token: Option<&str>) -> String {
    format!("Bearer {}", token.unwrap_or("null"))
}

/// Reads and clears the session kept in [`SessionStorage`]
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    login_page: String,
}

impl SessionStore {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
        login_page: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            navigator,
            login_page: login_page.into(),
        }
    }

    pub fn login_page(&self) -> &str {
        &self.login_page
    }

    pub fn is_logged_in(&self) -> bool {
        self.storage.get(AUTH_TOKEN_KEY).is_some()
    }

    pub fn current_user(&self) -> Session {
        Session {
            token: self.storage.get(AUTH_TOKEN_KEY),
            username: self.storage.get(USER_NAME_KEY),
            user_id: self.storage.get(USER_ID_KEY),
        }
    }

    /// Store a freshly issued session
    pub fn save_session(&self, token: &str, username: Option<&str>, user_id: Option<&str>) -> Result<()> {
        self.storage.set(AUTH_TOKEN_KEY, token)?;
        match username {
            Some(name) => self.storage.set(USER_NAME_KEY, name)?,
            None => self.storage.remove(USER_NAME_KEY)?,
        }
        match user_id {
            Some(id) => self.storage.set(USER_ID_KEY, id)?,
            None => self.storage.remove(USER_ID_KEY)?,
        }
        Ok(())
    }

    /// Drop the session and send the user to the login page.
    ///
    /// The navigation happens even if persisting the removal fails.
    pub fn logout(&self) {
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!(key, error = %e, "Failed to persist session removal");
            }
        }

        tracing::info!(login_page = %self.login_page, "Logged out");
        self.navigator.navigate(&self.login_page);
    }

    /// Headers for authenticated JSON requests
    pub fn auth_headers(&self) -> Headers {
        let token = self.storage.get(AUTH_TOKEN_KEY);
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), bearer(token.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_support::RecordingNavigator;

    fn store_with(entries: &[(&str, &str)]) -> (SessionStore, Arc<MemoryStorage>, Arc<RecordingNavigator>) {
        let storage = Arc::new(MemoryStorage::with_entries(entries.iter().copied()));
        let navigator = Arc::new(RecordingNavigator::default());
        let store = SessionStore::new(storage.clone(), navigator.clone(), "login.html");
        (store, storage, navigator)
    }

    #[test]
    fn test_not_logged_in_without_token() {
        let (store, _, _) = store_with(&[(USER_NAME_KEY, "demo"), (ROOM_TOKEN_KEY, "abc")]);

        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_logged_in_with_token() {
        let (store, _, _) = store_with(&[(AUTH_TOKEN_KEY, "abc123")]);

        assert!(store.is_logged_in());
    }

    #[test]
    fn test_current_user_missing_keys_are_none() {
        let (store, _, _) = store_with(&[(USER_NAME_KEY, "demo")]);

        assert_eq!(
            store.current_user(),
            Session {
                token: None,
                username: Some("demo".into()),
                user_id: None,
            }
        );
    }

    #[test]
    fn test_logout_clears_keys_and_navigates_once() {
        let (store, storage, navigator) = store_with(&[
            (AUTH_TOKEN_KEY, "abc123"),
            (USER_NAME_KEY, "demo"),
            (USER_ID_KEY, "u-1"),
        ]);

        store.logout();

        assert_eq!(store.current_user(), Session::default());
        assert!(storage.is_empty());
        assert_eq!(navigator.visits(), vec!["login.html".to_string()]);
    }

    #[test]
    fn test_logout_when_already_logged_out() {
        let (store, _, navigator) = store_with(&[]);

        store.logout();

        assert_eq!(store.current_user(), Session::default());
        assert_eq!(navigator.visits().len(), 1);
    }

    #[test]
    fn test_logout_leaves_room_token() {
        let (store, storage, _) = store_with(&[(AUTH_TOKEN_KEY, "a"), (ROOM_TOKEN_KEY, "b")]);

        store.logout();

        assert_eq!(storage.get(ROOM_TOKEN_KEY).as_deref(), Some("b"));
    }

    #[test]
    fn test_auth_headers() {
        let (store, _, _) = store_with(&[(AUTH_TOKEN_KEY, "abc123")]);

        assert_eq!(
            store.auth_headers(),
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Bearer abc123".to_string()),
            ]
        );
    }

    #[test]
    fn test_auth_headers_without_token_send_null() {
        let (store, _, _) = store_with(&[]);

        let headers = store.auth_headers();
        assert_eq!(headers[1].1, "Bearer null");
    }

    #[test]
    fn test_save_session_round_trip() {
        let (store, _, _) = store_with(&[(USER_ID_KEY, "stale")]);

        store.save_session("jwt", Some("demo"), None).unwrap();

        assert!(store.is_logged_in());
        assert_eq!(
            store.current_user(),
            Session {
                token: Some("jwt".into()),
                username: Some("demo".into()),
                user_id: None,
            }
        );
    }
}
