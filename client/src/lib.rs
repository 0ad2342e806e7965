mod auth;
mod config;
mod error;
mod guard;
pub mod navigation;
mod room;
mod session;
pub mod storage;
pub mod transport;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

pub use checkmate_protocol::{GameMode, Room, RoomInfo, RoomResult, RoomStatus, UserProfile};

pub use auth::Auth;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use guard::PageGuard;
pub use navigation::{Navigator, PageLocation, UserInfoRenderer, UserWidget};
pub use room::RoomClient;
pub use session::{
    AUTH_TOKEN_KEY, ROOM_TOKEN_KEY, Session, SessionStore, USER_ID_KEY, USER_NAME_KEY, bearer,
};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

/// Wires the components to one storage, navigator and transport
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            storage,
            navigator,
            transport,
        })
    }

    /// Client talking HTTP to `config.base_url`
    pub fn connect(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config.base_url.clone()));
        Self::new(config, storage, navigator, transport)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(
            self.storage.clone(),
            self.navigator.clone(),
            self.config.login_page.clone(),
        )
    }

    pub fn auth(&self) -> Auth {
        Auth::new(self.session(), self.transport.clone())
    }

    pub fn page_guard(&self, renderer: Arc<dyn UserInfoRenderer>) -> PageGuard {
        PageGuard::new(
            self.session(),
            self.navigator.clone(),
            renderer,
            self.config.user_info_element.clone(),
        )
    }

    /// A fresh room client with no cached room
    pub fn rooms(&self) -> RoomClient {
        RoomClient::new(self.transport.clone(), self.storage.clone(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingNavigator, ScriptedTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_components_share_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let transport = Arc::new(ScriptedTransport::new().json(json!({
            "success": true,
            "token": "jwt",
            "user": { "username": "demo", "user_id": "u-1" }
        })));
        let client = Client::new(
            ClientConfig::default(),
            storage.clone(),
            navigator.clone(),
            transport,
        )
        .unwrap();

        client.auth().login("demo@example.com", "demo123").await.unwrap();
        assert!(client.session().is_logged_in());

        client.session().logout();
        assert!(storage.is_empty());
        assert_eq!(navigator.visits(), vec!["login.html".to_string()]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("localhost");
        let result = Client::new(
            config,
            Arc::new(MemoryStorage::new()),
            Arc::new(PageLocation::new()),
            Arc::new(ScriptedTransport::new()),
        );

        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
