use std::sync::Arc;

use checkmate_protocol::{
    ApiResponse, CreateRoomRequest, Endpoint, GameMode, JoinRoomRequest, MakeMoveRequest, Method,
    Room, RoomResult, parse_response,
};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::bearer;
use crate::storage::SessionStorage;
use crate::transport::{HttpRequest, Transport};

const NO_BODY: Option<&()> = None;

/// Multiplayer room calls.
///
/// Holds the last room snapshot the server sent. Every method takes
/// `&mut self`, so calls on one client are strictly sequential. None of them
/// return an error: failures come back as `RoomResult { success: false, .. }`.
///
/// There is no way to abort a call in flight; `cancel_matchmaking` is a
/// separate request.
pub struct RoomClient {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn SessionStorage>,
    api_base: String,
    token_key: String,
    current_room: Option<Room>,
}

impl RoomClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        storage: Arc<dyn SessionStorage>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            transport,
            storage,
            api_base: config.multiplayer_base.clone(),
            token_key: config.room_token_key.clone(),
            current_room: None,
        }
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current_room.as_ref()
    }

    pub async fn create_room(&mut self, mode: impl Into<GameMode>) -> RoomResult {
        let body = CreateRoomRequest { mode: mode.into() };

        self.call(Endpoint::CreateRoom, Some(&body), |current, data| {
            if !data.success {
                return RoomResult::failure(data.message);
            }
            *current = data.room.clone();
            RoomResult::with_room(data.room).room_id(data.room_id)
        })
        .await
    }

    pub async fn join_room(&mut self, room_id: &str) -> RoomResult {
        let body = JoinRoomRequest {
            room_id: room_id.to_string(),
        };

        self.call(Endpoint::JoinRoom, Some(&body), store_room).await
    }

    /// Enter random matchmaking, or pair with whoever is already waiting.
    ///
    /// An unmatched answer is still a success; poll again to learn about a match.
    pub async fn find_random(&mut self) -> RoomResult {
        self.call(Endpoint::FindRandom, NO_BODY, |current, data| {
            if !data.success {
                return RoomResult::failure(data.message);
            }
            if !data.matched {
                return RoomResult::searching();
            }
            *current = data.room.clone();
            RoomResult::with_room(data.room)
                .room_id(data.room_id)
                .matched(true)
        })
        .await
    }

    pub async fn cancel_matchmaking(&mut self) -> RoomResult {
        self.call(Endpoint::CancelMatchmaking, NO_BODY, |_, data| {
            RoomResult::status(data.success, data.message)
        })
        .await
    }

    pub async fn get_room(&mut self, room_id: &str) -> RoomResult {
        self.call(Endpoint::GetRoom(room_id.to_string()), NO_BODY, store_room)
            .await
    }

    /// Submit a move. The payload is forwarded untouched.
    pub async fn make_move(&mut self, chess_move: Value) -> RoomResult {
        let body = MakeMoveRequest { chess_move };

        self.call(Endpoint::MakeMove, Some(&body), store_room).await
    }

    /// Leave the current room. The cached room is dropped whatever the outcome.
    pub async fn leave_room(&mut self) -> RoomResult {
        let result = self
            .call(Endpoint::LeaveRoom, NO_BODY, |_, data| {
                RoomResult::status(data.success, data.message)
            })
            .await;

        self.current_room = None;
        result
    }

    /// Send one request and normalize the outcome.
    ///
    /// `on_response` sees every well-formed body; anything that prevents
    /// getting one becomes a failed result carrying the error text.
    async fn call<B, F>(&mut self, endpoint: Endpoint, body: Option<&B>, on_response: F) -> RoomResult
    where
        B: Serialize + ?Sized,
        F: FnOnce(&mut Option<Room>, ApiResponse) -> RoomResult,
    {
        match self.request(&endpoint, body).await {
            Ok(data) => on_response(&mut self.current_room, data),
            Err(e) => {
                tracing::warn!(
                    path = %endpoint.path(&self.api_base),
                    error = %e,
                    "Room request failed"
                );
                RoomResult::failure(Some(e.to_string()))
            }
        }
    }

    async fn request<B>(&self, endpoint: &Endpoint, body: Option<&B>) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let method = endpoint.method();
        let token = self.storage.get(&self.token_key);

        let mut headers = Vec::with_capacity(2);
        if method == Method::Post {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers.push(("Authorization".to_string(), bearer(token.as_deref())));

        let request = HttpRequest {
            method,
            path: endpoint.path(&self.api_base),
            headers,
            body: body.map(serde_json::to_value).transpose()?,
        };

        tracing::debug!(method = %request.method, path = %request.path, "Sending room request");
        let response = self.transport.send(request).await?;

        Ok(parse_response(&response.body)?)
    }
}

/// Success carries the room, which replaces the cached one
fn store_room(current: &mut Option<Room>, data: ApiResponse) -> RoomResult {
    if !data.success {
        return RoomResult::failure(data.message);
    }
    *current = data.room.clone();
    RoomResult::with_room(data.room)
}
