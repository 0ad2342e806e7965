use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Room mode requested when creating a room.
///
/// The server treats any value other than `friends` like a public room, so
/// unknown modes are carried through as [`GameMode::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameMode {
    /// Private room joined by a short numeric code
    #[default]
    Friends,
    /// Public room used by random matchmaking
    Random,
    Other(String),
}

impl GameMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Friends => "friends",
            Self::Random => "random",
            Self::Other(mode) => mode,
        }
    }
}

impl From<String> for GameMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "friends" => Self::Friends,
            "random" => Self::Random,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for GameMode {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<GameMode> for String {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Other(mode) => mode,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRoomRequest {
    pub mode: GameMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinRoomRequest {
    pub room_id: String,
}

/// The move payload is opaque to the client and forwarded as-is.
#[derive(Debug, Clone, Serialize)]
pub struct MakeMoveRequest {
    #[serde(rename = "move")]
    pub chess_move: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}
