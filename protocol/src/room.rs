use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ParseError;

/// Server-owned room snapshot.
///
/// The client never interprets or merges it; it is stored and handed back
/// exactly as received. [`Room::info`] offers a typed reading for callers
/// that know the server's room layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Room(Value);

impl Room {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Room id, as either `room_id` or `id`
    pub fn id(&self) -> Option<&str> {
        self.0
            .get("room_id")
            .or_else(|| self.0.get("id"))
            .and_then(Value::as_str)
    }

    pub fn info(&self) -> Result<RoomInfo, ParseError> {
        if !self.0.is_object() {
            return Err(ParseError::NotAnObject("room".to_string()));
        }
        if self.0.get("room_id").is_none() {
            return Err(ParseError::MissingField("room_id".to_string()));
        }
        Ok(RoomInfo::deserialize(&self.0)?)
    }
}

impl From<Value> for Room {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub color: String,
    pub user_id: String,
    #[serde(default = "connected_default")]
    pub connected: bool,
}

fn connected_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(rename = "move")]
    pub chess_move: Value,
    pub player: String,
    pub username: String,
    pub timestamp: String,
}

/// Typed view of a chess room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub room_id: String,
    pub mode: String,
    pub status: RoomStatus,
    #[serde(default)]
    pub players: Vec<Player>,
    pub current_turn: String,
    #[serde(default)]
    pub board: Value,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub move_history: Vec<MoveRecord>,
}

impl RoomInfo {
    pub fn is_full(&self) -> bool {
        self.players.len() >= 2
    }

    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    /// Whether it is `user_id`'s turn in a running game
    pub fn is_turn_of(&self, user_id: &str) -> bool {
        self.status == RoomStatus::Playing
            && self
                .player(user_id)
                .is_some_and(|p| p.color == self.current_turn)
    }
}
