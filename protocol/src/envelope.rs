use serde::Serialize;

use crate::room::Room;

/// Message used when a failed response carries no message of its own
pub const FALLBACK_FAILURE_MESSAGE: &str = "Request failed";

/// Message returned while matchmaking has not found an opponent yet
pub const SEARCHING_MESSAGE: &str = "Đang tìm đối thủ...";

/// Uniform result of every room operation.
///
/// Transport failures and server-side rejections look the same here:
/// `success == false` with a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
}

impl RoomResult {
    pub fn failure(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());

        Self {
            success: false,
            message: Some(message),
            room: None,
            room_id: None,
            matched: None,
        }
    }

    /// Success carrying a room snapshot
    pub fn with_room(room: Option<Room>) -> Self {
        Self {
            success: true,
            message: None,
            room,
            room_id: None,
            matched: None,
        }
    }

    /// Pass-through of the server's verdict and message
    pub fn status(success: bool, message: Option<String>) -> Self {
        if !success {
            return Self::failure(message);
        }
        Self {
            success,
            message,
            room: None,
            room_id: None,
            matched: None,
        }
    }

    pub fn searching() -> Self {
        Self {
            success: true,
            message: Some(SEARCHING_MESSAGE.to_string()),
            room: None,
            room_id: None,
            matched: Some(false),
        }
    }

    pub fn room_id(mut self, room_id: Option<String>) -> Self {
        self.room_id = room_id;
        self
    }

    pub fn matched(mut self, matched: bool) -> Self {
        self.matched = Some(matched);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_always_has_message() {
        assert_eq!(
            RoomResult::failure(None).message.as_deref(),
            Some(FALLBACK_FAILURE_MESSAGE)
        );
        assert_eq!(
            RoomResult::failure(Some(String::new())).message.as_deref(),
            Some(FALLBACK_FAILURE_MESSAGE)
        );
        assert_eq!(
            RoomResult::failure(Some("Phòng đã đầy".into())).message.as_deref(),
            Some("Phòng đã đầy")
        );
    }

    #[test]
    fn test_serializes_like_the_browser_shape() {
        let result = RoomResult::with_room(Some(Room::new(json!({ "id": "R1", "players": [] }))))
            .room_id(Some("R1".into()));

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "success": true, "roomId": "R1", "room": { "id": "R1", "players": [] } })
        );
    }

    #[test]
    fn test_searching() {
        assert_eq!(
            serde_json::to_value(RoomResult::searching()).unwrap(),
            json!({ "success": true, "matched": false, "message": "Đang tìm đối thủ..." })
        );
    }
}
