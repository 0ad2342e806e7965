use thiserror::Error;

pub mod endpoint;
pub mod envelope;
pub mod request;
pub mod response;
pub mod room;

pub use endpoint::{Endpoint, Method};
pub use envelope::RoomResult;
pub use request::{CreateRoomRequest, GameMode, JoinRoomRequest, LoginRequest, MakeMoveRequest, RegisterRequest};
pub use response::{ApiResponse, LeaderboardEntry, LoginUser, UserProfile, parse_response};
pub use room::{MoveRecord, Player, Room, RoomInfo, RoomStatus};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a JSON object, got {0}")]
    NotAnObject(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}
