use std::fmt;

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every endpoint the client talks to
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// GET /api/validate-token
    ValidateToken,

    /// POST /api/login
    Login,

    /// POST /api/register
    Register,

    /// GET /api/profile
    Profile,

    /// GET /api/leaderboard
    Leaderboard,

    /// POST {base}/create-room
    CreateRoom,

    /// POST {base}/join-room
    JoinRoom,

    /// POST {base}/find-random
    FindRandom,

    /// POST {base}/cancel-matchmaking
    CancelMatchmaking,

    /// GET {base}/get-room/ROOMID
    GetRoom(String),

    /// POST {base}/make-move
    MakeMove,

    /// POST {base}/leave-room
    LeaveRoom,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Self::ValidateToken | Self::Profile | Self::Leaderboard | Self::GetRoom(_) => {
                Method::Get
            }
            _ => Method::Post,
        }
    }

    /// Build the request path. Multiplayer endpoints are joined onto `multiplayer_base`,
    /// the account endpoints always live under `/api`.
    pub fn path(&self, multiplayer_base: &str) -> String {
        let base = multiplayer_base.trim_end_matches('/');
        match self {
            Self::ValidateToken => "/api/validate-token".to_string(),
            Self::Login => "/api/login".to_string(),
            Self::Register => "/api/register".to_string(),
            Self::Profile => "/api/profile".to_string(),
            Self::Leaderboard => "/api/leaderboard".to_string(),
            Self::CreateRoom => format!("{}/create-room", base),
            Self::JoinRoom => format!("{}/join-room", base),
            Self::FindRandom => format!("{}/find-random", base),
            Self::CancelMatchmaking => format!("{}/cancel-matchmaking", base),
            Self::GetRoom(room_id) => format!("{}/get-room/{}", base, room_id),
            Self::MakeMove => format!("{}/make-move", base),
            Self::LeaveRoom => format!("{}/leave-room", base),
        }
    }
}
