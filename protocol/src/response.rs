use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::ParseError;
use crate::room::Room;

/// Raw response body shared by every endpoint.
///
/// Only `success` is meaningful everywhere; a body without it counts as a
/// failure. The other fields are read leniently: a value of an unexpected
/// type is treated as absent instead of rejecting the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default)]
    pub room: Option<Room>,
    /// Numeric ids are converted to their decimal string
    #[serde(default, deserialize_with = "lenient_id")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub matched: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub leaderboard: Option<Value>,
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

/// One row of `/api/leaderboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(default)]
    pub elo: Option<i64>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

/// User fields returned alongside a login token
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "id")]
    pub user_id: Option<String>,
}

/// Account record returned by `/api/profile` and `/api/validate-token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub elo: Option<i64>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Fields this client does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parse a response body. Anything that is not a JSON object is rejected.
pub fn parse_response(body: &str) -> Result<ApiResponse, ParseError> {
    let value: Value = serde_json::from_str(body)?;

    match value {
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => Err(ParseError::NotAnObject(type_name(&other).to_string())),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ApiResponse {
    /// Decode the `user` field of a login response
    pub fn login_user(&self) -> LoginUser {
        self.user
            .clone()
            .and_then(|user| serde_json::from_value(user).ok())
            .unwrap_or_default()
    }

    /// Decode the `leaderboard` field. A missing list is an empty board.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ParseError> {
        match self.leaderboard.clone() {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(rows) => Ok(serde_json::from_value(rows)?),
        }
    }

    /// Decode the `user` field of a profile response
    pub fn profile(&self) -> Result<UserProfile, ParseError> {
        let user = self
            .user
            .clone()
            .ok_or_else(|| ParseError::MissingField("user".to_string()))?;
        Ok(serde_json::from_value(user)?)
    }
}
