use checkmate_protocol::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Parse(#[from] ParseError),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The server answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Token rejected by server")]
    Unauthorized,
}
