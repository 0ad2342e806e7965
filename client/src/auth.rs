use std::sync::Arc;

use checkmate_protocol::envelope::FALLBACK_FAILURE_MESSAGE;
use checkmate_protocol::{
    ApiResponse, Endpoint, LeaderboardEntry, LoginRequest, ParseError, RegisterRequest,
    UserProfile, parse_response,
};
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::session::{Session, SessionStore};
use crate::transport::{Headers, HttpRequest, HttpResponse, Transport};

/// Account calls: token validation, login, registration, profile, leaderboard
#[derive(Clone)]
pub struct Auth {
    session: SessionStore,
    transport: Arc<dyn Transport>,
}

impl Auth {
    pub fn new(session: SessionStore, transport: Arc<dyn Transport>) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Ask the server whether the stored token is still accepted.
    ///
    /// No token means no request. A 401 logs the user out. Transport
    /// failures count as an invalid token and are never returned.
    pub async fn validate_token(&self) -> bool {
        let token = self.session.current_user().token;
        if token.is_none_or(|t| t.is_empty()) {
            return false;
        }

        let request = HttpRequest {
            method: Endpoint::ValidateToken.method(),
            path: Endpoint::ValidateToken.path(""),
            headers: self.session.auth_headers(),
            body: None,
        };

        match self.transport.send(request).await {
            Ok(response) if response.is_unauthorized() => {
                tracing::info!("Token rejected, logging out");
                self.session.logout();
                false
            }
            Ok(response) => response.is_success(),
            Err(e) => {
                tracing::error!(error = %e, "Token validation error");
                false
            }
        }
    }

    /// Log in and store the issued session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.post(Endpoint::Login, &body).await?;
        let data = accepted(parse_response(&response.body)?)?;

        let token = data
            .token
            .as_deref()
            .ok_or_else(|| ParseError::MissingField("token".to_string()))?;
        let user = data.login_user();

        self.session
            .save_session(token, user.username.as_deref(), user.user_id.as_deref())?;
        tracing::info!(username = ?user.username, "Logged in");

        Ok(self.session.current_user())
    }

    /// Create an account. Returns the server's confirmation message.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<String> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.post(Endpoint::Register, &body).await?;
        let data = accepted(parse_response(&response.body)?)?;

        Ok(data.message.unwrap_or_default())
    }

    /// Fetch the logged-in user's account. A 401 logs the user out.
    pub async fn profile(&self) -> Result<UserProfile> {
        if !self.session.is_logged_in() {
            return Err(ClientError::NotLoggedIn);
        }

        let request = HttpRequest {
            method: Endpoint::Profile.method(),
            path: Endpoint::Profile.path(""),
            headers: self.session.auth_headers(),
            body: None,
        };
        let response = self.transport.send(request).await?;

        if response.is_unauthorized() {
            self.session.logout();
            return Err(ClientError::Unauthorized);
        }

        let data = accepted(parse_response(&response.body)?)?;
        Ok(data.profile()?)
    }

    /// Top players. Public, so no credentials are sent.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let request = HttpRequest {
            method: Endpoint::Leaderboard.method(),
            path: Endpoint::Leaderboard.path(""),
            headers: Vec::new(),
            body: None,
        };
        let response = self.transport.send(request).await?;

        let data = accepted(parse_response(&response.body)?)?;
        Ok(data.leaderboard()?)
    }

    async fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<HttpResponse> {
        let headers: Headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        let request = HttpRequest {
            method: endpoint.method(),
            path: endpoint.path(""),
            headers,
            body: Some(serde_json::to_value(body)?),
        };

        tracing::debug!(path = %request.path, "Sending account request");
        self.transport.send(request).await
    }
}

fn accepted(response: ApiResponse) -> Result<ApiResponse> {
    if response.success {
        return Ok(response);
    }
    let message = response
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());
    Err(ClientError::Rejected(message))
}
