//! Fakes shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ClientError, Result};
use crate::navigation::{Navigator, UserInfoRenderer};
use crate::transport::{HttpRequest, HttpResponse, Transport};

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: &str) {
        self.visits.lock().unwrap().push(location.to_string());
    }
}

/// Page with a fixed set of element ids
#[derive(Debug, Default)]
pub struct FakePage {
    elements: Mutex<HashMap<String, String>>,
}

impl FakePage {
    pub fn with_element(id: &str) -> Self {
        let page = Self::default();
        page.elements
            .lock()
            .unwrap()
            .insert(id.to_string(), String::new());
        page
    }

    pub fn content(&self, id: &str) -> Option<String> {
        self.elements.lock().unwrap().get(id).cloned()
    }
}

impl UserInfoRenderer for FakePage {
    fn has_element(&self, element_id: &str) -> bool {
        self.elements.lock().unwrap().contains_key(element_id)
    }

    fn replace_content(&self, element_id: &str, html: &str) {
        if let Some(content) = self.elements.lock().unwrap().get_mut(element_id) {
            *content = html.to_string();
        }
    }
}

/// Replays scripted responses in order and records every request.
///
/// Running out of script is reported as a transport failure.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn json(self, body: serde_json::Value) -> Self {
        self.respond(200, &body.to_string())
    }

    pub fn fail(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(ClientError::Transport(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("connection refused".to_string())))
    }
}
