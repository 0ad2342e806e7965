use std::sync::{PoisonError, RwLock};

/// Moves the user to another page
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Navigator that only remembers where it was last sent.
///
/// Useful for headless front ends that poll `current()` to decide what to show.
#[derive(Debug, Default)]
pub struct PageLocation {
    current: RwLock<Option<String>>,
}

impl PageLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for PageLocation {
    fn navigate(&self, location: &str) {
        tracing::debug!(location, "Navigating");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(location.to_string());
    }
}

/// Page surface the user-info widget is drawn into
pub trait UserInfoRenderer: Send + Sync {
    fn has_element(&self, element_id: &str) -> bool;

    /// Replace the element's content with `html`
    fn replace_content(&self, element_id: &str, html: &str);
}

pub const LOGOUT_LABEL: &str = "🚪 Đăng xuất";

/// Greeting plus logout control shown to a logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWidget {
    pub username: String,
}

impl UserWidget {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn greeting(&self) -> String {
        format!("👤 {}", self.username)
    }

    pub fn to_html(&self) -> String {
        format!(
            "<span class=\"user-name\">{}</span>\n<button class=\"btn-logout\" onclick=\"logout()\">{}</button>",
            escape_html(&self.greeting()),
            LOGOUT_LABEL
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
