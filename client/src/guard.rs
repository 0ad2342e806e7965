use std::sync::Arc;

use crate::navigation::{Navigator, UserInfoRenderer, UserWidget};
use crate::session::SessionStore;

/// Keeps anonymous visitors off game pages and shows who is logged in
#[derive(Clone)]
pub struct PageGuard {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    renderer: Arc<dyn UserInfoRenderer>,
    element_id: String,
}

impl PageGuard {
    pub fn new(
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        renderer: Arc<dyn UserInfoRenderer>,
        element_id: impl Into<String>,
    ) -> Self {
        Self {
            session,
            navigator,
            renderer,
            element_id: element_id.into(),
        }
    }

    /// Send the visitor to the login page unless a session token is stored
    pub fn check_authentication(&self) {
        if !self.session.is_logged_in() {
            tracing::debug!("No session, redirecting to login");
            self.navigator.navigate(self.session.login_page());
        }
    }

    /// Draw the user widget if the page has a slot for it and a username is stored.
    ///
    /// Returns whether anything was drawn.
    pub fn display_user_info(&self) -> bool {
        let Some(username) = self
            .session
            .current_user()
            .username
            .filter(|name| !name.is_empty())
        else {
            return false;
        };
        if !self.renderer.has_element(&self.element_id) {
            return false;
        }

        let widget = UserWidget::new(username);
        self.renderer
            .replace_content(&self.element_id, &widget.to_html());
        true
    }

    /// Content-loaded hook, run once per page
    pub fn on_content_loaded(&self) {
        self.display_user_info();
    }
}
