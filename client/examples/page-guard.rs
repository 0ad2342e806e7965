use std::sync::Arc;

use anyhow::Result;
use checkmate_client::{Client, ClientConfig, MemoryStorage, PageLocation, UserInfoRenderer};

/// Prints the widget instead of writing it into a document
struct ConsolePage;

impl UserInfoRenderer for ConsolePage {
    fn has_element(&self, element_id: &str) -> bool {
        element_id == "user-info"
    }

    fn replace_content(&self, element_id: &str, html: &str) {
        println!("#{} <- {}", element_id, html);
    }
}

fn main() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    let location = Arc::new(PageLocation::new());
    let client = Client::connect(ClientConfig::from_env()?, storage, location.clone())?;
    let guard = client.page_guard(Arc::new(ConsolePage));

    println!("Login page is {}", client.config().login_page);
    guard.check_authentication();
    println!("Anonymous visitor sent to {:?}", location.current());

    client
        .session()
        .save_session("local-token", Some("demo"), Some("u-1"))?;
    guard.on_content_loaded();

    client.session().logout();
    println!("After logout: {:?}", location.current());

    Ok(())
}
