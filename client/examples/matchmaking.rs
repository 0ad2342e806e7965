use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use checkmate_client::{AUTH_TOKEN_KEY, Client, ClientConfig, FileStorage, PageLocation};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let email = std::env::var("CHECKMATE_EMAIL").unwrap_or_else(|_| "demo@example.com".into());
    let password = std::env::var("CHECKMATE_PASSWORD").unwrap_or_else(|_| "demo123".into());

    // The room endpoints read `token`, the login stores `authToken`; point both at one key.
    let config = ClientConfig::from_env()?.with_room_token_key(AUTH_TOKEN_KEY);
    let storage = Arc::new(FileStorage::open("checkmate-session.json")?);
    let location = Arc::new(PageLocation::new());
    let client = Client::connect(config, storage, location.clone())?;

    let auth = client.auth();
    if !auth.validate_token().await {
        let session = auth.login(&email, &password).await?;
        println!("Logged in as {}", session.username.unwrap_or_default());
    }

    let mut rooms = client.rooms();
    for _ in 0..10 {
        let result = rooms.find_random().await;
        if !result.success {
            bail!("Matchmaking failed: {}", result.message.unwrap_or_default());
        }
        if result.matched == Some(true) {
            println!("Matched in room {}", result.room_id.unwrap_or_default());
            break;
        }
        println!("{}", result.message.unwrap_or_default());
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    match rooms.current_room() {
        Some(room) => {
            if let Ok(info) = room.info() {
                for player in &info.players {
                    println!("{} plays {}", player.username, player.color);
                }
            }
            let left = rooms.leave_room().await;
            println!("Left room: {}", left.success);
        }
        None => {
            let cancelled = rooms.cancel_matchmaking().await;
            println!("Cancelled matchmaking: {}", cancelled.success);
        }
    }

    if let Some(page) = location.current() {
        println!("Redirected to {}", page);
    }

    Ok(())
}
