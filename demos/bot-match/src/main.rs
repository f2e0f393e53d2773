//! Plays one full game against the bot opponent and prints every
//! notification as the JSON a transport would put on the wire.
//!
//! ```text
//! RUST_LOG=debug cargo run -p bot-match
//! ```

use std::collections::HashSet;
use std::time::Duration;

use penta_protocol::{Codec, JsonCodec, Notification, ParticipantId};
use penta_room::{RegistryConfig, spawn_registry};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let registry = spawn_registry(RegistryConfig {
        bot_delay: Duration::from_millis(300),
        ..RegistryConfig::default()
    });
    let codec = JsonCodec;

    let me = ParticipantId::new("demo-player");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let code = registry.create_room(me.clone(), true, tx).await?;
    info!(%code, "created a room against the bot");

    // Strategy: always claim the lowest number nobody has taken yet.
    let mut claimed: HashSet<u8> = HashSet::new();
    let lowest_open = |claimed: &HashSet<u8>| (1..=25u8).find(|n| !claimed.contains(n));

    while let Some(notification) = rx.recv().await {
        let wire = codec.encode(&notification)?;
        println!("{}", String::from_utf8_lossy(&wire));

        match notification {
            Notification::GameStarted { current_turn, .. }
                if current_turn == me =>
            {
                if let Some(number) = lowest_open(&claimed) {
                    registry.claim(code.clone(), me.clone(), number).await?;
                }
            }
            Notification::StateUpdated {
                claimed_number,
                current_turn,
                ..
            } => {
                claimed.insert(claimed_number);
                if current_turn == me {
                    if let Some(number) = lowest_open(&claimed) {
                        registry.claim(code.clone(), me.clone(), number).await?;
                    }
                }
            }
            Notification::GameOver { winner, .. } => {
                info!(%winner, "game over");
                break;
            }
            _ => {}
        }
    }

    registry.disconnect(me).await?;
    Ok(())
}
