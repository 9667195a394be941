//! Typing client entry point
//!
//! Run with:
//! ```bash
//! TYPING_CHAT_ID=room-1 TYPING_USER_ID=alice cargo run -p chat-typing
//! ```
//!
//! Every line read from stdin counts as a keystroke; an empty line announces
//! a stop. The typing label is printed whenever it changes.
//!
//! Configuration is loaded from environment variables.

use anyhow::Context;
use chat_common::{required_var, try_init_tracing_with_config, AppConfig};
use chat_core::{ChatId, UserId};
use chat_typing::{client, ChatSession, TypingCallback};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Notify;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&config.app.env.tracing_config()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Typing client failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let chat_id: ChatId = required_var("TYPING_CHAT_ID")?.parse()?;
    let user_id: UserId = required_var("TYPING_USER_ID")?.parse()?;
    let names = std::env::var("TYPING_DISPLAY_NAMES")
        .map(|raw| parse_display_names(&raw))
        .unwrap_or_default();

    info!(
        env = ?config.app.env,
        gateway = %config.gateway.url,
        timeout_ms = config.typing.timeout_ms,
        "Configuration loaded"
    );

    let bridge = client::connect(&config.gateway.url, config.typing.channel_buffer)
        .await
        .context("connecting to gateway")?;

    let changed = Arc::new(Notify::new());
    let notifier = changed.clone();
    let on_change: TypingCallback = Arc::new(move |_: &UserId, _: bool| notifier.notify_one());

    let mut session = ChatSession::open(
        &config.typing,
        chat_id,
        user_id,
        bridge.channel,
        bridge.inbound,
        Some(on_change),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_label = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let result = if line.trim().is_empty() {
                    session.stop_typing()
                } else {
                    session.on_keystroke()
                };
                if let Err(e) = result {
                    warn!(error = %e, "Failed to announce typing state");
                }
            }
            () = changed.notified() => {
                let label = session.typing_label(&names);
                if label != last_label {
                    println!("{label}");
                    last_label = label;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    session.close();
    bridge.handle.abort();
    Ok(())
}

/// Parse `id=Name,id=Name` pairs; malformed pairs are skipped
fn parse_display_names(raw: &str) -> HashMap<UserId, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (id, name) = pair.split_once('=')?;
            let id = UserId::parse(id).ok()?;
            let name = name.trim();
            (!name.is_empty()).then(|| (id, name.to_string()))
        })
        .collect()
}
