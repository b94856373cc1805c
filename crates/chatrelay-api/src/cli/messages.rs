//! Conversation view: print a chat's messages, optionally following it.

use anyhow::Result;
use console::style;

use chatrelay_core::chat::feed::MessageFeed;

use crate::cli::format::{MessagePrinter, print_message};
use crate::state::AppState;

pub async fn show_messages(state: &AppState, chat_id: &str, follow: bool, json: bool) -> Result<()> {
    if follow {
        return follow_messages(state, chat_id, json).await;
    }

    let service = state.chat_service()?;
    let messages = service.list_messages(chat_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages yet. Send one with: {}",
            style("i").blue().bold(),
            style(format!("chatrelay send {chat_id} <text>")).yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    for message in &messages {
        print_message(message);
    }
    Ok(())
}

/// Print messages as the feed picks them up, until Ctrl+C.
async fn follow_messages(state: &AppState, chat_id: &str, json: bool) -> Result<()> {
    let repo = state.chat_repo()?;
    let feed = MessageFeed::spawn(repo, chat_id, state.poll_interval());
    let mut rx = feed.subscribe();
    let mut printer = MessagePrinter::new(json);

    if !json {
        println!();
        println!("  {}", style("Following chat, press Ctrl+C to stop").dim());
        println!();
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                if let Some(messages) = snapshot {
                    printer.print_new(&messages)?;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    feed.stop().await;
    Ok(())
}
