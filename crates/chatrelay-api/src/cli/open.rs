//! Open command: follow a chat and send each line typed on stdin.
//!
//! The orchestrator and the feed share one event bus, so every persisted
//! message triggers an immediate re-fetch of the conversation.

use std::sync::Arc;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use chatrelay_core::chat::feed::MessageFeed;
use chatrelay_core::chat::repository::ChatRepository;
use chatrelay_core::send::bus::SendEventBus;
use chatrelay_core::send::client::RelayClient;
use chatrelay_core::send::orchestrator::{ReplySource, SendOrchestrator, SendReport};
use chatrelay_core::send::state::SendEvent;
use chatrelay_infra::relay_client::HttpRelayClient;
use chatrelay_types::error::SendError;

use crate::cli::format::MessagePrinter;
use crate::cli::send::state_label;
use crate::state::AppState;

pub async fn open_chat(state: &AppState, chat_id: &str, local: bool, json: bool) -> Result<()> {
    if local {
        run_open(state, state.relay(), chat_id, json).await
    } else {
        let client = HttpRelayClient::new(state.config.client.relay_url.clone());
        tracing::debug!(url = %client.url(), "Using relay endpoint");
        run_open(state, client, chat_id, json).await
    }
}

async fn run_open<C: RelayClient + 'static>(
    state: &AppState,
    relay: C,
    chat_id: &str,
    json: bool,
) -> Result<()> {
    let repo = state.chat_repo()?;
    let bus = SendEventBus::default();
    let mut events = bus.subscribe();

    let feed = MessageFeed::spawn(repo.clone(), chat_id, state.poll_interval());
    feed.follow_bus(&bus);
    let mut snapshots = feed.subscribe();

    let orchestrator = Arc::new(
        SendOrchestrator::new(repo.clone(), relay, bus).with_reply_delay(state.reply_delay()),
    );
    let (done_tx, mut done_rx) = mpsc::channel::<Result<SendReport, SendError>>(1);

    let mut printer = MessagePrinter::new(json);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut pending = false;

    if !json {
        println!();
        println!(
            "  {}",
            style("Type a message and press Enter. Ctrl+C or Ctrl+D to leave.").dim()
        );
        println!();
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if let Some(messages) = snapshot {
                    printer.print_new(&messages)?;
                }
            }
            event = events.recv() => match event {
                Ok(SendEvent::StateChanged { state, .. }) => {
                    if state.is_busy() && !json {
                        eprintln!("  {}", style(state_label(state)).dim());
                    }
                }
                Ok(SendEvent::Refresh { .. }) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line(), if input_open && !pending => match line? {
                Some(text) if text.trim().is_empty() => {}
                Some(text) => {
                    pending = true;
                    let orchestrator = orchestrator.clone();
                    let done_tx = done_tx.clone();
                    let chat_id = chat_id.to_string();
                    tokio::spawn(async move {
                        let result = orchestrator.send(&chat_id, &text).await;
                        let _ = done_tx.send(result).await;
                    });
                }
                None => input_open = false,
            },
            Some(result) = done_rx.recv() => {
                pending = false;
                report_outcome(&result, json);
            }
            _ = &mut ctrl_c => break,
        }

        if !input_open && !pending {
            // The last refresh may still be in flight.
            printer.print_new(&repo.list_messages(chat_id).await?)?;
            break;
        }
    }

    feed.stop().await;
    Ok(())
}

/// Messages themselves arrive through the feed; only notes and failures
/// are printed here.
fn report_outcome(result: &Result<SendReport, SendError>, json: bool) {
    let note = match result {
        Ok(report) => match &report.source {
            ReplySource::Relay { .. } => return,
            ReplySource::RelayError { status } => format!("relay answered with HTTP {status}"),
            ReplySource::Fallback => "relay unreachable at this time".to_string(),
        },
        Err(SendError::UserMessageFailed {
            restored_input,
            source,
        }) => format!("Your message was not saved: {source}. Input: {restored_input}"),
        Err(SendError::BotMessageFailed { source, .. }) => {
            format!("The reply could not be saved: {source}")
        }
        Err(SendError::EmptyInput) => return,
    };

    if json {
        eprintln!("{}", serde_json::json!({ "note": note }));
    } else {
        eprintln!("  {} {note}", style("!").yellow().bold());
    }
}
