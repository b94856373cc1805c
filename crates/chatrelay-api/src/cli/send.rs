//! Send command: store the user's message, get a reply, store the bot's message.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::RecvError;

use chatrelay_core::send::bus::SendEventBus;
use chatrelay_core::send::client::RelayClient;
use chatrelay_core::send::orchestrator::{ReplySource, SendOrchestrator, SendReport};
use chatrelay_core::send::state::{SendEvent, SendState};
use chatrelay_infra::relay_client::HttpRelayClient;
use chatrelay_types::error::SendError;

use crate::cli::format::print_message;
use crate::state::AppState;

pub async fn send_message(
    state: &AppState,
    chat_id: &str,
    text: &str,
    local: bool,
    json: bool,
) -> Result<()> {
    if local {
        let relay = state.relay();
        if !relay.has_credential() {
            tracing::warn!(
                env = %state.config.upstream.api_key_env,
                "No completion API key set; the reply will be the configuration error"
            );
        }
        run_send(state, relay, chat_id, text, json).await
    } else {
        let client = HttpRelayClient::new(state.config.client.relay_url.clone());
        tracing::debug!(url = %client.url(), "Using relay endpoint");
        run_send(state, client, chat_id, text, json).await
    }
}

pub(crate) fn state_label(state: SendState) -> &'static str {
    match state {
        SendState::SendingUser => "Saving your message...",
        SendState::AwaitingReply => "Waiting for a reply...",
        SendState::SendingBot => "Saving the reply...",
        SendState::Idle | SendState::Done | SendState::Failed => "",
    }
}

async fn run_send<C: RelayClient>(
    state: &AppState,
    relay: C,
    chat_id: &str,
    text: &str,
    json: bool,
) -> Result<()> {
    let repo = state.chat_repo()?;
    let bus = SendEventBus::default();
    let mut events = bus.subscribe();
    let orchestrator =
        SendOrchestrator::new(repo, relay, bus).with_reply_delay(state.reply_delay());

    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        progress.set_style(style);
    }
    progress.enable_steady_tick(std::time::Duration::from_millis(80));
    if json {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let watcher = {
        let progress = progress.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SendEvent::StateChanged { state, .. }) => {
                        if state.is_terminal() {
                            break;
                        }
                        if state.is_busy() {
                            progress.set_message(state_label(state));
                        }
                    }
                    Ok(SendEvent::Refresh { .. }) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    let result = orchestrator.send(chat_id, text).await;
    progress.finish_and_clear();
    watcher.abort();

    match result {
        Ok(report) => print_report(&report, json),
        Err(SendError::UserMessageFailed {
            restored_input,
            source,
        }) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "sent": false, "error": source.to_string(), "input": restored_input })
                );
            } else {
                eprintln!("  {} Your message was not saved: {source}", style("✗").red().bold());
                eprintln!("  {} {}", style("Input:").dim(), restored_input);
            }
            Err(anyhow::anyhow!("failed to save your message"))
        }
        Err(SendError::BotMessageFailed {
            user_message,
            source,
        }) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "sent": true, "user_message": user_message, "error": source.to_string() })
                );
            } else {
                print_message(&user_message);
                eprintln!("  {} The reply could not be saved: {source}", style("✗").red().bold());
            }
            Err(anyhow::anyhow!("failed to save the bot reply"))
        }
        Err(e @ SendError::EmptyInput) => Err(e.into()),
    }
}

fn print_report(report: &SendReport, json: bool) -> Result<()> {
    if json {
        let source = match &report.source {
            ReplySource::Relay { model } => serde_json::json!({ "kind": "relay", "model": model }),
            ReplySource::RelayError { status } => {
                serde_json::json!({ "kind": "relay_error", "status": status })
            }
            ReplySource::Fallback => serde_json::json!({ "kind": "fallback" }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "sent": true,
                "user_message": report.user_message,
                "bot_message": report.bot_message,
                "source": source,
            }))?
        );
        return Ok(());
    }

    println!();
    print_message(&report.user_message);
    print_message(&report.bot_message);
    match &report.source {
        ReplySource::Relay { model } => println!("  {}", style(model).dim()),
        ReplySource::RelayError { status } => println!(
            "  {} relay answered with HTTP {status}",
            style("!").yellow().bold()
        ),
        ReplySource::Fallback => println!(
            "  {} relay unreachable at this time",
            style("!").yellow().bold()
        ),
    }
    println!();
    Ok(())
}
