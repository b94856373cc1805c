//! chatrelay entry point.
//!
//! Binary name: `chatrelay`
//!
//! Parses CLI arguments, loads configuration, then either starts the relay
//! HTTP server or runs a chat command against the data service.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use chatrelay_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{ChatsCommand, Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatrelay", &mut std::io::stdout());
        return Ok(());
    }

    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(otel, filter_for_verbosity(cli.verbose, cli.quiet))
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init().await?;
    tracing::debug!(path = %state.config_path().display(), "Config file");

    match cli.command {
        Commands::Serve { port, host, .. } => {
            serve(&state, host, port, cli.quiet).await?;
        }

        Commands::Chats { action } => match action {
            ChatsCommand::List => cli::chats::list_chats(&state, cli.json).await?,
            ChatsCommand::Create => cli::chats::create_chat(&state, cli.json).await?,
            ChatsCommand::Rename { id, title } => {
                cli::chats::rename_chat(&state, &id, &title, cli.json).await?
            }
            ChatsCommand::Delete { id, force } => {
                cli::chats::delete_chat(&state, &id, force, cli.json).await?
            }
        },

        Commands::Messages { chat_id, follow } => {
            cli::messages::show_messages(&state, &chat_id, follow, cli.json).await?;
        }

        Commands::Send {
            chat_id,
            text,
            local,
        } => {
            cli::send::send_message(&state, &chat_id, &text.join(" "), local, cli.json).await?;
        }

        Commands::Open { chat_id, local } => {
            cli::open::open_chat(&state, &chat_id, local, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

async fn serve(
    state: &AppState,
    host: Option<String>,
    port: Option<u16>,
    quiet: bool,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| state.config.server.host.clone());
    let port = port.unwrap_or(state.config.server.port);

    let relay = state.relay();
    if !relay.has_credential() {
        tracing::warn!(
            env = %state.config.upstream.api_key_env,
            "Completion API key not set; every relay request will fail"
        );
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Relay listening");

    if !quiet {
        println!(
            "  {} chatrelay listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}/api/chat")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(http::HttpState::new(relay));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Relay stopped");
    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
