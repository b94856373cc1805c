//! CLI command definitions for the `chatrelay` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chats;
pub mod format;
pub mod messages;
pub mod open;
pub mod send;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Relay chat messages to a completion API and manage conversations.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the completion relay HTTP server.
    Serve {
        /// Port to listen on (defaults to [server].port).
        #[arg(short, long, env = "CHATRELAY_PORT")]
        port: Option<u16>,

        /// Host to bind to (defaults to [server].host).
        #[arg(long, env = "CHATRELAY_HOST")]
        host: Option<String>,

        /// Export spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Manage chats.
    Chats {
        #[command(subcommand)]
        action: ChatsCommand,
    },

    /// Print the messages of a chat.
    Messages {
        /// Chat id.
        chat_id: String,

        /// Keep watching for new messages until Ctrl+C.
        #[arg(short, long)]
        follow: bool,
    },

    /// Send a message to a chat and store the bot's reply.
    Send {
        /// Chat id.
        chat_id: String,

        /// Message text (multiple words are joined with spaces).
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Call the completion API in-process instead of the relay URL.
        #[arg(long)]
        local: bool,
    },

    /// Follow a chat and send each line typed on stdin.
    Open {
        /// Chat id.
        chat_id: String,

        /// Call the completion API in-process instead of the relay URL.
        #[arg(long)]
        local: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ChatsCommand {
    /// List your chats, most recently updated first.
    #[command(alias = "ls")]
    List,

    /// Create a chat with a time-stamped default title.
    #[command(alias = "new")]
    Create,

    /// Rename a chat. A blank title becomes "Untitled Chat".
    Rename {
        /// Chat id.
        id: String,

        /// New title.
        title: String,
    },

    /// Delete a chat and its messages.
    #[command(alias = "rm")]
    Delete {
        /// Chat id.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
