//! Shared terminal formatting helpers.

use std::collections::HashSet;

use chrono::{DateTime, Local, Utc};
use console::style;

use chatrelay_types::chat::{Message, Sender};

pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}

/// One message as a styled, indented block.
pub fn print_message(message: &Message) {
    let time = message.created_at.with_timezone(&Local).format("%H:%M");
    let who = match message.sender {
        Sender::User => style("you").cyan().bold(),
        Sender::Bot => style("bot").magenta().bold(),
    };
    println!("  {} {}", who, style(time).dim());
    for line in message.content.lines() {
        println!("    {line}");
    }
    println!();
}

/// Prints each message of a changing list once.
pub struct MessagePrinter {
    seen: HashSet<String>,
    json: bool,
}

impl MessagePrinter {
    /// In JSON mode each message is one line of JSON.
    pub fn new(json: bool) -> Self {
        Self {
            seen: HashSet::new(),
            json,
        }
    }

    /// Print the unseen messages and remember them.
    pub fn print_new(&mut self, messages: &[Message]) -> anyhow::Result<()> {
        for message in messages {
            if !self.seen.insert(message.id.clone()) {
                continue;
            }
            if self.json {
                println!("{}", serde_json::to_string(message)?);
            } else {
                print_message(message);
            }
        }
        Ok(())
    }
}
