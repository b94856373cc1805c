//! Chat list CLI commands: list, create, rename, delete.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use chatrelay_types::error::ChatServiceError;

use crate::cli::format::format_relative_time;
use crate::state::AppState;

fn spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let template = format!("{{spinner:.{color}}} {{msg}}");
    if let Ok(style) = ProgressStyle::default_spinner().template(&template) {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// List chats in a table, newest activity first.
pub async fn list_chats(state: &AppState, json: bool) -> Result<()> {
    let service = state.chat_service()?;
    let chats = service.list_chats(state.user_id()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chats)?);
        return Ok(());
    }

    if chats.is_empty() {
        println!();
        println!(
            "  {} No chats yet. Start one with: {}",
            style("i").blue().bold(),
            style("chatrelay chats create").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Last Active").fg(Color::White),
    ]);

    for chat in &chats {
        table.add_row(vec![
            Cell::new(chat.display_title()).fg(Color::Cyan),
            Cell::new(&chat.id).fg(Color::DarkGrey),
            Cell::new(format_relative_time(&chat.last_activity())).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} chat{}",
        style(chats.len()).bold(),
        if chats.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Create a chat owned by the configured user.
pub async fn create_chat(state: &AppState, json: bool) -> Result<()> {
    let service = state.chat_service()?;

    let progress = spinner("cyan", "Creating chat...".to_string());
    let result = service.create_chat(state.user_id()).await;
    progress.finish_and_clear();

    let chat = match result {
        Ok(chat) => chat,
        Err(ChatServiceError::NotSignedIn) => bail!(
            "you must be signed in to create a chat: set [data].user_id in config.toml or CHATRELAY_USER_ID"
        ),
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
    } else {
        println!(
            "  {} Created '{}' ({})",
            style("✓").green().bold(),
            style(chat.display_title()).cyan(),
            style(&chat.id).dim()
        );
    }

    Ok(())
}

pub async fn rename_chat(state: &AppState, id: &str, title: &str, json: bool) -> Result<()> {
    let service = state.chat_service()?;
    let chat = service.rename_chat(id, title).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
    } else {
        println!(
            "  {} Renamed to '{}'",
            style("✓").green().bold(),
            style(chat.display_title()).cyan()
        );
    }

    Ok(())
}

/// Delete a chat after confirmation (skipped with `--force` or `--json`).
pub async fn delete_chat(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let service = state.chat_service()?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete chat {} and all its messages?",
                style(id).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let progress = spinner("red", format!("Deleting {id}..."));
    let result = service.delete_chat(id).await;
    progress.finish_and_clear();
    result?;

    if json {
        println!("{}", serde_json::json!({ "deleted": true, "id": id }));
    } else {
        println!("  {} Chat deleted.", style("✓").red().bold());
    }

    Ok(())
}
