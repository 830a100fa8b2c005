use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use nyayadoot_types::{Session, PREVIEW_CHARS};
use std::path::Path;

use super::setup::open_history;

/// One line of the session list: position, preview and last activity
pub fn format_session_line(index: usize, session: &Session) -> String {
    let when = session
        .last_message_time
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M");
    format!(
        "{:>3}. {}  ({}, {} messages)",
        index + 1,
        session.preview(PREVIEW_CHARS),
        when,
        session.messages.len()
    )
}

/// `nyayadoot history`: list or clear the stored sessions
pub fn run_history_command(history_file: Option<&Path>, clear: bool) -> Result<()> {
    let Some(path) = history_file else {
        println!(
            "{}",
            "No history file configured. Sessions are kept in memory for a single run; \
             pass --history-file to keep them."
                .bright_black()
        );
        return Ok(());
    };

    let history = open_history(Some(path))?;

    if clear {
        history
            .clear()
            .with_context(|| format!("Failed to clear {}", path.display()))?;
        println!("{} Cleared history in {}", "🗑".bright_green(), path.display());
        return Ok(());
    }

    let sessions = history.load();
    if sessions.is_empty() {
        println!("{}", "No previous chats.".bright_black());
        return Ok(());
    }

    println!("{}", "Previous chats:".bright_cyan().bold());
    for (index, session) in sessions.iter().enumerate() {
        println!("{}", format_session_line(index, session));
    }
    Ok(())
}
