// Logging module - logger setup, request tracing and conversation logs
pub mod conversation_logger;
pub mod request_logger;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub use conversation_logger::ConversationLogger;

pub use request_logger::{log_query, log_reply};

/// Initialise the global `log` backend
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` for the
/// nyayadoot crates and `warn` for everything else.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "warn,nyayadoot=debug,nyayadoot_api=debug,nyayadoot_chat=debug"
    } else {
        "warn"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Get or create the base nyayadoot directory (~/.nyayadoot)
pub fn get_nyayadoot_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let dir = PathBuf::from(home_dir).join(".nyayadoot");

    if !dir.exists() {
        std::fs::create_dir_all(&dir).context("Failed to create nyayadoot directory")?;
    }

    Ok(dir)
}

/// Get or create the logs directory (~/.nyayadoot/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_nyayadoot_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir).context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate() {
        assert_eq!(safe_truncate("short", 10), "short");
        assert_eq!(safe_truncate("abcdefghij", 6), "abc...");
        assert_eq!(safe_truncate("धारा ३७९ भारतीय", 7), "धारा...");
        assert_eq!(safe_truncate("abcdef", 2), "...");
    }
}
