use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO‑8601 Local time
    session_id: &'a str,
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cases: Option<usize>,
}

/// Append-only JSONL transcript of every message in a run
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger in `dir`; the file name is based on the current local time.
    pub async fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).await?;

        let filename = format!("nyayadoot-{}.jsonl", Local::now().format("%Y-%m-%d-%H%M%S"));
        let file_path = dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append a user message
    pub async fn log_user(&mut self, session_id: &str, content: &str) {
        self.write(LogEntry {
            timestamp: Local::now().to_rfc3339(),
            session_id,
            role: "user",
            content,
            stage: None,
            references: None,
            cases: None,
        })
        .await;
    }

    /// Append an assistant message with its citation counts
    pub async fn log_assistant(
        &mut self,
        session_id: &str,
        content: &str,
        stage: Option<&str>,
        references: usize,
        cases: usize,
    ) {
        self.write(LogEntry {
            timestamp: Local::now().to_rfc3339(),
            session_id,
            role: "assistant",
            content,
            stage,
            references: Some(references),
            cases: Some(cases),
        })
        .await;
    }

    async fn write(&mut self, entry: LogEntry<'_>) {
        let Some(file) = &mut self.file else {
            return;
        };
        let Ok(json) = serde_json::to_string(&entry) else {
            return;
        };
        if let Err(e) = file.write_all(json.as_bytes()).await {
            log::warn!("conversation log write failed: {}", e);
        } else if let Err(e) = file.write_all(b"\n").await {
            log::warn!("conversation log write failed: {}", e);
        } else {
            let _ = file.flush().await;
        }
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}
