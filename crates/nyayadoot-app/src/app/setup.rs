use anyhow::{Context, Result};
use nyayadoot_chat::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
use std::path::Path;
use std::sync::Arc;

/// Open the history backend: a JSON file when a path is given, otherwise
/// memory that lives as long as the process
pub fn open_history(history_file: Option<&Path>) -> Result<HistoryStore> {
    let store: Arc<dyn KeyValueStore> = match history_file {
        Some(path) => {
            log::debug!("using history file {}", path.display());
            Arc::new(
                FileStore::new(path)
                    .with_context(|| format!("Failed to open history file {}", path.display()))?,
            )
        }
        None => Arc::new(MemoryStore::new()),
    };
    Ok(HistoryStore::new(store))
}
