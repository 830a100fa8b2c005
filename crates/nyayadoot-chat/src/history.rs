use log::{debug, warn};
use nyayadoot_types::Session;
use std::sync::{Arc, Mutex};

use crate::store::{KeyValueStore, StoreError};

/// Key holding the JSON array of stored sessions
pub const HISTORY_KEY: &str = "chatHistory";

/// Session list persisted under a single key, most recent first
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    // Serializes read-modify-write cycles issued through this handle
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Stored sessions. Missing or unreadable data is an empty history; a
    /// single entry that does not decode is skipped and the rest are kept.
    pub fn load(&self) -> Vec<Session> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("history unavailable, starting empty: {}", e);
                return Vec::new();
            }
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("ignoring unparseable history under '{}': {}", self.key, e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                serde_json::from_value::<Session>(entry)
                    .map_err(|e| warn!("skipping stored session #{}: {}", index, e))
                    .ok()
            })
            .collect()
    }

    /// Replace the whole stored collection
    pub fn save(&self, sessions: &[Session]) -> Result<(), StoreError> {
        let json = serde_json::to_string(sessions)?;
        self.store.set(&self.key, json)
    }

    /// Insert or replace `session` by id and move it to the front.
    /// Returns the list as written.
    pub fn upsert(&self, session: Session) -> Result<Vec<Session>, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;

        let mut sessions = self.load();
        sessions.retain(|s| s.session_id != session.session_id);
        debug!(
            "storing session {} ({} messages), {} others kept",
            session.session_id,
            session.messages.len(),
            sessions.len()
        );
        sessions.insert(0, session);

        self.save(&sessions)?;
        Ok(sessions)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use nyayadoot_types::{CaseCitation, LegalReference, Message, Stage};
    use pretty_assertions::assert_eq;

    fn history() -> (Arc<MemoryStore>, HistoryStore) {
        let store = Arc::new(MemoryStore::new());
        let history = HistoryStore::new(store.clone());
        (store, history)
    }

    fn session(id: &str, texts: &[&str]) -> Session {
        Session::new(id, texts.iter().map(|t| Message::user(*t)).collect())
    }

    #[test]
    fn test_fresh_store_loads_empty() {
        let (_, history) = history();
        assert!(history.load().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order_and_content() {
        let (_, history) = history();
        let answer = Message::assistant(
            "Section 379 applies.",
            vec![LegalReference {
                act: "IPC".to_string(),
                section_number: "379".to_string(),
                summary: "Theft".to_string(),
            }],
            vec![CaseCitation {
                title: Some("A v. B".to_string()),
                url: Some("https://example.test/a".to_string()),
                ..Default::default()
            }],
            Stage::Sections,
        );
        let sessions = vec![
            Session::new("b", vec![Message::user("second"), answer]),
            session("a", &["first"]),
        ];

        history.save(&sessions).unwrap();
        assert_eq!(history.load(), sessions);
    }

    #[test]
    fn test_unparseable_data_is_empty() {
        let (store, history) = history();
        store.set(HISTORY_KEY, "{\"broken\":".to_string()).unwrap();
        assert!(history.load().is_empty());

        store.set(HISTORY_KEY, "{\"not\":\"a list\"}".to_string()).unwrap();
        assert!(history.load().is_empty());
    }

    #[test]
    fn test_bad_entry_does_not_take_neighbours_with_it() {
        let (store, history) = history();
        history.upsert(session("a", &["a1"])).unwrap();
        history.upsert(session("b", &["b1"])).unwrap();

        let raw = store.get(HISTORY_KEY).unwrap().unwrap();
        let mut entries: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        entries[0]["messages"][0]["type"] = serde_json::json!("system");
        entries.push(serde_json::json!({"messages": "not a session"}));
        store
            .set(HISTORY_KEY, serde_json::to_string(&entries).unwrap())
            .unwrap();

        let loaded = history.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].session_id, "a");

        history.upsert(session("c", &["c1"])).unwrap();
        let ids: Vec<String> = history.load().into_iter().map(|s| s.session_id).collect();
        assert_eq!(ids, vec!["c".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_upsert_replaces_and_moves_to_front() {
        let (_, history) = history();
        history.upsert(session("a", &["a1"])).unwrap();
        history.upsert(session("b", &["b1"])).unwrap();
        history.upsert(session("a", &["a1", "a2"])).unwrap();

        let stored = history.load();
        let ids: Vec<&str> = stored.iter().map(|s| s.session_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(stored[0].messages.len(), 2);
    }

    #[test]
    fn test_reads_layout_written_by_web_client() {
        let (store, history) = history();
        store
            .set(
                HISTORY_KEY,
                r#"[{"session_id":"lx3k9a2bq7c4d1ef","messages":[
                    {"type":"user","content":"My car was stolen yesterday"},
                    {"type":"bot","content":"Please share details.","references":[],"cases":[],"stage":"initial"}
                ],"last_message_time":"2025-03-01T10:15:30.123Z"}]"#
                    .to_string(),
            )
            .unwrap();

        let stored = history.load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].messages[1].stage, Some(Stage::Initial));
        assert_eq!(stored[0].user_message_count(), 1);
    }

    #[test]
    fn test_clear() {
        let (_, history) = history();
        history.upsert(session("a", &["a1"])).unwrap();
        history.clear().unwrap();
        assert!(history.load().is_empty());
    }
}
