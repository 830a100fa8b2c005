//! Conversation state for the nyayadoot client
//!
//! `ChatController` owns the active session and drives each turn against a
//! `QueryClient`. Finished sessions go to a `HistoryStore`, which sits on top
//! of any `KeyValueStore`.

pub mod config;
pub mod controller;
pub mod history;
pub mod session_id;
pub mod store;
pub mod suggestions;

pub use config::ChatConfig;
pub use controller::{ChatController, PendingTurn, TurnOutcome, TurnRejected};
pub use history::{HistoryStore, HISTORY_KEY};
pub use session_id::generate_session_id;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use suggestions::{prompts_for, suggestions_for, WELCOME_PROMPTS};
