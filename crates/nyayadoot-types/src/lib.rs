//! Core types and structures for nyayadoot
//!
//! This crate provides the conversation data model shared by the API client,
//! the chat controller and the terminal front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Number of user messages between promotional interstitials
pub const DEFAULT_POPUP_THRESHOLD: u32 = 5;

/// Assistant message shown when a turn fails
pub const DEFAULT_ERROR_MESSAGE: &str = "Sorry, an error occurred. Please try again.";

/// Number of characters of the opening message shown in history listings
pub const PREVIEW_CHARS: usize = 25;

// ============================================================================
// Stage
// ============================================================================

/// Conversation stage reported by the backend
///
/// Parsing is total: anything the client does not recognise is `Initial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stage {
    #[default]
    Initial,
    Details,
    Sections,
    Cases,
    Impact,
    Followup,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Initial,
        Stage::Details,
        Stage::Sections,
        Stage::Cases,
        Stage::Impact,
        Stage::Followup,
    ];

    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("details") => Stage::Details,
            Some("sections") => Stage::Sections,
            Some("cases") => Stage::Cases,
            Some("impact") => Stage::Impact,
            Some("followup") => Stage::Followup,
            _ => Stage::Initial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::Details => "details",
            Stage::Sections => "sections",
            Stage::Cases => "cases",
            Stage::Impact => "impact",
            Stage::Followup => "followup",
        }
    }
}

impl From<String> for Stage {
    fn from(label: String) -> Self {
        Stage::from_label(Some(&label))
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.as_str().to_string()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Helper function to deserialize a list or null values
pub fn deserialize_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Helper function to deserialize string or null values
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

/// Author of a message. Stored as `user` / `bot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot", alias = "assistant")]
    Assistant,
}

/// A statute section cited in an answer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegalReference {
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub act: String,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub section_number: String,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub summary: String,
}

/// A court case cited in an answer
///
/// The backend names the case either `title` or `name`; both are kept so a
/// stored message round-trips unchanged. Any other fields the backend sends
/// (`snippet`, `case_name`, ...) are carried in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaseCitation {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub citation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CaseCitation {
    /// Title to display for the case at `index` (0-based) in its list
    pub fn display_title(&self, index: usize) -> String {
        [&self.title, &self.name]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Case {}", index + 1))
    }
}

/// One entry in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub content: String,
    #[serde(deserialize_with = "deserialize_vec_or_null", default)]
    pub references: Vec<LegalReference>,
    #[serde(deserialize_with = "deserialize_vec_or_null", default)]
    pub cases: Vec<CaseCitation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stage: Option<Stage>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            references: Vec::new(),
            cases: Vec::new(),
            stage: None,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        references: Vec<LegalReference>,
        cases: Vec<CaseCitation>,
        stage: Stage,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            references,
            cases,
            stage: Some(stage),
        }
    }

    /// Assistant message carrying only text, used for failed turns
    pub fn assistant_notice(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            references: Vec::new(),
            cases: Vec::new(),
            stage: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// A stored conversation thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default = "Utc::now")]
    pub last_message_time: DateTime<Utc>,
}

impl Session {
    pub fn new(session_id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            session_id: session_id.into(),
            messages,
            last_message_time: Utc::now(),
        }
    }

    /// Short label built from the opening message
    pub fn preview(&self, max_chars: usize) -> String {
        let first = self
            .messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        format!("{}...", first.chars().take(max_chars).collect::<String>())
    }

    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }
}
