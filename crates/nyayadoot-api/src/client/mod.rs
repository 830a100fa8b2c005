use async_trait::async_trait;
use nyayadoot_types::{deserialize_string_or_null, deserialize_vec_or_null, CaseCitation, LegalReference, Stage};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub mod http;

/// Body of `POST <base>/query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub session_id: String,
}

/// Backend answer to a query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub answer: String,
    #[serde(deserialize_with = "deserialize_vec_or_null", default)]
    pub references: Vec<LegalReference>,
    #[serde(deserialize_with = "deserialize_vec_or_null", default)]
    pub cases: Vec<CaseCitation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub conversation_stage: Option<String>,
    /// Echo of the session id; the client keeps its own and ignores this
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
}

impl QueryResponse {
    /// Stage of the conversation after this answer, `initial` when absent
    pub fn stage(&self) -> Stage {
        Stage::from_label(self.conversation_stage.as_deref())
    }
}

/// The backend the chat controller talks to
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Send one user query and wait for the answer
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse, ApiError>;
}
