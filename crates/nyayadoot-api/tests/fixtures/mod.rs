use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock backend for testing the query client
pub struct BackendMockServer {
    server: MockServer,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to `ApiConfig`, including the app prefix
    pub fn base_url(&self) -> String {
        format!("{}/nyayadoot", self.server.uri())
    }

    /// Mock a successful answer for a given query text
    pub async fn mock_answer(&self, query: &str, body: Value) {
        Mock::given(method("POST"))
            .and(path("/nyayadoot/query"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({ "query": query })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock an answer that must carry the given session id
    pub async fn mock_answer_for_session(&self, session_id: &str, body: Value) {
        Mock::given(method("POST"))
            .and(path("/nyayadoot/query"))
            .and(body_partial_json(json!({ "session_id": session_id })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock server error
    pub async fn mock_server_error(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "Internal server error"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 with a body that is not a query response
    pub async fn mock_garbage(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&self.server)
            .await;
    }

    /// Mock a response slower than any sane client timeout
    pub async fn mock_slow(&self, delay: std::time::Duration) {
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "answer": "late" }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }
}

/// Sample backend payloads
pub mod test_data {
    use super::*;

    pub fn theft_answer() -> Value {
        json!({
            "answer": "## Theft\n\nVehicle theft falls under **Section 379 IPC**.",
            "references": [
                { "act": "Indian Penal Code", "section_number": "379", "summary": "Punishment for theft" }
            ],
            "cases": [
                { "title": "State of Maharashtra v. Vishwanath", "citation": "AIR 1979 SC 1825" },
                { "url": "https://indiankanoon.org/doc/42/" }
            ],
            "session_id": "ignored-by-client",
            "conversation_stage": "sections"
        })
    }
}
