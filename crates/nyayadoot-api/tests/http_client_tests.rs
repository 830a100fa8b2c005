mod fixtures;

use std::time::Duration;

use fixtures::{test_data, BackendMockServer};
use nyayadoot_api::{ApiConfig, ApiError, HttpQueryClient, QueryClient, QueryRequest};
use nyayadoot_types::Stage;
use pretty_assertions::assert_eq;

fn request(query: &str, session_id: &str) -> QueryRequest {
    QueryRequest {
        query: query.to_string(),
        session_id: session_id.to_string(),
    }
}

fn client_for(server: &BackendMockServer) -> HttpQueryClient {
    HttpQueryClient::new(ApiConfig::with_base_url(server.base_url())).unwrap()
}

#[tokio::test]
async fn test_query_decodes_full_answer() {
    let server = BackendMockServer::new().await;
    server
        .mock_answer("My car was stolen yesterday", test_data::theft_answer())
        .await;

    let reply = client_for(&server)
        .query(request("My car was stolen yesterday", "s-1"))
        .await
        .unwrap();

    assert!(reply.answer.contains("Section 379"));
    assert_eq!(reply.references.len(), 1);
    assert_eq!(reply.references[0].act, "Indian Penal Code");
    assert_eq!(reply.cases[0].display_title(0), "State of Maharashtra v. Vishwanath");
    assert_eq!(reply.cases[1].display_title(1), "Case 2");
    assert_eq!(reply.stage(), Stage::Sections);
}

#[tokio::test]
async fn test_query_sends_session_id() {
    let server = BackendMockServer::new().await;
    server
        .mock_answer_for_session("lx3k9a2bq7c4d1ef", serde_json::json!({ "answer": "ok" }))
        .await;

    let reply = client_for(&server)
        .query(request("Hello", "lx3k9a2bq7c4d1ef"))
        .await
        .unwrap();

    assert_eq!(reply.answer, "ok");
    assert_eq!(reply.stage(), Stage::Initial);
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = BackendMockServer::new().await;
    server
        .mock_answer("Hello", serde_json::json!({ "answer": "hi" }))
        .await;

    let config = ApiConfig::with_base_url(format!("{}/", server.base_url()));
    let client = HttpQueryClient::new(config).unwrap();
    assert!(client.query_url().ends_with("/nyayadoot/query"));

    let reply = client.query(request("Hello", "s-2")).await.unwrap();
    assert_eq!(reply.answer, "hi");
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = BackendMockServer::new().await;
    server.mock_server_error().await;

    let err = client_for(&server)
        .query(request("Hello", "s-3"))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal server error"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let server = BackendMockServer::new().await;
    server.mock_garbage().await;

    let err = client_for(&server)
        .query(request("Hello", "s-4"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = BackendMockServer::new().await;
    server.mock_slow(Duration::from_secs(5)).await;

    let config = ApiConfig {
        timeout_secs: 1,
        ..ApiConfig::with_base_url(server.base_url())
    };
    let err = HttpQueryClient::new(config)
        .unwrap()
        .query(request("Hello", "s-5"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = HttpQueryClient::new(ApiConfig::with_base_url("http://127.0.0.1:1/nyayadoot")).unwrap();
    let err = client.query(request("Hello", "s-6")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
