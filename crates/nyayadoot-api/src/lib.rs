//! # nyayadoot-api
//!
//! Client for the legal-assistant backend's query endpoint.
//!
//! ## Features
//!
//! - **One trait**: `QueryClient` is the seam the chat controller depends on,
//!   so tests can swap in a scripted fake
//! - **HTTP backend**: `HttpQueryClient` posts to `<base>/query` with reqwest
//! - **Uniform failures**: transport errors, non-2xx statuses and undecodable
//!   bodies all surface as `ApiError`
//!
//! ## Example
//!
//! ```rust,no_run
//! use nyayadoot_api::{ApiConfig, HttpQueryClient, QueryClient, QueryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nyayadoot_api::ApiError> {
//!     let client = HttpQueryClient::new(ApiConfig::default())?;
//!
//!     let reply = client
//!         .query(QueryRequest {
//!             query: "My car was stolen yesterday".to_string(),
//!             session_id: "lx3k9a2bq7c4d1ef".to_string(),
//!         })
//!         .await?;
//!     println!("{}", reply.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use client::{http::HttpQueryClient, QueryClient, QueryRequest, QueryResponse};

pub use config::{normalize_base_url, ApiConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

pub use error::ApiError;
