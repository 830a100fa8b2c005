use async_trait::async_trait;
use log::debug;
use nyayadoot_logging::{log_query, log_reply};
use std::time::Duration;

use crate::client::{QueryClient, QueryRequest, QueryResponse};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// reqwest-backed client for the backend's query endpoint
pub struct HttpQueryClient {
    query_url: String,
    verbose: bool,
    client: reqwest::Client,
}

impl HttpQueryClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            query_url: config.query_url(),
            verbose: config.verbose,
            client,
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn query(&self, request: QueryRequest) -> Result<QueryResponse, ApiError> {
        debug!(
            "POST {} (session {}, {} chars)",
            self.query_url,
            request.session_id,
            request.query.chars().count()
        );
        log_query(&self.query_url, &request, self.verbose);

        let response = self
            .client
            .post(&self.query_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        log_reply(status.as_u16(), &response_text, self.verbose);

        if !status.is_success() {
            debug!("backend rejected query with {}", status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let reply: QueryResponse = serde_json::from_str(&response_text)?;
        debug!(
            "backend answered: stage={}, {} references, {} cases",
            reply.stage(),
            reply.references.len(),
            reply.cases.len()
        );

        Ok(reply)
    }
}
