use serde::{Deserialize, Serialize};

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/nyayadoot";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the query backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Print each request and response to the console
    #[serde(skip)]
    pub verbose: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verbose: false,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the query endpoint
    pub fn query_url(&self) -> String {
        format!("{}/query", normalize_base_url(&self.base_url))
    }
}

/// Normalize a base URL: trim whitespace, trailing slashes and a trailing
/// `/query` so the endpoint path is appended exactly once
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/query")
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url_from_default() {
        let config = ApiConfig::default();
        assert_eq!(config.query_url(), "http://localhost:8000/nyayadoot/query");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://host/api/"), "http://host/api");
        assert_eq!(normalize_base_url(" http://host/api/query "), "http://host/api");
        assert_eq!(normalize_base_url("http://host"), "http://host");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ApiConfig = from_json(r#"{"base_url":"http://example.test"}"#);
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    fn from_json(json: &str) -> ApiConfig {
        serde_json::from_str(json).unwrap()
    }
}
