use anyhow::{Context, Result};
use nyayadoot_api::ApiConfig;
use nyayadoot_chat::ChatConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "nyayadoot.toml";

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "NYAYADOOT_API_URL";

/// Application configuration
///
/// Layered, lowest to highest: built-in defaults, TOML file, environment,
/// CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    /// Persist history to this file; in-memory when unset
    pub history_file: Option<PathBuf>,
    /// Write a JSONL transcript of each run
    pub log_conversations: bool,
}

impl AppConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Build the effective configuration for this run
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(env::var(API_URL_ENV).ok());
        config.apply_cli(cli);
        Ok(config)
    }

    fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(path) = &cli.history_file {
            self.history_file = Some(path.clone());
        }
        if cli.log {
            self.log_conversations = true;
        }
        self.api.verbose = cli.verbose;
    }
}
