use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for nyayadoot
#[derive(Parser, Debug)]
#[command(name = "nyayadoot")]
#[command(about = "Nyayadoot - terminal client for the Nyayadoot legal assistant")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (e.g. http://localhost:8000/nyayadoot)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to a TOML config file (default: nyayadoot.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep session history in this JSON file instead of in memory
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Write a JSONL transcript under ~/.nyayadoot/logs
    #[arg(long)]
    pub log: bool,

    /// Enable verbose debug output (shows each query and reply)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List stored sessions, most recent first
    History {
        /// History file to read
        #[arg(long, value_name = "PATH")]
        history_file: Option<PathBuf>,

        /// Delete all stored sessions
        #[arg(long)]
        clear: bool,
    },
}
