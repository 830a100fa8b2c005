//! Terminal client for the Nyayadoot legal assistant
//!
//! The binary wires the chat controller from `nyayadoot-chat` to the HTTP
//! backend and drives it from an interactive prompt.

pub mod app;
pub mod cli;
pub mod config;

pub use cli::{Cli, Commands};
pub use config::AppConfig;
