use anyhow::Result;
use clap::Parser;

use nyayadoot::app::{run_history_command, run_repl_mode};
use nyayadoot::{AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    nyayadoot_logging::init_logger(cli.verbose);

    let config = AppConfig::load(&cli)?;
    log::debug!("effective config: {:?}", config);

    if let Some(Commands::History { history_file, clear }) = &cli.command {
        let path = history_file.as_deref().or(config.history_file.as_deref());
        return run_history_command(path, *clear);
    }

    run_repl_mode(config).await
}
