pub mod history;
pub mod repl;
pub mod setup;

pub use history::run_history_command;
pub use repl::{run_repl_mode, ReplCommand};
pub use setup::open_history;
