use anyhow::Result;
use colored::Colorize;
use nyayadoot_api::HttpQueryClient;
use nyayadoot_chat::{ChatController, TurnOutcome};
use nyayadoot_logging::{get_logs_dir, ConversationLogger};
use nyayadoot_types::{Message, PREVIEW_CHARS};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::history::format_session_line;
use super::setup::open_history;
use crate::config::AppConfig;

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Exit,
    Help,
    NewSession,
    ListHistory,
    /// 1-based position in the history list
    Open(usize),
    ShowSuggestions,
    /// 1-based position in the suggestion list
    SendSuggestion(usize),
    DismissPopup,
    Unknown(String),
    Send(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => return Self::Empty,
            "exit" | "quit" => return Self::Exit,
            "/help" => return Self::Help,
            "/new" => return Self::NewSession,
            "/history" => return Self::ListHistory,
            "/suggest" => return Self::ShowSuggestions,
            "/dismiss" => return Self::DismissPopup,
            _ => {}
        }

        if let Some(rest) = line.strip_prefix("/open") {
            return match rest.trim().parse::<usize>() {
                Ok(n) if n > 0 => Self::Open(n),
                _ => Self::Unknown(line.to_string()),
            };
        }
        if let Some(rest) = line.strip_prefix('/') {
            return match rest.parse::<usize>() {
                Ok(n) if n > 0 => Self::SendSuggestion(n),
                _ => Self::Unknown(line.to_string()),
            };
        }
        Self::Send(line.to_string())
    }
}

/// Run the interactive chat loop
pub async fn run_repl_mode(config: AppConfig) -> Result<()> {
    let client = HttpQueryClient::new(config.api.clone())?;
    let history = open_history(config.history_file.as_deref())?;
    let mut chat = ChatController::new(config.chat.clone(), history);

    println!("{}", "⚖️  Nyayadoot - your legal assistant".bright_cyan().bold());
    println!("{}", format!("Backend: {}", client.query_url()).bright_black());
    if let Some(path) = &config.history_file {
        println!("{}", format!("History file: {}", path.display()).bright_black());
    }
    println!("{}", "Type '/help' for commands, 'exit' or 'quit' to leave\n".bright_black());

    let mut logger = if config.log_conversations {
        match open_conversation_log().await {
            Ok(logger) => {
                println!(
                    "{}",
                    format!("Transcript: {}", logger.file_path().display()).bright_black()
                );
                Some(logger)
            }
            Err(e) => {
                eprintln!("Logging disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    print_suggestions(&chat);

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        };

        let text = match ReplCommand::parse(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Exit => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            ReplCommand::Help => {
                print_help();
                continue;
            }
            ReplCommand::NewSession => {
                chat.start_new_session();
                println!("{} Started a new chat", "✨".bright_green());
                print_suggestions(&chat);
                continue;
            }
            ReplCommand::ListHistory => {
                print_history(&chat);
                continue;
            }
            ReplCommand::Open(n) => {
                match chat.select_session_by_index(n - 1) {
                    Some(session) => {
                        println!(
                            "{} Opened chat: {}\n",
                            "📂".bright_green(),
                            session.preview(PREVIEW_CHARS)
                        );
                        for message in chat.messages() {
                            print_message(message);
                        }
                    }
                    None => eprintln!("{} No stored chat #{}", "❌".bright_red(), n),
                }
                continue;
            }
            ReplCommand::ShowSuggestions => {
                print_suggestions(&chat);
                continue;
            }
            ReplCommand::SendSuggestion(n) => match chat.suggestion_prompts().get(n - 1) {
                Some(prompt) => {
                    println!("{} {}", "You:".bright_green().bold(), prompt);
                    prompt.to_string()
                }
                None => {
                    eprintln!("{} No suggestion #{}", "❌".bright_red(), n);
                    continue;
                }
            },
            ReplCommand::DismissPopup => {
                chat.dismiss_popup();
                continue;
            }
            ReplCommand::Unknown(cmd) => {
                eprintln!("{} Unknown command '{}'. Try /help", "❌".bright_red(), cmd);
                continue;
            }
            ReplCommand::Send(text) => text,
        };

        let _ = rl.add_history_entry(text.as_str());

        if let Some(logger) = &mut logger {
            logger.log_user(chat.session_id(), &text).await;
        }

        chat.set_input(text);
        let outcome = chat.submit_input(&client).await;

        match outcome {
            TurnOutcome::Answered | TurnOutcome::Failed => {
                if let Some(reply) = chat.messages().last() {
                    if let Some(logger) = &mut logger {
                        logger
                            .log_assistant(
                                chat.session_id(),
                                &reply.content,
                                reply.stage.map(|s| s.as_str()),
                                reply.references.len(),
                                reply.cases.len(),
                            )
                            .await;
                    }
                    print_message(reply);
                }
                if chat.popup_visible() {
                    print_popup(&chat.config().promo_message);
                }
                print_suggestions(&chat);
            }
            TurnOutcome::Busy => {
                println!("{}", "Still waiting for the previous answer".bright_yellow());
            }
            TurnOutcome::Ignored | TurnOutcome::Detached | TurnOutcome::Stale => {}
        }
    }

    if let Some(logger) = &mut logger {
        logger.shutdown().await;
    }

    Ok(())
}

async fn open_conversation_log() -> Result<ConversationLogger> {
    let dir = get_logs_dir()?;
    ConversationLogger::new(&dir).await
}

fn print_help() {
    println!("{} Commands:", "💡".bright_cyan());
    println!("  /new           - Start a new chat");
    println!("  /history       - List previous chats");
    println!("  /open <n>      - Continue previous chat number n");
    println!("  /suggest       - Show suggested questions");
    println!("  /<n>           - Ask suggested question number n");
    println!("  /dismiss       - Hide the notice banner");
    println!("  /help          - Show this help");
    println!("  exit, quit     - Leave");
}

fn print_history(chat: &ChatController) {
    let sessions = chat.sessions();
    if sessions.is_empty() {
        println!("{}", "No previous chats.".bright_black());
        return;
    }
    println!("{}", "Previous chats:".bright_cyan().bold());
    for (index, session) in sessions.iter().enumerate() {
        let line = format_session_line(index, session);
        if session.session_id == chat.session_id() {
            println!("{}", line.bright_white().bold());
        } else {
            println!("{}", line);
        }
    }
}

fn print_suggestions(chat: &ChatController) {
    println!("{}", "Suggested questions:".bright_black());
    for (index, prompt) in chat.suggestion_prompts().iter().enumerate() {
        println!("  {} {}", format!("/{}", index + 1).bright_magenta(), prompt);
    }
    println!();
}

fn print_popup(promo: &str) {
    let width = promo.chars().count() + 4;
    println!("{}", format!("┌{}┐", "─".repeat(width)).bright_yellow());
    println!("{}", format!("│  {}  │", promo).bright_yellow().bold());
    println!("{}", format!("└{}┘", "─".repeat(width)).bright_yellow());
    println!("{}", "(/dismiss to hide)".bright_black());
}

fn print_message(message: &Message) {
    if message.is_user() {
        println!("{} {}", "You:".bright_green().bold(), message.content);
        return;
    }

    println!("\n{} {}", "Nyayadoot:".bright_blue().bold(), message.content);

    if !message.references.is_empty() {
        println!("\n{}", "Legal references:".bright_cyan());
        for reference in &message.references {
            println!(
                "  • {} Section {}: {}",
                reference.act.bold(),
                reference.section_number,
                reference.summary
            );
        }
    }

    if !message.cases.is_empty() {
        println!("\n{}", "Relevant cases:".bright_cyan());
        for (index, case) in message.cases.iter().enumerate() {
            println!("  • {}", case.display_title(index).bold());
            if let Some(citation) = case.citation.as_deref().filter(|c| !c.is_empty()) {
                println!("    {}", citation.bright_black());
            }
            if let Some(summary) = case.summary.as_deref().filter(|s| !s.is_empty()) {
                println!("    {}", summary);
            }
            if let Some(url) = case.url.as_deref().filter(|u| !u.is_empty()) {
                println!("    {}", url.underline());
            }
        }
    }
    println!();
}
