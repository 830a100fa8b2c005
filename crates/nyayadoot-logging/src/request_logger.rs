use colored::Colorize;
use serde::Serialize;

use crate::safe_truncate;

const MAX_BODY_CHARS: usize = 5000;

/// Log an outgoing query for debugging (console output)
pub fn log_query<T: Serialize>(url: &str, body: &T, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 QUERY REQUEST".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());
    println!("{}: POST {}", "URL".bright_yellow(), url);

    println!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(body) {
        Ok(json) => print_body(&json),
        Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
    }

    println!("{}", "═".repeat(80).bright_cyan());
}

/// Log the backend's reply for debugging (console output)
pub fn log_reply(status: u16, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_green());
    println!("{}", "📥 QUERY RESPONSE".bright_green().bold());
    println!("{}", "═".repeat(80).bright_green());

    let status_line = format!("{}", status);
    if (200..300).contains(&status) {
        println!("{}: {}", "Status".bright_yellow(), status_line.green());
    } else {
        println!("{}: {}", "Status".bright_yellow(), status_line.red());
    }

    println!("\n{}", "Response Body:".bright_yellow());
    match serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
    {
        Ok(pretty) => print_body(&pretty),
        Err(_) => print_body(body),
    }

    println!("{}", "═".repeat(80).bright_green());
    println!();
}

fn print_body(text: &str) {
    if text.chars().count() > MAX_BODY_CHARS {
        println!("{}", safe_truncate(text, MAX_BODY_CHARS));
        println!(
            "\n{}",
            format!("... (truncated, total {} bytes)", text.len()).bright_black()
        );
    } else {
        println!("{}", text);
    }
}
