//! Chat transcript

use super::wrapped;
use crate::ai::{ChatMessage, Role};
use crate::app::command::HELP;

const USER_PREFIX: &str = "you";
const ASSISTANT_PREFIX: &str = "assistant";

/// Render one turn, wrapped under its speaker
pub fn turn(message: &ChatMessage, width: usize) -> String {
    let speaker = match message.role {
        Role::User => USER_PREFIX,
        Role::Assistant => ASSISTANT_PREFIX,
    };
    let mut lines = vec![format!("{}:", speaker)];
    for paragraph in message.content.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped(paragraph, width, "  "));
        }
    }
    lines.join("\n")
}

/// Greeting shown when the chat opens
pub fn banner(path_title: Option<&str>) -> String {
    let scope = match path_title {
        Some(title) => format!("Ask anything about \"{}\".", title),
        None => "Ask anything about what you are learning.".to_string(),
    };
    format!("AI Learning Assistant\n{} Type :help for commands.", scope)
}

pub fn help() -> String {
    HELP.iter()
        .map(|(cmd, desc)| format!("  {:<12} {}", cmd, desc))
        .collect::<Vec<_>>()
        .join("\n")
}
