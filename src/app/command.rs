//! Line parsing for the chat prompt

use uuid::Uuid;

/// Parsed line from the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a message to the assistant: any line not starting with :
    Say(String),
    /// Leave the chat: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Forget the conversation: :clear
    Clear,
    /// Scope the chat to a path, or drop the scope: :path [<path-id>]
    Path(Option<Uuid>),
    /// Blank line
    Nop,
}

/// Result of parsing a line
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument could not be read
    InvalidArgument { command: String, argument: String },
}

/// Commands listed by :help
pub const HELP: &[(&str, &str)] = &[
    (":path <id>", "Ask about a specific learning path"),
    (":path", "Ask without a path"),
    (":clear", "Start a new conversation"),
    (":help", "Show this help"),
    (":q", "Leave the chat"),
];

/// Parse a prompt line; commands start with :
pub fn parse_line(input: &str) -> ParseResult {
    let input = input.trim();
    match input.strip_prefix(':') {
        Some(command) => parse_command(command),
        None if input.is_empty() => ParseResult::Ok(Command::Nop),
        None => ParseResult::Ok(Command::Say(input.to_string())),
    }
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "quit" | "q" | "exit" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "clear" | "c" => ParseResult::Ok(Command::Clear),
        "path" | "p" => {
            if args.is_empty() {
                ParseResult::Ok(Command::Path(None))
            } else {
                match Uuid::parse_str(args) {
                    Ok(id) => ParseResult::Ok(Command::Path(Some(id))),
                    Err(_) => ParseResult::InvalidArgument {
                        command: "path".to_string(),
                        argument: args.to_string(),
                    },
                }
            }
        }
        "say" => {
            if args.is_empty() {
                ParseResult::MissingArgument("say".to_string())
            } else {
                ParseResult::Ok(Command::Say(args.to_string()))
            }
        }
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}
