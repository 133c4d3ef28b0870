//! Command parsing for the chat application.
//!
//! Two literal words control the session instead of being sent to the model: `exit` and
//! `reset`.  Matching ignores case and surrounding whitespace; everything else is a message.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Clear the conversation history.
    Reset,

    /// Exit the chat application.
    Exit,
}

/// Parses user input for commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be sent to the model as a message.
///
/// # Examples
///
/// ```
/// # use rental_assistant::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("EXIT"), Some(ChatCommand::Exit));
/// assert_eq!(parse_command("reset"), Some(ChatCommand::Reset));
/// assert!(parse_command("Can my landlord raise the rent?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("exit") {
        Some(ChatCommand::Exit)
    } else if input.eq_ignore_ascii_case("reset") {
        Some(ChatCommand::Reset)
    } else {
        None
    }
}

/// Returns the banner describing available commands.
pub fn banner_text() -> &'static str {
    "Rental Agreement Assistant (type 'exit' to quit, 'reset' to start over)\n\
-------------------------------------------------------------------"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exit() {
        assert_eq!(parse_command("exit"), Some(ChatCommand::Exit));
        assert_eq!(parse_command("EXIT"), Some(ChatCommand::Exit));
        assert_eq!(parse_command("Exit"), Some(ChatCommand::Exit));
        assert_eq!(parse_command("  exit  "), Some(ChatCommand::Exit));
    }

    #[test]
    fn parse_reset() {
        assert_eq!(parse_command("reset"), Some(ChatCommand::Reset));
        assert_eq!(parse_command("ReSeT"), Some(ChatCommand::Reset));
        assert_eq!(parse_command("\treset\n"), Some(ChatCommand::Reset));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello, I need help with my rental agreement."), None);
        assert_eq!(parse_command("exit please"), None);
        assert_eq!(parse_command("/reset"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn banner_mentions_commands() {
        let banner = banner_text();
        assert!(banner.starts_with("Rental Agreement Assistant"));
        assert!(banner.contains("'exit'"));
        assert!(banner.contains("'reset'"));
        assert!(banner.lines().nth(1).unwrap().chars().all(|c| c == '-'));
    }
}
