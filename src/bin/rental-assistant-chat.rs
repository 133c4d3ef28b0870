//! Interactive chat application for the rental agreement assistant.
//!
//! This binary provides a REPL for asking a Gemini model about rental agreements.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage; the key comes from GEMINI_API_KEY or a .env file
//! rental-assistant-chat
//!
//! # Specify a model
//! rental-assistant-chat --model gemini-1.5-pro
//!
//! # Record all traffic
//! rental-assistant-chat --log-file chat.jsonl
//!
//! # Disable colors (useful for piping output)
//! rental-assistant-chat --no-color
//! ```
//!
//! # Commands
//!
//! - `reset` - Clear conversation history
//! - `exit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use rental_assistant::chat::{
    ChatArgs, ChatCommand, ChatConfig, ConversationSession, PlainTextRenderer, Renderer,
    banner_text, parse_command,
};
use rental_assistant::client::API_KEY_ENV_VAR;

/// Main entry point for the rental-assistant-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let (args, _) = ChatArgs::from_command_line_relaxed("rental-assistant-chat [OPTIONS]");
    let config = match ChatConfig::try_from(args) {
        Ok(config) => config.with_api_key_from_env(),
        Err(err) => {
            PlainTextRenderer::new().print_error(&err.to_string());
            std::process::exit(2);
        }
    };
    let mut renderer = PlainTextRenderer::for_config(&config);

    let mut session = match ConversationSession::new(config) {
        Ok(session) => session,
        Err(err) => {
            renderer.print_error(&err.to_string());
            if err.is_missing_credential() {
                renderer.print_info(&format!(
                    "Set {API_KEY_ENV_VAR} in the environment or in a .env file."
                ));
            }
            std::process::exit(1);
        }
    };
    let mut rl = DefaultEditor::new()?;

    println!("{}", banner_text());

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Exit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Reset => {
                            session.reset();
                            renderer.print_info("Chat history has been reset.");
                        }
                    }
                    continue;
                }

                match session.chat(&line).await {
                    Ok(reply) => renderer.print_reply(&reply),
                    Err(err) => renderer.print_error(&err.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}
