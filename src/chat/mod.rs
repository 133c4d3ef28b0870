//! Chat application module for interactive conversations with the rental assistant.
//!
//! This module provides the pieces of the REPL built on top of the Gemini client:
//!
//! - A conversation session that owns the transcript
//! - ANSI-styled output
//! - The `exit` and `reset` commands
//! - Configuration from the command line and environment
//!
//! # Architecture
//!
//! - `config`: CLI argument parsing and configuration
//! - `session`: Transcript management and service interaction
//! - `commands`: Command parsing
//! - `render`: Output rendering

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, banner_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_SYSTEM_PROMPT, FailurePolicy};
pub use render::{ASSISTANT_LABEL, PlainTextRenderer, Renderer};
pub use session::ConversationSession;
