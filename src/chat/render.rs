//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so that the REPL does not print
//! directly.  The default implementation writes plain text with optional ANSI styling.

use std::io::{self, Stdout, Write};

use super::config::ChatConfig;

/// ANSI escape code for bold text (used for the assistant label).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for cyan text (used for the assistant label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for dim text (used for informational messages).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Label printed in front of every reply.
pub const ASSISTANT_LABEL: &str = "Assistant:";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
pub trait Renderer: Send {
    /// Print the assistant's reply to one message.
    fn print_reply(&mut self, text: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Output goes to stdout unless another writer is supplied.  Write errors are ignored; there is
/// nowhere better to report them.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }

    /// Creates a stdout renderer styled according to `config`.
    pub fn for_config(config: &ChatConfig) -> Self {
        Self::with_color(config.use_color)
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer that writes to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Consumes the renderer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&mut self, style: &str, text: &str) {
        if self.use_color {
            let _ = write!(self.out, "{style}{text}{ANSI_RESET}");
        } else {
            let _ = write!(self.out, "{text}");
        }
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_reply(&mut self, text: &str) {
        let _ = writeln!(self.out);
        self.styled(&format!("{ANSI_BOLD}{ANSI_CYAN}"), ASSISTANT_LABEL);
        let _ = writeln!(self.out, " {text}\n");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.styled(ANSI_RED, "Error:");
        let _ = writeln!(self.out, " {error}");
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        self.styled(ANSI_DIM, info);
        let _ = writeln!(self.out);
        self.flush();
    }
}
