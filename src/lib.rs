//! A command-line rental agreement assistant backed by the Gemini API.

// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod generation;
pub mod observability;
pub mod types;

// Re-exports
pub use client::Gemini;
pub use client_logger::{ClientLogger, JsonLinesLogger};
pub use error::{Error, Result};
pub use generation::{GenerationRequest, GenerationService};
pub use observability::register_biometrics;
pub use types::*;
