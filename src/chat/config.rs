//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved configuration that is
//! handed to a [`ConversationSession`](crate::chat::ConversationSession).

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::API_KEY_ENV_VAR;
use crate::error::{Error, Result};
use crate::types::{GenerationConfig, Model};

/// The role description sent as the system turn of every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "**Assistant Role Description**:\n\n\
You are a helpful chatbot that assists users with Rental Agreement Complexity. \
Help them with their queries and provide search results for the most updated information \
related to their region. \
Always ask them about their region if it is not specified.";

/// Command-line arguments for the rental-assistant-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gemini-2.0-flash)", "MODEL")]
    pub model: Option<String>,

    /// System prompt to set context for the conversation.
    #[arrrg(optional, "System prompt (default: rental agreement assistant)", "PROMPT")]
    pub system: Option<String>,

    /// Maximum tokens per response.
    #[arrrg(optional, "Max output tokens per response (default: model default)", "TOKENS")]
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature.
    #[arrrg(optional, "Sampling temperature 0.0-2.0 (default: model default)", "TEMP")]
    pub temperature: Option<String>,

    /// Base URL of the API.
    #[arrrg(optional, "API base URL (default: Gemini v1beta)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Append every request and response to this file as JSON lines.
    #[arrrg(optional, "Log requests and responses to FILE as JSON lines", "FILE")]
    pub log_file: Option<String>,

    /// Keep the user turn in the transcript when a request fails.
    #[arrrg(flag, "Keep the user's turn in history when a request fails")]
    pub keep_failed_turns: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// What happens to the transcript when the generation service fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Restore the transcript to its state before the failed call.
    #[default]
    Rollback,

    /// Keep the turns appended before the call; no assistant turn is added.
    RetainUserTurn,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Rollback => write!(f, "rollback"),
            FailurePolicy::RetainUserTurn => write!(f, "retain-user-turn"),
        }
    }
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments and the environment.
#[derive(Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// The system prompt inserted at the start of every conversation.
    pub system_prompt: String,

    /// The API key.  `None` fails session construction.
    pub api_key: Option<String>,

    /// Override for the API base URL.
    pub base_url: Option<String>,

    /// Override for the request timeout.
    pub timeout: Option<Duration>,

    /// Sampling controls sent with every request.
    pub generation: GenerationConfig,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// What to do with the transcript when a request fails.
    pub failure_policy: FailurePolicy,

    /// Where to log requests and responses, if anywhere.
    pub log_path: Option<PathBuf>,
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("generation", &self.generation)
            .field("use_color", &self.use_color)
            .field("failure_policy", &self.failure_policy)
            .field("log_path", &self.log_path)
            .finish()
    }
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gemini-2.0-flash
    /// - System prompt: the rental agreement role description
    /// - No API key
    /// - Color: enabled
    /// - Failure policy: rollback
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            api_key: None,
            base_url: None,
            timeout: None,
            generation: GenerationConfig::default(),
            use_color: true,
            failure_policy: FailurePolicy::default(),
            log_path: None,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Fills in the API key from `GEMINI_API_KEY` unless one is already set.
    pub fn with_api_key_from_env(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = env::var(API_KEY_ENV_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        self
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum output tokens per response.
    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.generation.max_output_tokens = max_output_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.generation.temperature = temperature;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Sets the request log path.
    pub fn with_log_path(mut self, path: Option<PathBuf>) -> Self {
        self.log_path = path;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let model = args
            .model
            .map(|s| s.parse::<Model>().unwrap_or(Model::Custom(s)))
            .unwrap_or_default();
        let temperature = args
            .temperature
            .as_deref()
            .map(parse_temperature)
            .transpose()?;
        if args.max_output_tokens == Some(0) {
            return Err(Error::validation(
                "max output tokens must be positive",
                Some("max-output-tokens".to_string()),
            ));
        }
        if args.timeout == Some(0) {
            return Err(Error::validation(
                "timeout must be positive",
                Some("timeout".to_string()),
            ));
        }

        let defaults = ChatConfig::new();
        Ok(ChatConfig {
            model,
            system_prompt: args.system.unwrap_or(defaults.system_prompt),
            base_url: args.base_url,
            timeout: args.timeout.map(Duration::from_secs),
            generation: GenerationConfig {
                max_output_tokens: args.max_output_tokens,
                temperature,
            },
            use_color: !args.no_color,
            failure_policy: if args.keep_failed_turns {
                FailurePolicy::RetainUserTurn
            } else {
                FailurePolicy::Rollback
            },
            log_path: args.log_file.map(PathBuf::from),
            ..defaults
        })
    }
}

fn parse_temperature(value: &str) -> Result<f32> {
    let invalid = || {
        Error::validation(
            format!("temperature expects a value between 0.0 and 2.0, got {value:?}"),
            Some("temperature".to_string()),
        )
    };
    let parsed: f32 = value.trim().parse().map_err(|_| invalid())?;
    if parsed.is_finite() && (0.0..=2.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(invalid())
    }
}
