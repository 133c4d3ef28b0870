//! Core chat session management.
//!
//! This module provides the [`ConversationSession`] struct which owns the transcript of a
//! conversation and mediates every exchange with the generation service.

use std::fmt;
use std::sync::Arc;

use crate::chat::config::{ChatConfig, FailurePolicy};
use crate::client::Gemini;
use crate::client_logger::JsonLinesLogger;
use crate::error::Result;
use crate::generation::{GenerationRequest, GenerationService};
use crate::observability::{SESSION_EXCHANGES, SESSION_FAILED_EXCHANGES, SESSION_RESETS};
use crate::types::{Model, Turn};

/// A conversation: an ordered transcript plus the service that extends it.
///
/// The transcript obeys these rules:
///
/// - a system turn is inserted exactly when `chat` starts on an empty transcript, so there is at
///   most one and it is always first;
/// - after it, user and assistant turns alternate in pairs.
///
/// A failed exchange leaves the transcript as dictated by the session's [`FailurePolicy`].
pub struct ConversationSession<S: GenerationService = Gemini> {
    service: S,
    config: ChatConfig,
    transcript: Vec<Turn>,
}

impl<S: GenerationService> fmt::Debug for ConversationSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationSession")
            .field("config", &self.config)
            .field("transcript", &self.transcript)
            .finish_non_exhaustive()
    }
}

impl ConversationSession<Gemini> {
    /// Creates a session talking to Gemini.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingCredential`](crate::Error::MissingCredential) when the
    /// configuration has no API key, and with an I/O error when the request log cannot be
    /// opened.
    pub fn new(config: ChatConfig) -> Result<Self> {
        let mut client = Gemini::with_options(
            config.api_key.clone(),
            config.base_url.clone(),
            config.timeout,
        )?;
        if let Some(path) = &config.log_path {
            client = client.with_logger(Arc::new(JsonLinesLogger::open(path)?));
        }
        Ok(Self::with_service(config, client))
    }
}

impl<S: GenerationService> ConversationSession<S> {
    /// Creates a session with a custom generation service.
    pub fn with_service(config: ChatConfig, service: S) -> Self {
        Self {
            service,
            config,
            transcript: Vec::new(),
        }
    }

    /// Sends a user message and returns the assistant's reply.
    ///
    /// This method:
    /// 1. Adds the system turn if the transcript is empty
    /// 2. Adds the user turn
    /// 3. Asks the generation service for a reply, passing the whole transcript
    /// 4. Adds the assistant turn and returns its text
    ///
    /// No validation is done on `user_text`; an empty string is sent like any other.
    ///
    /// # Errors
    ///
    /// Returns the generation service's error unchanged.  No assistant turn is added, and the
    /// turns added in steps 1 and 2 are removed unless the policy is
    /// [`FailurePolicy::RetainUserTurn`].
    pub async fn chat(&mut self, user_text: &str) -> Result<String> {
        let previous_len = self.transcript.len();

        if self.transcript.is_empty() {
            self.transcript
                .push(Turn::system(self.config.system_prompt.clone()));
        }
        self.transcript.push(Turn::user(user_text));

        let request = GenerationRequest {
            model: &self.config.model,
            transcript: &self.transcript,
            generation_config: &self.config.generation,
        };
        let outcome = self.service.generate(request).await;

        match outcome {
            Ok(reply) => {
                SESSION_EXCHANGES.click();
                self.transcript.push(Turn::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                SESSION_FAILED_EXCHANGES.click();
                if self.config.failure_policy == FailurePolicy::Rollback {
                    self.transcript.truncate(previous_len);
                }
                Err(err)
            }
        }
    }

    /// Clears the conversation history.
    pub fn reset(&mut self) {
        SESSION_RESETS.click();
        self.transcript.clear();
    }

    /// Returns the transcript, oldest turn first.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Returns the number of turns in the conversation.
    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Returns the system prompt used to open conversations.
    pub fn system_prompt(&self) -> &str {
        &self.config.system_prompt
    }

    /// Returns what happens to the transcript when a request fails.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.config.failure_policy
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the generation service.
    pub fn service(&self) -> &S {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::Error;
    use crate::types::Role;

    /// Replies from a queue and records every transcript it was shown.
    #[derive(Default)]
    struct ScriptedService {
        replies: Mutex<VecDeque<Result<String>>>,
        seen: Mutex<Vec<Vec<Turn>>>,
    }

    impl ScriptedService {
        fn new(replies: impl IntoIterator<Item = Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<Turn>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl GenerationService for ScriptedService {
        async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
            self.seen.lock().unwrap().push(request.transcript.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::empty_response("script exhausted", None)))
        }
    }

    fn roles(session: &ConversationSession<ScriptedService>) -> Vec<Role> {
        session.transcript().iter().map(Turn::role).collect()
    }

    #[test]
    fn new_session_empty() {
        let service = ScriptedService::default();
        let session = ConversationSession::with_service(ChatConfig::default(), service);
        assert_eq!(session.turn_count(), 0);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn new_requires_credential() {
        let err = assert_err!(ConversationSession::new(ChatConfig::new()));
        assert!(err.is_missing_credential());
        assert!(!err.is_remote());

        let session = assert_ok!(ConversationSession::new(
            ChatConfig::new().with_api_key("test-key")
        ));
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.model(), &Model::default());
    }

    #[tokio::test]
    async fn first_chat_adds_system_user_assistant() {
        let reply = "I'm a helpful assistant. What region are you inquiring about?";
        let service = ScriptedService::new([Ok(reply.to_string())]);
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);

        let response = assert_ok!(
            session
                .chat("Hello, I need help with my rental agreement.")
                .await
        );
        assert_eq!(response, reply);

        assert_eq!(
            session.transcript(),
            &[
                Turn::system(session.system_prompt()),
                Turn::user("Hello, I need help with my rental agreement."),
                Turn::assistant(reply),
            ]
        );
        assert_eq!(roles(&session), [Role::System, Role::User, Role::Assistant]);

        let calls = session.service().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], session.transcript()[..2]);
    }

    #[tokio::test]
    async fn later_chats_add_two_turns() {
        let service = ScriptedService::new([
            Ok("Which region?".to_string()),
            Ok("Ontario caps increases.".to_string()),
            Ok("You're welcome.".to_string()),
        ]);
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);

        assert_ok!(session.chat("Can my rent go up?").await);
        let system = session.transcript()[0].clone();
        for (expected_len, text) in [(5, "Ontario"), (7, "Thanks")] {
            assert_ok!(session.chat(text).await);
            assert_eq!(session.turn_count(), expected_len);
            assert_eq!(session.transcript()[0], system);
        }
        assert_eq!(
            roles(&session),
            [
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
            ]
        );

        // The service sees the full history each time.
        let calls = session.service().calls();
        assert_eq!(
            calls.iter().map(Vec::len).collect::<Vec<_>>(),
            vec![2, 4, 6]
        );
    }

    #[tokio::test]
    async fn empty_input_is_sent() {
        let service = ScriptedService::new([Ok("Could you say more?".to_string())]);
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);
        assert_ok!(session.chat("").await);
        assert_eq!(session.transcript()[1], Turn::user(""));
    }

    #[tokio::test]
    async fn custom_system_prompt_is_used() {
        let service = ScriptedService::new([Ok("ok".to_string())]);
        let config = ChatConfig::new().with_system_prompt("Answer in French.");
        let mut session = ConversationSession::with_service(config, service);
        assert_ok!(session.chat("Bonjour").await);
        assert_eq!(session.transcript()[0], Turn::system("Answer in French."));
    }

    #[test]
    fn reset_clears_seeded_transcript() {
        let service = ScriptedService::default();
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);

        session.transcript.push(Turn::user("test"));
        assert_eq!(session.turn_count(), 1);

        session.reset();
        assert_eq!(session.turn_count(), 0);

        session.reset();
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test]
    async fn chat_after_reset_starts_over() {
        let service = ScriptedService::new([Ok("one".to_string()), Ok("two".to_string())]);
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);

        assert_ok!(session.chat("first").await);
        session.reset();
        assert_ok!(session.chat("second").await);

        assert_eq!(roles(&session), [Role::System, Role::User, Role::Assistant]);
        assert_eq!(session.transcript()[1], Turn::user("second"));
    }

    #[tokio::test]
    async fn failure_rolls_back_by_default() {
        let service = ScriptedService::new([
            Ok("Which region?".to_string()),
            Err(Error::connection("connection reset", None)),
        ]);
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);

        assert_ok!(session.chat("Hello").await);
        let before = session.transcript().to_vec();

        let err = assert_err!(session.chat("Ontario").await);
        assert!(err.is_remote());
        assert!(matches!(err, Error::Connection { .. }));
        assert_eq!(session.transcript(), before.as_slice());
    }

    #[tokio::test]
    async fn failure_on_first_chat_rolls_back_to_empty() {
        let service = ScriptedService::new([Err(Error::authentication("API key not valid"))]);
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);

        let err = assert_err!(session.chat("Hello").await);
        assert!(err.is_authentication());
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test]
    async fn failure_on_first_chat_retains_system_and_user_turns() {
        let service = ScriptedService::new([Err(Error::authentication("API key not valid"))]);
        let config = ChatConfig::new().with_failure_policy(FailurePolicy::RetainUserTurn);
        let mut session = ConversationSession::with_service(config, service);

        let err = assert_err!(session.chat("Hello").await);
        assert!(err.is_authentication());
        assert_eq!(roles(&session), vec![Role::System, Role::User]);
        assert_eq!(session.transcript()[1], Turn::user("Hello"));
    }

    #[tokio::test]
    async fn failure_retains_user_turn_when_configured() {
        let service = ScriptedService::new([
            Ok("Which region?".to_string()),
            Err(Error::internal_server("backend exploded")),
        ]);
        let config = ChatConfig::new().with_failure_policy(FailurePolicy::RetainUserTurn);
        let mut session = ConversationSession::with_service(config, service);

        assert_ok!(session.chat("Hello").await);
        let err = assert_err!(session.chat("Ontario").await);
        assert!(err.is_server_error());

        assert_eq!(session.turn_count(), 4);
        assert_eq!(session.transcript()[3], Turn::user("Ontario"));
        assert_eq!(
            roles(&session),
            [Role::System, Role::User, Role::Assistant, Role::User]
        );
    }

    #[tokio::test]
    async fn failed_exchange_does_not_block_the_next() {
        let service = ScriptedService::new([
            Err(Error::timeout("too slow", Some(60.0))),
            Ok("Which region?".to_string()),
        ]);
        let mut session = ConversationSession::with_service(ChatConfig::default(), service);

        assert_err!(session.chat("Hello").await);
        assert_eq!(assert_ok!(session.chat("Hello again").await), "Which region?");
        assert_eq!(roles(&session), [Role::System, Role::User, Role::Assistant]);
        assert_eq!(session.transcript()[1], Turn::user("Hello again"));
    }
}
