//! The seam between a conversation and whatever produces the replies.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{GenerationConfig, Model, Turn};

/// Everything a generation service needs to produce the next reply.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// The model to ask.
    pub model: &'a Model,
    /// The whole transcript, oldest turn first, ending with the newest user turn.
    pub transcript: &'a [Turn],
    /// Sampling controls.
    pub generation_config: &'a GenerationConfig,
}

/// Produces assistant text for a transcript.
///
/// [`Gemini`](crate::Gemini) is the production implementation.  Errors are returned as-is to
/// the caller of [`ConversationSession::chat`](crate::chat::ConversationSession::chat).
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates the assistant reply for `request.transcript`.
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;
}

#[async_trait::async_trait]
impl<T: GenerationService + ?Sized> GenerationService for Box<T> {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        (**self).generate(request).await
    }
}

#[async_trait::async_trait]
impl<T: GenerationService + ?Sized> GenerationService for Arc<T> {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        (**self).generate(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Echo;

    #[async_trait::async_trait]
    impl GenerationService for Echo {
        async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
            request
                .transcript
                .last()
                .map(Turn::text)
                .ok_or_else(|| Error::empty_response("empty transcript", None))
        }
    }

    #[tokio::test]
    async fn boxed_and_shared_services_delegate() {
        let model = Model::default();
        let config = GenerationConfig::default();
        let transcript = [Turn::user("ping")];
        let request = GenerationRequest {
            model: &model,
            transcript: &transcript,
            generation_config: &config,
        };

        let boxed: Box<dyn GenerationService> = Box::new(Echo);
        assert_eq!(boxed.generate(request).await.unwrap(), "ping");

        let shared: Arc<dyn GenerationService> = Arc::new(Echo);
        assert_eq!(shared.generate(request).await.unwrap(), "ping");
    }
}
