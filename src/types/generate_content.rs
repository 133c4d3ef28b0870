//! Request and response bodies for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use crate::types::{Part, Role, Turn};

/// Role of a content entry on the wire.
///
/// The API only knows two conversational roles; assistant turns travel as `model`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    /// User role.
    User,

    /// Model role.
    Model,
}

/// A list of parts attributed to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Who authored the content; absent for system instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ContentRole>,

    /// The parts of the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create content authored by `role`.
    pub fn new(role: ContentRole, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }

    /// Create role-less content, as used for the system instruction.
    pub fn instruction(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }

    /// The text of every part, concatenated.
    pub fn text(&self) -> String {
        self.parts.iter().map(|part| part.text.as_str()).collect()
    }
}

/// Sampling controls sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Upper bound on tokens in the reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationConfig {
    /// Returns true when no field is set, in which case the config is left out of the request.
    pub fn is_empty(&self) -> bool {
        self.max_output_tokens.is_none() && self.temperature.is_none()
    }
}

/// Body of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The conversation so far.
    pub contents: Vec<Content>,

    /// The system instruction, if the transcript has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Sampling controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Build a request from a transcript.
    ///
    /// System turns become the system instruction (their parts are merged in order if there is
    /// more than one); user turns keep the `user` role and assistant turns are sent as `model`.
    pub fn from_transcript(transcript: &[Turn], generation_config: &GenerationConfig) -> Self {
        let mut contents = Vec::with_capacity(transcript.len());
        let mut system_parts = Vec::new();
        for turn in transcript {
            let role = match turn.role() {
                Role::System => {
                    system_parts.extend(turn.parts().iter().cloned());
                    continue;
                }
                Role::User => ContentRole::User,
                Role::Assistant => ContentRole::Model,
            };
            contents.push(Content::new(role, turn.parts().to_vec()));
        }
        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(Content::instruction(system_parts))
        };
        let generation_config = if generation_config.is_empty() {
            None
        } else {
            Some(generation_config.clone())
        };
        Self {
            contents,
            system_instruction,
            generation_config,
        }
    }
}

/// One candidate reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The generated content, absent when generation was stopped early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Why generation stopped (e.g. `STOP`, `MAX_TOKENS`, `SAFETY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Feedback about the prompt itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

/// Token accounting reported with a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<u32>,

    /// Tokens across all candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<u32>,

    /// Prompt plus candidate tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<u32>,
}

/// Body of a `generateContent` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate replies; the first one is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Prompt feedback, present when the prompt was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,

    /// Token accounting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// The text of the first candidate, or `None` when there is no text to return.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(content.text())
    }

    /// The reason nothing was generated: the prompt block reason if any, else the first
    /// candidate's finish reason.
    pub fn empty_reason(&self) -> Option<String> {
        self.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone())
            .or_else(|| {
                self.candidates
                    .first()
                    .and_then(|candidate| candidate.finish_reason.clone())
            })
    }
}
