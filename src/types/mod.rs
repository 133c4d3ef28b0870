// Public modules
pub mod generate_content;
pub mod model;
pub mod turn;

// Re-exports
pub use generate_content::{
    Candidate, Content, ContentRole, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, PromptFeedback, UsageMetadata,
};
pub use model::{KnownModel, Model};
pub use turn::{Part, Role, Turn};
