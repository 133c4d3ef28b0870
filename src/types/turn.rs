use std::fmt;

use serde::{Deserialize, Serialize};

/// The author of a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the whole conversation.
    System,

    /// Text typed by the person using the assistant.
    User,

    /// Text produced by the generation service.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One text fragment of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// The text payload.
    pub text: String,
}

impl Part {
    /// Create a new text part.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// One role-tagged unit of conversational content.
///
/// A turn cannot be changed once built: the fields are private and only read accessors are
/// exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    parts: Vec<Part>,
}

impl Turn {
    /// Create a turn from a role and its parts.
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self { role, parts }
    }

    /// Create a single-part turn.
    pub fn with_text(role: Role, text: impl Into<String>) -> Self {
        Self::new(role, vec![Part::new(text)])
    }

    /// Create a system turn.
    pub fn system(text: impl Into<String>) -> Self {
        Self::with_text(Role::System, text)
    }

    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_text(Role::User, text)
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_text(Role::Assistant, text)
    }

    /// The author of this turn.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The parts of this turn, in order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The text of every part, concatenated.
    pub fn text(&self) -> String {
        self.parts.iter().map(|part| part.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn single_part_constructors() {
        let turn = Turn::user("Where is my deposit?");
        assert_eq!(turn.role(), Role::User);
        assert_eq!(turn.parts().len(), 1);
        assert_eq!(turn.text(), "Where is my deposit?");

        assert_eq!(Turn::system("x").role(), Role::System);
        assert_eq!(Turn::assistant("y").role(), Role::Assistant);
    }

    #[test]
    fn text_concatenates_parts() {
        let turn = Turn::new(Role::Assistant, vec!["Which ".into(), "region?".into()]);
        assert_eq!(turn.text(), "Which region?");
    }

    #[test]
    fn serializes_lowercase_role() {
        let turn = Turn::user("hi");
        assert_eq!(
            to_value(&turn).unwrap(),
            json!({"role": "user", "parts": [{"text": "hi"}]})
        );
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
