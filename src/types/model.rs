use std::fmt;
use std::str::FromStr;

/// A Gemini model identifier.
///
/// This can be a predefined model or a custom string for models that are not listed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for new, tuned, or experimental models)
    Custom(String),
}

/// Known Gemini model versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownModel {
    /// Gemini 1.0 Pro
    GeminiPro,

    /// Gemini 1.5 Pro
    Gemini15Pro,

    /// Gemini 1.5 Flash
    Gemini15Flash,

    /// Gemini 2.0 Flash
    Gemini20Flash,

    /// Gemini 2.5 Flash
    Gemini25Flash,

    /// Gemini 2.5 Pro
    Gemini25Pro,
}

impl KnownModel {
    const ALL: [KnownModel; 6] = [
        KnownModel::GeminiPro,
        KnownModel::Gemini15Pro,
        KnownModel::Gemini15Flash,
        KnownModel::Gemini20Flash,
        KnownModel::Gemini25Flash,
        KnownModel::Gemini25Pro,
    ];

    /// The identifier the API expects in the request path.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownModel::GeminiPro => "gemini-pro",
            KnownModel::Gemini15Pro => "gemini-1.5-pro",
            KnownModel::Gemini15Flash => "gemini-1.5-flash",
            KnownModel::Gemini20Flash => "gemini-2.0-flash",
            KnownModel::Gemini25Flash => "gemini-2.5-flash",
            KnownModel::Gemini25Pro => "gemini-2.5-pro",
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Known(KnownModel::Gemini20Flash)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("models/").unwrap_or(s);
        KnownModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| format!("unknown model: {s}"))
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    /// Parses a known model name, falling back to [`Model::Custom`] for anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<KnownModel>() {
            Ok(known) => Model::Known(known),
            Err(_) => Model::Custom(s.trim().to_string()),
        })
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::Custom(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Model::Custom(model.to_string())
    }
}
