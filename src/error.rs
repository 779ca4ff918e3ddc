use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Failed to generate content. Please try again.";
pub const EMPTY_PROMPT: &str = "Please enter a topic or description.";
pub const MISSING_API_KEY: &str =
    "API key not configured. Set GEMINI_API_KEY when building or running the app.";
pub const SAFETY_BLOCKED: &str =
    "Content generation blocked by safety settings. Please try a different prompt.";
pub const NO_CONTENT: &str = "No content generated.";
pub const TRANSPORT_FALLBACK: &str = "Failed to reach the generation service.";

/// Everything that can end a generation attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Validation(String),
    #[error("A generation request is already in progress.")]
    Busy,
    #[error("{0}")]
    Configuration(String),
    #[error("{}", SAFETY_BLOCKED)]
    SafetyBlock,
    #[error("{}", NO_CONTENT)]
    EmptyResult,
    #[error("{0}")]
    Transport(String),
}

impl GenerationError {
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            GenerationError::Transport(TRANSPORT_FALLBACK.to_string())
        } else {
            GenerationError::Transport(message)
        }
    }

    /// Text shown in the error banner.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write key {key}: {message}")]
    Write { key: String, message: String },
}
