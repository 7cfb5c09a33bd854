use marketgenius_sdk::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
    /// The model answered but its payload is not a usable brief.
    #[error("Failed to generate a valid blog brief: {0}")]
    InvalidBrief(String),
    #[error("Invalid brief payload: {0}")]
    InvalidBriefPayload(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Audio device error: {0}")]
    AudioDevice(String),
    #[error("Live session error: {0}")]
    Live(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),
}

pub type StudioResult<T> = Result<T, StudioError>;

pub(crate) const GENERIC_CONTENT_ERROR: &str =
    "An error occurred while generating content. Please check your API key and try again.";
pub(crate) const MICROPHONE_ERROR: &str =
    "Could not access microphone or start session. Please check permissions.";
pub(crate) const CONNECTION_ERROR: &str = "An error occurred with the connection.";

impl StudioError {
    /// Short text a front end shows inline in place of the result.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Generation(_) => GENERIC_CONTENT_ERROR,
            Self::InvalidBrief(_) => {
                "Failed to generate a valid blog brief. The AI response was not valid JSON."
            }
            Self::InvalidBriefPayload(_) => {
                "The article brief could not be read. Please check the outline and word count."
            }
            Self::InvalidState(_) => "This action is not available right now.",
            Self::Config(_) => "MarketGenius is not configured. Please set your API key.",
            Self::AudioDevice(_) => MICROPHONE_ERROR,
            Self::Live(_) => CONNECTION_ERROR,
            Self::Storage(_) | Self::Serde(_) | Self::Io(_) => {
                "Your changes could not be saved. Please try again."
            }
            Self::Wav(_) => "The audio could not be exported. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_use_generic_content_message() {
        let error = StudioError::from(GenerationError::NoContent("empty".to_string()));
        assert_eq!(error.user_message(), GENERIC_CONTENT_ERROR);
    }

    #[test]
    fn brief_errors_are_distinct_from_transport_errors() {
        let brief = StudioError::InvalidBrief("expected value".to_string());
        assert_ne!(brief.user_message(), GENERIC_CONTENT_ERROR);
        assert!(brief.user_message().contains("not valid JSON"));
    }
}
