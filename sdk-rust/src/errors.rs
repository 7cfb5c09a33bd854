use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the provider failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The input is not supported by or is incompatible with the model
    /// (e.g. audio input for an image model)
    #[error("Unsupported by {0}: {1}")]
    Unsupported(&'static str, String),
    /// The response from the provider was unexpected. (e.g. no candidates
    /// returned in a `generateContent` call)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
    /// The provider answered successfully but produced no usable output.
    #[error("{0}")]
    NoContent(String),
    /// The live WebSocket session failed.
    #[error("Live session error: {0}")]
    Live(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
