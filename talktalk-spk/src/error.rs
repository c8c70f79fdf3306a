//! Error types for talktalk-spk

use thiserror::Error;

/// Speech synthesis errors
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Rejected before any provider call (empty text).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Any downstream provider failure, carrying the provider's message.
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Startup-time problems: bad configuration values or unusable credentials.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpeechError {
    /// Message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            SpeechError::InvalidInput(msg)
            | SpeechError::SynthesisFailed(msg)
            | SpeechError::Config(msg) => msg,
        }
    }
}
