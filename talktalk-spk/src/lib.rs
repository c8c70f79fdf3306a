//! talktalk-spk: speech synthesis and voice selection
//!
//! Provides:
//! - A synthesis gateway that forwards text to a cloud TTS provider and
//!   returns MP3 audio
//! - Google Cloud Text-to-Speech support (API key or service account)
//! - Pure voice selection strategies (keyword, time of day, sentiment)

pub mod config;
pub mod credentials;
pub mod engines;
pub mod error;
pub mod selector;
pub mod synthesizer;

pub use config::{ProviderConfig, VoiceConfig};
pub use credentials::Credentials;
pub use engines::SynthesisProvider;
pub use error::SpeechError;
pub use selector::{
    KeywordSelector, PrioritySelector, SelectionContext, Sentiment, SentimentSelector,
    TimeOfDaySelector, VoiceRule, VoiceSelector,
};
pub use synthesizer::{SpeechSynthesizer, SynthesisRequest, SynthesisResult, AUDIO_MPEG};
