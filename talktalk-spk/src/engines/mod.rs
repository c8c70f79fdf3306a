//! Synthesis provider implementations

pub mod custom;
pub mod google;

use crate::error::SpeechError;
use crate::synthesizer::SynthesisRequest;
use async_trait::async_trait;
use bytes::Bytes;

/// An external text-to-speech service
#[async_trait]
pub trait SynthesisProvider: Send + Sync {
    /// Synthesize text to MP3 audio. Called at most once per gateway request.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, SpeechError>;

    /// Voice names offered by the provider, optionally filtered by language
    async fn list_voices(&self, language: Option<&str>) -> Result<Vec<String>, SpeechError>;

    /// Provider name
    fn name(&self) -> &str;
}
