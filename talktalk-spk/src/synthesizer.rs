//! Speech synthesis gateway
//!
//! A thin, stateless pass-through: reject empty text, otherwise make exactly
//! one provider call and tag the bytes as MP3. There is no queue, cache or
//! retry here; parameter ranges are the provider's concern.

use crate::config::{ProviderConfig, VoiceConfig};
use crate::engines::google::GoogleCloudProvider;
use crate::engines::SynthesisProvider;
use crate::error::SpeechError;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, info};

/// MIME type of every synthesis result
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// One synthesis call's input
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub speaking_rate: f64,
    pub pitch_semitones: f64,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: &VoiceConfig) -> Self {
        Self {
            text: text.into(),
            voice_id: voice.voice_id.clone(),
            speaking_rate: voice.speaking_rate,
            pitch_semitones: voice.pitch_semitones,
        }
    }

    pub fn voice(&self) -> VoiceConfig {
        VoiceConfig::new(self.voice_id.clone(), self.speaking_rate, self.pitch_semitones)
    }
}

/// Audio bytes plus their MIME type
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub audio: Bytes,
    pub mime_type: &'static str,
}

/// Speech synthesis gateway in front of one provider
#[derive(Clone)]
pub struct SpeechSynthesizer {
    provider: Arc<dyn SynthesisProvider>,
}

impl SpeechSynthesizer {
    pub fn new(provider: Arc<dyn SynthesisProvider>) -> Self {
        Self { provider }
    }

    /// Gateway backed by Google Cloud TTS, credentials from the environment
    pub fn google_cloud(config: &ProviderConfig) -> Result<Self, SpeechError> {
        let provider = GoogleCloudProvider::from_env(config)?;
        info!("Speech synthesizer initialized ({})", provider.name());
        Ok(Self::new(Arc::new(provider)))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Synthesize speech.
    ///
    /// Empty or whitespace-only text fails with `InvalidInput` before the
    /// provider is touched. Provider errors come back as `SynthesisFailed`.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::InvalidInput("Text is required".to_string()));
        }

        debug!(
            voice = %request.voice_id,
            rate = request.speaking_rate,
            pitch = request.pitch_semitones,
            "Synthesizing {} chars",
            request.text.len()
        );

        let audio = self.provider.synthesize(request).await.map_err(|e| {
            error!("TTS error: {}", e);
            match e {
                SpeechError::SynthesisFailed(msg) => SpeechError::SynthesisFailed(msg),
                other => SpeechError::SynthesisFailed(other.message().to_string()),
            }
        })?;

        Ok(SynthesisResult {
            audio,
            mime_type: AUDIO_MPEG,
        })
    }

    /// Voices the provider offers
    pub async fn list_voices(&self, language: Option<&str>) -> Result<Vec<String>, SpeechError> {
        self.provider.list_voices(language).await
    }
}
