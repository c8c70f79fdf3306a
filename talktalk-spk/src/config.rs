//! Configuration for speech synthesis

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Provider-accepted speaking rate range (1.0 = unmodified)
pub const SPEAKING_RATE_RANGE: RangeInclusive<f64> = 0.25..=4.0;

/// Provider-accepted pitch range in semitones (0.0 = unmodified)
pub const PITCH_RANGE: RangeInclusive<f64> = -20.0..=20.0;

/// Voice configuration: which provider voice to use and how to shape it.
///
/// On the wire this is `{ "voice", "speed", "pitch" }`, the shape chat clients
/// read from `voiceSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Provider voice name (e.g. "en-GB-Neural2-B")
    #[serde(rename = "voice")]
    pub voice_id: String,

    /// Speaking rate, 0.25-4.0
    #[serde(rename = "speed")]
    pub speaking_rate: f64,

    /// Pitch adjustment in semitones, -20.0 to 20.0
    #[serde(rename = "pitch")]
    pub pitch_semitones: f64,
}

impl VoiceConfig {
    pub fn new(voice_id: impl Into<String>, speaking_rate: f64, pitch_semitones: f64) -> Self {
        Self {
            voice_id: voice_id.into(),
            speaking_rate,
            pitch_semitones,
        }
    }

    /// Validate voice configuration.
    ///
    /// Only used for configured values. Request-time parameters are passed to
    /// the provider untouched.
    pub fn validate(&self) -> Result<(), String> {
        if self.voice_id.trim().is_empty() {
            return Err("Voice name cannot be empty".to_string());
        }

        if self.voice_id.len() > 256 {
            return Err("Voice name too long (max 256 chars)".to_string());
        }

        if self.voice_id.chars().any(|c| c == '\0' || c.is_control()) {
            return Err("Voice name contains invalid characters".to_string());
        }

        if !SPEAKING_RATE_RANGE.contains(&self.speaking_rate) {
            return Err(format!(
                "Speaking rate must be between {} and {}",
                SPEAKING_RATE_RANGE.start(),
                SPEAKING_RATE_RANGE.end()
            ));
        }

        if !PITCH_RANGE.contains(&self.pitch_semitones) {
            return Err(format!(
                "Pitch must be between {} and {} semitones",
                PITCH_RANGE.start(),
                PITCH_RANGE.end()
            ));
        }

        Ok(())
    }
}

impl Default for VoiceConfig {
    /// The voice a client falls back to when a reply carries no settings.
    fn default() -> Self {
        crate::selector::voices::fallback()
    }
}

/// Cloud TTS provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API endpoint URL (without the `/v1/...` path)
    pub endpoint: String,

    /// API key (optional; `GOOGLE_CLOUD_API_KEY` is also consulted)
    pub api_key: Option<String>,

    /// Language code used when it cannot be derived from the voice name
    pub default_language: String,

    /// Request timeout in seconds. None keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com";

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            default_language: "en-US".to_string(),
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("API endpoint cannot be empty".to_string());
        }

        if self.endpoint.len() > 2048 {
            return Err("API endpoint URL too long (max 2048 chars)".to_string());
        }

        if self.endpoint.chars().any(|c| c == '\0' || c.is_control()) {
            return Err("API endpoint contains invalid characters".to_string());
        }

        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| format!("API endpoint is not a valid URL: {}", e))?;
        // Plain HTTP is only accepted for local stubs
        let secure = match url.scheme() {
            "https" => true,
            "http" => is_loopback_host(&url),
            _ => false,
        };
        if !secure {
            return Err("API endpoint must use HTTPS".to_string());
        }

        if let Some(ref key) = self.api_key {
            if key.trim().is_empty() {
                return Err("API key cannot be empty if provided".to_string());
            }
        }

        if self.default_language.is_empty() {
            return Err("Language code cannot be empty".to_string());
        }

        if !self
            .default_language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(
                "Language code contains invalid characters (only alphanumeric and '-' allowed)"
                    .to_string(),
            );
        }

        if let Some(timeout) = self.timeout_secs {
            if timeout == 0 {
                return Err("API timeout must be greater than 0".to_string());
            }
            if timeout > 300 {
                return Err("API timeout too large (max 300 seconds)".to_string());
            }
        }

        Ok(())
    }
}

fn is_loopback_host(url: &reqwest::Url) -> bool {
    matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}
