//! Google Cloud Text-to-Speech provider (REST v1)

use crate::config::ProviderConfig;
use crate::credentials::Credentials;
use crate::engines::SynthesisProvider;
use crate::error::SpeechError;
use crate::synthesizer::SynthesisRequest;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Post-processing profile applied to every synthesis, passed through verbatim
pub const EFFECTS_PROFILE: &str = "headphone-class-device";
pub const AUDIO_ENCODING: &str = "MP3";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: String,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    pitch: f64,
    effects_profile_id: [&'static str; 1],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceEntry>,
}

#[derive(Debug, Deserialize)]
struct VoiceEntry {
    name: String,
}

/// Google Cloud TTS client
pub struct GoogleCloudProvider {
    client: Client,
    endpoint: String,
    default_language: String,
    credentials: Credentials,
}

impl GoogleCloudProvider {
    /// Create a provider with explicit credentials
    pub fn new(config: &ProviderConfig, credentials: Credentials) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Config)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SpeechError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            default_language: config.default_language.clone(),
            credentials,
        })
    }

    /// Create a provider with credentials resolved from the environment
    pub fn from_env(config: &ProviderConfig) -> Result<Self, SpeechError> {
        let credentials = Credentials::from_env(config.api_key.as_deref())?;
        Self::new(config, credentials)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Language code for a voice name: "en-GB-Neural2-B" gives "en-GB".
    /// Names without a locale prefix use the configured default.
    pub fn language_for_voice(&self, voice: &str) -> String {
        let mut parts = voice.split('-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(lang), Some(region), Some(_))
                if (2..=3).contains(&lang.len())
                    && lang.chars().all(|c| c.is_ascii_alphabetic())
                    && (2..=3).contains(&region.len())
                    && region.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                format!("{}-{}", lang, region)
            }
            _ => self.default_language.clone(),
        }
    }

    async fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, SpeechError> {
        match &self.credentials {
            Credentials::ApiKey(key) => Ok(builder.query(&[("key", key.as_str())])),
            Credentials::ServiceAccount(account) => {
                let token = account.access_token(&self.client).await?;
                Ok(builder.bearer_auth(token))
            }
        }
    }
}

/// Turn a non-success response into the provider's own message
async fn provider_error(context: &str, response: Response) -> SpeechError {
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);
    SpeechError::SynthesisFailed(format!("{} ({}): {}", context, status, message))
}

#[async_trait]
impl SynthesisProvider for GoogleCloudProvider {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, SpeechError> {
        let body = SynthesizeBody {
            input: SynthesisInput { text: &request.text },
            voice: VoiceSelectionParams {
                language_code: self.language_for_voice(&request.voice_id),
                name: &request.voice_id,
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING,
                speaking_rate: request.speaking_rate,
                pitch: request.pitch_semitones,
                effects_profile_id: [EFFECTS_PROFILE],
            },
        };

        let url = format!("{}/v1/text:synthesize", self.endpoint);
        debug!(voice = %request.voice_id, chars = request.text.len(), "Google Cloud TTS request");

        let builder = self.authorize(self.client.post(&url)).await?;
        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("Google Cloud API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(provider_error("Google Cloud API error", response).await);
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to parse Google Cloud response: {}", e)))?;

        let audio_content = parsed.audio_content.ok_or_else(|| {
            SpeechError::SynthesisFailed("Missing audioContent in Google Cloud response".to_string())
        })?;

        let audio = general_purpose::STANDARD
            .decode(audio_content)
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to decode base64 audio: {}", e)))?;

        Ok(Bytes::from(audio))
    }

    async fn list_voices(&self, language: Option<&str>) -> Result<Vec<String>, SpeechError> {
        let url = format!("{}/v1/voices", self.endpoint);
        let mut builder = self.client.get(&url);
        if let Some(lang) = language {
            builder = builder.query(&[("languageCode", lang)]);
        }

        let response = self
            .authorize(builder)
            .await?
            .send()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("Google Cloud voices API request failed: {}", e)))?;

        if !response.status().is_success() {
            warn!("Failed to list Google Cloud voices");
            return Err(provider_error("Google Cloud voices API error", response).await);
        }

        let parsed: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to parse Google Cloud voices response: {}", e)))?;

        // Names may come back as "projects/.../voices/<name>"
        Ok(parsed
            .voices
            .into_iter()
            .map(|v| match v.name.rsplit_once('/') {
                Some((_, short)) => short.to_string(),
                None => v.name,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Google Cloud TTS"
    }
}
