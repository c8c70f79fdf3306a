// Server configuration: defaults, optional file, TALKTALK__* environment

use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use talktalk_spk::selector::{
    KeywordSelector, PrioritySelector, SentimentSelector, TimeOfDaySelector, VoiceSelector,
};
use talktalk_spk::{ProviderConfig, VoiceConfig};

/// Environment variable prefix, e.g. `TALKTALK__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "TALKTALK";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub provider: ProviderConfig,
    pub voice: VoiceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Which selector picks the voice attached to chat replies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceStrategy {
    #[default]
    Keyword,
    Time,
    Sentiment,
    Priority,
}

impl VoiceStrategy {
    /// Whether the strategy reads the wall clock
    pub fn uses_clock(self) -> bool {
        matches!(self, VoiceStrategy::Time | VoiceStrategy::Priority)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub strategy: VoiceStrategy,
    /// Result when no keyword rule matches
    pub default: VoiceConfig,
    /// Attach `voiceSettings` to chat responses
    pub attach_to_chat: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            strategy: VoiceStrategy::default(),
            default: VoiceConfig::default(),
            attach_to_chat: true,
        }
    }
}

impl VoiceSettings {
    pub fn build_selector(&self) -> Arc<dyn VoiceSelector> {
        match self.strategy {
            VoiceStrategy::Keyword => Arc::new(KeywordSelector::standard(self.default.clone())),
            VoiceStrategy::Time => Arc::new(TimeOfDaySelector::standard()),
            VoiceStrategy::Sentiment => Arc::new(SentimentSelector::standard()),
            VoiceStrategy::Priority => Arc::new(PrioritySelector::standard(self.default.clone())),
        }
    }
}

impl ServerConfig {
    /// Load configuration. Later layers win: defaults, then `path` (if
    /// given), then `TALKTALK__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ServerError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let loaded: ServerConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ServerError::Config(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        if self.server.host.trim().is_empty() {
            return Err(ServerError::Config("server.host cannot be empty".to_string()));
        }
        self.provider
            .validate()
            .map_err(|e| ServerError::Config(format!("provider: {}", e)))?;
        self.voice
            .default
            .validate()
            .map_err(|e| ServerError::Config(format!("voice.default: {}", e)))?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
