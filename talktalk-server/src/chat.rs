//! Chat replies with an attached voice configuration
//!
//! The reply generator produces the text (and optionally a sentiment label);
//! the configured [`VoiceSelector`] picks the voice the client should speak
//! it with.

use crate::config::{VoiceSettings, VoiceStrategy};
use crate::error::ServerError;
use async_trait::async_trait;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use talktalk_spk::selector::{SelectionContext, VoiceSelector};
use talktalk_spk::VoiceConfig;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    #[serde(default)]
    pub images: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub content: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceConfig>,
}

/// Generated reply text
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    /// "positive", "neutral" or "negative"; read by the sentiment strategy
    pub sentiment: Option<String>,
}

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn reply(&self, request: &ChatRequest) -> Result<Reply, ServerError>;
}

/// Repeats the message back: `You said: <message>`
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoReply;

#[async_trait]
impl ReplyGenerator for EchoReply {
    async fn reply(&self, request: &ChatRequest) -> Result<Reply, ServerError> {
        Ok(Reply {
            content: format!("You said: {}", request.message),
            sentiment: None,
        })
    }
}

type HourSource = Arc<dyn Fn() -> u32 + Send + Sync>;

pub struct ChatService {
    generator: Arc<dyn ReplyGenerator>,
    selector: Arc<dyn VoiceSelector>,
    strategy: VoiceStrategy,
    attach_voice: bool,
    hour: HourSource,
}

impl ChatService {
    pub fn new(generator: Arc<dyn ReplyGenerator>, settings: &VoiceSettings) -> Self {
        Self {
            generator,
            selector: settings.build_selector(),
            strategy: settings.strategy,
            attach_voice: settings.attach_to_chat,
            hour: Arc::new(|| chrono::Local::now().hour()),
        }
    }

    /// Replace the wall clock, e.g. to pin the hour in tests
    pub fn with_hour_source(mut self, hour: impl Fn() -> u32 + Send + Sync + 'static) -> Self {
        self.hour = Arc::new(hour);
        self
    }

    pub fn strategy(&self) -> VoiceStrategy {
        self.strategy
    }

    pub async fn respond(&self, request: ChatRequest) -> Result<ChatResponse, ServerError> {
        debug!(
            history = request.history.len(),
            images = request.images.len(),
            "Chat message received"
        );

        let reply = self.generator.reply(&request).await?;

        let voice_settings = if self.attach_voice {
            let mut ctx = SelectionContext::new(&request.message);
            if let Some(label) = reply.sentiment.as_deref() {
                ctx = ctx.with_sentiment(label);
            }
            if self.strategy.uses_clock() {
                ctx = ctx.with_hour((self.hour)());
            }
            let voice = self.selector.select(&ctx);
            debug!(strategy = self.selector.name(), voice = %voice.voice_id, "Voice selected");
            Some(voice)
        } else {
            None
        };

        Ok(ChatResponse {
            content: reply.content,
            role: Role::Assistant,
            conversation_id: request.conversation_id,
            voice_settings,
        })
    }
}
