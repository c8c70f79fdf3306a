//! Sentiment-label voice table

use super::{voices, SelectionContext, VoiceSelector};
use crate::config::VoiceConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Case-insensitive; anything unrecognized is neutral
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentimentSelector {
    positive: VoiceConfig,
    neutral: VoiceConfig,
    negative: VoiceConfig,
}

impl SentimentSelector {
    pub fn new(positive: VoiceConfig, neutral: VoiceConfig, negative: VoiceConfig) -> Self {
        Self {
            positive,
            neutral,
            negative,
        }
    }

    pub fn standard() -> Self {
        Self::new(voices::positive(), voices::neutral(), voices::negative())
    }

    pub fn for_sentiment(&self, sentiment: Sentiment) -> VoiceConfig {
        match sentiment {
            Sentiment::Positive => self.positive.clone(),
            Sentiment::Neutral => self.neutral.clone(),
            Sentiment::Negative => self.negative.clone(),
        }
    }
}

impl VoiceSelector for SentimentSelector {
    fn try_select(&self, ctx: &SelectionContext<'_>) -> Option<VoiceConfig> {
        ctx.sentiment
            .map(|label| self.for_sentiment(Sentiment::from_label(label)))
    }

    fn fallback(&self) -> VoiceConfig {
        self.neutral.clone()
    }

    fn name(&self) -> &str {
        "sentiment"
    }
}
