//! Voice selection strategies
//!
//! Every strategy is a pure function from a [`SelectionContext`] to a
//! [`VoiceConfig`]. Strategies never fail: each has a catch-all result.
//! [`PrioritySelector`] composes strategies when more than one signal is
//! available.

pub mod keyword;
pub mod sentiment;
pub mod time_of_day;
pub mod voices;

use crate::config::VoiceConfig;
use std::sync::Arc;

pub use keyword::{KeywordSelector, VoiceRule};
pub use sentiment::{Sentiment, SentimentSelector};
pub use time_of_day::{DayPeriod, TimeOfDaySelector};

/// Signals available when choosing a voice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionContext<'a> {
    /// Message the voice is chosen for
    pub message: &'a str,
    /// Sentiment label produced elsewhere ("positive", "neutral", "negative")
    pub sentiment: Option<&'a str>,
    /// Hour of day, 0-23
    pub hour: Option<u32>,
}

impl<'a> SelectionContext<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            sentiment: None,
            hour: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: &'a str) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }
}

/// Selects a voice configuration given a context
pub trait VoiceSelector: Send + Sync {
    /// Result decided by this strategy's own signal, if that signal is present
    /// and (for keyword rules) matched.
    fn try_select(&self, ctx: &SelectionContext<'_>) -> Option<VoiceConfig>;

    /// Catch-all result when `try_select` has nothing
    fn fallback(&self) -> VoiceConfig;

    /// Strategy name, for logging
    fn name(&self) -> &str;

    /// Always yields exactly one voice configuration.
    fn select(&self, ctx: &SelectionContext<'_>) -> VoiceConfig {
        self.try_select(ctx).unwrap_or_else(|| self.fallback())
    }
}

/// Ordered composition of strategies with first-hit-wins semantics.
///
/// `standard` orders keyword rules first (the message says what it wants),
/// then sentiment, then time of day.
pub struct PrioritySelector {
    strategies: Vec<Arc<dyn VoiceSelector>>,
    default: VoiceConfig,
}

impl PrioritySelector {
    pub fn new(strategies: Vec<Arc<dyn VoiceSelector>>, default: VoiceConfig) -> Self {
        Self {
            strategies,
            default,
        }
    }

    /// Keyword, sentiment, then time of day, all with built-in tables
    pub fn standard(default: VoiceConfig) -> Self {
        Self::new(
            vec![
                Arc::new(KeywordSelector::standard(default.clone())),
                Arc::new(SentimentSelector::standard()),
                Arc::new(TimeOfDaySelector::standard()),
            ],
            default,
        )
    }

    pub fn strategies(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }
}

impl VoiceSelector for PrioritySelector {
    fn try_select(&self, ctx: &SelectionContext<'_>) -> Option<VoiceConfig> {
        self.strategies.iter().find_map(|s| s.try_select(ctx))
    }

    fn fallback(&self) -> VoiceConfig {
        self.default.clone()
    }

    fn name(&self) -> &str {
        "priority"
    }
}
