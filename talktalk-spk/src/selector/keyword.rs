//! Keyword rules: ordered (predicate, voice) pairs, first match wins

use super::{voices, SelectionContext, VoiceSelector};
use crate::config::VoiceConfig;
use serde::{Deserialize, Serialize};

/// Matches when the message contains any keyword (case-insensitive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRule {
    keywords: Vec<String>,
    voice: VoiceConfig,
}

impl VoiceRule {
    pub fn new<I, S>(keywords: I, voice: VoiceConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            voice,
        }
    }

    /// `lowered` must already be lowercase
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn voice(&self) -> &VoiceConfig {
        &self.voice
    }
}

/// Keyword-driven selector
#[derive(Debug, Clone)]
pub struct KeywordSelector {
    rules: Vec<VoiceRule>,
    default: VoiceConfig,
}

impl KeywordSelector {
    pub fn new(rules: Vec<VoiceRule>, default: VoiceConfig) -> Self {
        Self { rules, default }
    }

    /// urgent/emergency, then joke/fun, then business/professional
    pub fn standard(default: VoiceConfig) -> Self {
        Self::new(standard_rules(), default)
    }

    pub fn rules(&self) -> &[VoiceRule] {
        &self.rules
    }

    /// Index of the first matching rule
    pub fn matching_rule(&self, message: &str) -> Option<usize> {
        let lowered = message.to_lowercase();
        self.rules.iter().position(|rule| rule.matches(&lowered))
    }
}

pub fn standard_rules() -> Vec<VoiceRule> {
    vec![
        VoiceRule::new(["urgent", "emergency"], voices::urgent()),
        VoiceRule::new(["joke", "fun"], voices::playful()),
        VoiceRule::new(["business", "professional"], voices::professional()),
    ]
}

impl VoiceSelector for KeywordSelector {
    fn try_select(&self, ctx: &SelectionContext<'_>) -> Option<VoiceConfig> {
        self.matching_rule(ctx.message)
            .map(|idx| self.rules[idx].voice.clone())
    }

    fn fallback(&self) -> VoiceConfig {
        self.default.clone()
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
