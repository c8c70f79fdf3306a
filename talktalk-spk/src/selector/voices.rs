//! Built-in voice tables.
//!
//! Voice names are Google Cloud Neural2 voices. Rates and pitches are the
//! values the chat client has been tuned against.

use crate::config::VoiceConfig;

/// Deep US male, used for serious or calming delivery
pub const DEEP_SERIOUS: &str = "en-US-Neural2-D";
/// Casual US male
pub const CASUAL_MALE: &str = "en-US-Neural2-J";
/// British authoritative male
pub const AUTHORITATIVE_BRITISH: &str = "en-GB-Neural2-B";
/// Bright US female
pub const BRIGHT_FEMALE: &str = "en-US-Neural2-A";
/// Neutral US male
pub const NEUTRAL_MALE: &str = "en-US-Neural2-C";

/// Voice for messages flagged urgent or emergency
pub fn urgent() -> VoiceConfig {
    VoiceConfig::new(DEEP_SERIOUS, 1.2, -5.0)
}

/// Voice for jokes and light conversation
pub fn playful() -> VoiceConfig {
    VoiceConfig::new(CASUAL_MALE, 1.0, 2.0)
}

/// Voice for business or professional topics
pub fn professional() -> VoiceConfig {
    VoiceConfig::new(AUTHORITATIVE_BRITISH, 0.9, -3.0)
}

/// Global fallback: maximum speed, deep pitch
pub fn fallback() -> VoiceConfig {
    VoiceConfig::new(AUTHORITATIVE_BRITISH, 4.0, -9.0)
}

pub fn morning() -> VoiceConfig {
    VoiceConfig::new(BRIGHT_FEMALE, 1.0, 2.0)
}

pub fn afternoon() -> VoiceConfig {
    VoiceConfig::new(NEUTRAL_MALE, 1.2, 0.0)
}

pub fn evening() -> VoiceConfig {
    VoiceConfig::new(DEEP_SERIOUS, 0.8, -5.0)
}

pub fn positive() -> VoiceConfig {
    VoiceConfig::new(BRIGHT_FEMALE, 1.2, 3.0)
}

pub fn neutral() -> VoiceConfig {
    VoiceConfig::new(NEUTRAL_MALE, 1.0, 0.0)
}

pub fn negative() -> VoiceConfig {
    VoiceConfig::new(DEEP_SERIOUS, 0.9, -5.0)
}
