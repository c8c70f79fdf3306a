//! Hour-of-day voice table

use super::{voices, SelectionContext, VoiceSelector};
use crate::config::VoiceConfig;

/// Non-overlapping bands: [6,12) morning, [12,18) afternoon, everything else evening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeOfDaySelector {
    morning: VoiceConfig,
    afternoon: VoiceConfig,
    evening: VoiceConfig,
}

impl TimeOfDaySelector {
    pub fn new(morning: VoiceConfig, afternoon: VoiceConfig, evening: VoiceConfig) -> Self {
        Self {
            morning,
            afternoon,
            evening,
        }
    }

    pub fn standard() -> Self {
        Self::new(voices::morning(), voices::afternoon(), voices::evening())
    }

    pub fn for_period(&self, period: DayPeriod) -> VoiceConfig {
        match period {
            DayPeriod::Morning => self.morning.clone(),
            DayPeriod::Afternoon => self.afternoon.clone(),
            DayPeriod::Evening => self.evening.clone(),
        }
    }
}

impl VoiceSelector for TimeOfDaySelector {
    fn try_select(&self, ctx: &SelectionContext<'_>) -> Option<VoiceConfig> {
        ctx.hour.map(|h| self.for_period(DayPeriod::from_hour(h)))
    }

    /// A missing hour lands in the catch-all band
    fn fallback(&self) -> VoiceConfig {
        self.evening.clone()
    }

    fn name(&self) -> &str {
        "time_of_day"
    }
}
