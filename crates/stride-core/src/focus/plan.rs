use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Focus length at or above which breaks last five minutes instead of three.
pub const LONG_FOCUS_MINUTES: i64 = 25;
pub const LONG_BREAK_MINUTES: i64 = 5;
pub const SHORT_BREAK_MINUTES: i64 = 3;
/// Picker values are clamped to a year either way.
const MAX_DURATION_SECS: i64 = 365 * 24 * 3600;

/// What the user configured before pressing start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusPlan {
    duration_secs: i64,
    pub skip_breaks: bool,
}

impl Default for FocusPlan {
    fn default() -> Self {
        Self {
            duration_secs: LONG_FOCUS_MINUTES * 60,
            skip_breaks: false,
        }
    }
}

impl FocusPlan {
    /// Plans are not validated here so the picker can hold any value;
    /// [`FocusPlan::validate`] runs when a session starts.
    pub fn new(duration_secs: i64, skip_breaks: bool) -> Self {
        Self {
            duration_secs: duration_secs.clamp(-MAX_DURATION_SECS, MAX_DURATION_SECS),
            skip_breaks,
        }
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_secs <= 0 {
            return Err(ValidationError::InvalidDuration {
                secs: self.duration_secs,
            });
        }
        Ok(())
    }

    /// Break length for this plan, or `None` when breaks are skipped.
    pub fn break_length(&self) -> Option<Duration> {
        if self.skip_breaks {
            return None;
        }
        Some(break_for_focus(self.duration()))
    }

    /// One-line description shown under the duration picker.
    pub fn hint(&self) -> String {
        match self.break_length() {
            None => "You will have no break time.".to_string(),
            Some(brk) => {
                let minutes = self.duration_secs.max(0) / 60;
                let seconds = self.duration_secs.max(0) % 60;
                format!(
                    "Break for {} minutes every {minutes} min {seconds} sec.",
                    brk.num_minutes()
                )
            }
        }
    }
}

/// 5 minutes after a focus length of 25 minutes or more, otherwise 3.
pub fn break_for_focus(focus: Duration) -> Duration {
    if focus.num_minutes() >= LONG_FOCUS_MINUTES {
        Duration::minutes(LONG_BREAK_MINUTES)
    } else {
        Duration::minutes(SHORT_BREAK_MINUTES)
    }
}
