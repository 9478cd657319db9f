//! Daily focus progress: a target, what has been done today, and a streak.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

pub const DEFAULT_TARGET_MINUTES: u32 = 120;
pub const MAX_TARGET_MINUTES: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    day: NaiveDate,
    target_minutes: u32,
    completed_minutes: u32,
    streak_days: u32,
    yesterday_minutes: u32,
}

impl DailyProgress {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            target_minutes: DEFAULT_TARGET_MINUTES,
            completed_minutes: 0,
            streak_days: 0,
            yesterday_minutes: 0,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn target_minutes(&self) -> u32 {
        self.target_minutes
    }

    /// Raw counter; may exceed the target.
    pub fn completed_minutes(&self) -> u32 {
        self.completed_minutes
    }

    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    pub fn yesterday_minutes(&self) -> u32 {
        self.yesterday_minutes
    }

    /// Value for the progress ring, clamped at the target.
    pub fn ring_value(&self) -> u32 {
        self.completed_minutes.min(self.target_minutes)
    }

    pub fn target_met(&self) -> bool {
        self.target_minutes > 0 && self.completed_minutes >= self.target_minutes
    }

    pub fn label(&self) -> String {
        format!("Completed: {} minutes", self.completed_minutes)
    }

    /// Add finished focus minutes. Returns the target notification on the
    /// call that carries the counter across the target.
    pub fn record(&mut self, minutes: u32, now: DateTime<Local>) -> Option<Event> {
        let before = self.completed_minutes;
        self.completed_minutes = before.saturating_add(minutes);

        if before < self.target_minutes && self.completed_minutes >= self.target_minutes {
            tracing::info!(target_minutes = self.target_minutes, "daily target reached");
            return Some(Event::DailyTargetReached {
                target_minutes: self.target_minutes,
                completed_minutes: self.completed_minutes,
                at: now,
            });
        }
        None
    }

    pub fn set_target(&mut self, minutes: u32) -> Result<Event, ValidationError> {
        if minutes > MAX_TARGET_MINUTES {
            return Err(ValidationError::InvalidValue {
                field: "daily target".into(),
                message: format!("must be between 0 and {MAX_TARGET_MINUTES} minutes"),
            });
        }
        self.target_minutes = minutes;
        Ok(Event::DailyTargetUpdated {
            target_minutes: minutes,
        })
    }

    /// Start a new day if `today` is past the tracked one.
    ///
    /// Today's minutes become yesterday's. The streak grows when the day
    /// that just closed met its target and resets otherwise; a gap of more
    /// than one day also resets it.
    pub fn roll_over(&mut self, today: NaiveDate) -> Option<Event> {
        if today <= self.day {
            return None;
        }
        let consecutive = self.day.succ_opt() == Some(today);

        self.streak_days = if self.target_met() && consecutive {
            self.streak_days.saturating_add(1)
        } else {
            0
        };
        self.yesterday_minutes = if consecutive { self.completed_minutes } else { 0 };
        self.completed_minutes = 0;
        self.day = today;

        Some(Event::DayRolledOver {
            yesterday_minutes: self.yesterday_minutes,
            streak_days: self.streak_days,
        })
    }
}
