//! Stopwatch with lap flags.
//!
//! Counter based: every [`Stopwatch::tick`] while running adds [`TICK_MS`].
//! The caller schedules ticks at that interval.
//!
//! ```text
//! Stopped -> Running <-> Paused -> Stopped (reset)
//! ```

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::format;

pub const TICK_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwatchState {
    #[default]
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based, in recording order.
    pub index: u32,
    /// `HH:MM:SS.hh`
    pub time: String,
    pub elapsed_ms: u64,
}

/// Which buttons the stopwatch screen should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchControls {
    pub flag: bool,
    pub reset: bool,
    pub recordings: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    state: StopwatchState,
    elapsed_ms: u64,
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn display(&self) -> String {
        format::hms_millis(self.elapsed_ms)
    }

    pub fn controls(&self) -> StopwatchControls {
        StopwatchControls {
            flag: self.state == StopwatchState::Running,
            reset: self.state == StopwatchState::Paused,
            recordings: self.state == StopwatchState::Paused && !self.laps.is_empty(),
        }
    }

    /// Start/pause button.
    pub fn toggle(&mut self) -> Event {
        match self.state {
            StopwatchState::Running => {
                self.state = StopwatchState::Paused;
                Event::StopwatchPaused {
                    elapsed_ms: self.elapsed_ms,
                }
            }
            StopwatchState::Stopped | StopwatchState::Paused => {
                self.state = StopwatchState::Running;
                Event::StopwatchStarted
            }
        }
    }

    /// Returns whether the counter advanced.
    pub fn tick(&mut self) -> bool {
        if self.state != StopwatchState::Running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(TICK_MS);
        true
    }

    /// Record a lap. Ignored unless running.
    pub fn flag(&mut self) -> Option<Event> {
        if self.state != StopwatchState::Running {
            return None;
        }
        let lap = Lap {
            index: u32::try_from(self.laps.len())
                .unwrap_or(u32::MAX)
                .saturating_add(1),
            time: format::hms_hundredths(self.elapsed_ms),
            elapsed_ms: self.elapsed_ms,
        };
        tracing::debug!(index = lap.index, elapsed_ms = lap.elapsed_ms, "lap recorded");
        let event = Event::LapRecorded {
            index: lap.index,
            time: lap.time.clone(),
            elapsed_ms: lap.elapsed_ms,
        };
        self.laps.push(lap);
        Some(event)
    }

    pub fn reset(&mut self) -> Event {
        self.state = StopwatchState::Stopped;
        self.elapsed_ms = 0;
        self.laps.clear();
        Event::StopwatchReset
    }
}
