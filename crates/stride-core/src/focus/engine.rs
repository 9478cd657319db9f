//! Focus/break state machine.
//!
//! Like the rest of the core this is wall-clock based and owns no timer.
//! The caller drives it by calling [`FocusTimer::tick`] about once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Focusing -> (OnBreak -> Focusing)* -> Idle
//! ```
//!
//! Break thresholds are multiples of the focus length measured from the
//! session start, breaks included: a 25 minute plan breaks at 25:00, 50:00,
//! 75:00 and so on. A threshold that would land inside or at the end of the
//! break just taken moves to the next multiple. The time credited on
//! [`FocusTimer::end`] is the wall-clock length of the whole session.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use super::plan::FocusPlan;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    Idle,
    Focusing,
    OnBreak,
}

/// Book-keeping for the session in progress.
#[derive(Debug, Clone)]
pub struct FocusSession {
    pub plan: FocusPlan,
    pub started_at: DateTime<Local>,
    /// Start of the current uninterrupted focus stretch.
    stretch_started_at: DateTime<Local>,
    /// Focused time banked before the current stretch.
    banked: Duration,
    /// Elapsed time since start at which the next break begins.
    next_break_at: Duration,
    break_ends_at: Option<DateTime<Local>>,
}

/// What [`FocusTimer::end`] reports about the finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub elapsed_secs: u64,
    /// Whole minutes credited to daily progress.
    pub minutes: u32,
    pub ended_at: DateTime<Local>,
}

impl SessionSummary {
    pub fn event(&self) -> Event {
        Event::FocusEnded {
            elapsed_secs: self.elapsed_secs,
            minutes: self.minutes,
            at: self.ended_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusTimer {
    session: Option<FocusSession>,
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> FocusState {
        match &self.session {
            None => FocusState::Idle,
            Some(s) if s.break_ends_at.is_some() => FocusState::OnBreak,
            Some(_) => FocusState::Focusing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&FocusSession> {
        self.session.as_ref()
    }

    /// Wall-clock time since the session started.
    pub fn elapsed(&self, now: DateTime<Local>) -> Duration {
        self.session
            .as_ref()
            .map(|s| non_negative(now - s.started_at))
            .unwrap_or_else(Duration::zero)
    }

    /// Time spent focusing, excluding breaks.
    pub fn focused(&self, now: DateTime<Local>) -> Duration {
        self.session
            .as_ref()
            .map(|s| s.focused(now))
            .unwrap_or_else(Duration::zero)
    }

    pub fn break_remaining(&self, now: DateTime<Local>) -> Option<Duration> {
        let ends_at = self.session.as_ref()?.break_ends_at?;
        Some(non_negative(ends_at - now))
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, plan: FocusPlan, now: DateTime<Local>) -> Result<Event, ValidationError> {
        if self.session.is_some() {
            return Err(ValidationError::SessionActive);
        }
        plan.validate()?;

        self.session = Some(FocusSession {
            plan,
            started_at: now,
            stretch_started_at: now,
            banked: Duration::zero(),
            next_break_at: plan.duration(),
            break_ends_at: None,
        });
        tracing::info!(
            duration_secs = plan.duration_secs(),
            skip_breaks = plan.skip_breaks,
            "focus session started"
        );

        Ok(Event::FocusStarted {
            duration_secs: plan.duration_secs().unsigned_abs(),
            break_secs: plan.break_length().map(secs),
            at: now,
        })
    }

    /// Call periodically. Returns an event when a break starts or ends.
    pub fn tick(&mut self, now: DateTime<Local>) -> Option<Event> {
        let session = self.session.as_mut()?;

        match session.break_ends_at {
            Some(ends_at) => {
                if now < ends_at {
                    return None;
                }
                session.break_ends_at = None;
                session.stretch_started_at = now;
                tracing::info!("break finished, focus resumed");
                Some(Event::BreakEnded { at: now })
            }
            None => {
                let break_len = session.plan.break_length()?;
                let elapsed = non_negative(now - session.started_at);
                if elapsed < session.next_break_at {
                    return None;
                }

                session.banked = session.focused(now);
                session.next_break_at =
                    next_multiple_after(elapsed + break_len, session.plan.duration());
                let ends_at = now + break_len;
                session.break_ends_at = Some(ends_at);
                tracing::info!(break_secs = secs(break_len), "break started");
                Some(Event::BreakStarted {
                    break_secs: secs(break_len),
                    ends_at,
                    at: now,
                })
            }
        }
    }

    /// End the session from any active state. `None` when idle.
    pub fn end(&mut self, now: DateTime<Local>) -> Option<SessionSummary> {
        let session = self.session.take()?;
        let elapsed_secs = secs(non_negative(now - session.started_at));
        let minutes = u32::try_from(elapsed_secs / 60).unwrap_or(u32::MAX);
        tracing::info!(elapsed_secs, minutes, "focus session ended");

        Some(SessionSummary {
            elapsed_secs,
            minutes,
            ended_at: now,
        })
    }
}

impl FocusSession {
    fn focused(&self, now: DateTime<Local>) -> Duration {
        if self.break_ends_at.is_some() {
            return self.banked;
        }
        self.banked + non_negative(now - self.stretch_started_at)
    }
}

/// Smallest multiple of `period` strictly greater than `after`.
fn next_multiple_after(after: Duration, period: Duration) -> Duration {
    let period_secs = period.num_seconds().max(1);
    let multiple = (after.num_seconds() / period_secs).saturating_add(1);
    Duration::try_seconds(multiple.saturating_mul(period_secs)).unwrap_or(Duration::MAX)
}

fn non_negative(d: Duration) -> Duration {
    d.max(Duration::zero())
}

fn secs(d: Duration) -> u64 {
    d.num_seconds().max(0).unsigned_abs()
}
