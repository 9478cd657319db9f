mod engine;
mod plan;
mod progress;

pub use engine::{FocusSession, FocusState, FocusTimer, SessionSummary};
pub use plan::{break_for_focus, FocusPlan, LONG_BREAK_MINUTES, LONG_FOCUS_MINUTES, SHORT_BREAK_MINUTES};
pub use progress::{DailyProgress, DEFAULT_TARGET_MINUTES, MAX_TARGET_MINUTES};

use chrono::{DateTime, Local};

use crate::error::ValidationError;
use crate::events::Event;
use crate::task::TaskList;

/// Everything on the focus screen: the draft plan from the picker, the
/// running timer, today's progress and the task list.
#[derive(Debug, Clone)]
pub struct FocusPanel {
    pub plan: FocusPlan,
    pub timer: FocusTimer,
    pub progress: DailyProgress,
    pub tasks: TaskList,
}

impl FocusPanel {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            plan: FocusPlan::default(),
            timer: FocusTimer::new(),
            progress: DailyProgress::new(now.date_naive()),
            tasks: TaskList::new(),
        }
    }

    /// The picker and skip-break toggle are locked while a session runs.
    pub fn set_plan(&mut self, plan: FocusPlan) -> Result<(), ValidationError> {
        if self.timer.is_active() {
            return Err(ValidationError::SessionActive);
        }
        self.plan = plan;
        Ok(())
    }

    pub fn start(&mut self, now: DateTime<Local>) -> Result<Event, ValidationError> {
        self.timer.start(self.plan, now)
    }

    /// End the running session and credit its whole minutes to today.
    pub fn end(&mut self, now: DateTime<Local>) -> Vec<Event> {
        let Some(summary) = self.timer.end(now) else {
            return Vec::new();
        };
        let mut events = vec![summary.event()];
        events.extend(self.progress.record(summary.minutes, now));
        events
    }

    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<Event> {
        let mut events = Vec::new();
        events.extend(self.progress.roll_over(now.date_naive()));
        events.extend(self.timer.tick(now));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn ending_credits_elapsed_minutes() {
        let mut panel = FocusPanel::new(t0());
        panel.progress.set_target(30).unwrap();
        panel.set_plan(FocusPlan::new(60 * 60, true)).unwrap();
        panel.start(t0()).unwrap();

        let events = panel.end(t0() + Duration::seconds(20 * 60 + 42));
        assert_eq!(events.len(), 1);
        assert_eq!(panel.progress.completed_minutes(), 20);

        panel.start(t0() + Duration::minutes(30)).unwrap();
        let events = panel.end(t0() + Duration::minutes(41));
        assert!(matches!(events[1], Event::DailyTargetReached { .. }));
        assert_eq!(panel.progress.completed_minutes(), 31);
    }

    #[test]
    fn plan_is_locked_during_session() {
        let mut panel = FocusPanel::new(t0());
        panel.start(t0()).unwrap();
        assert!(panel.set_plan(FocusPlan::new(60, false)).is_err());
        panel.end(t0() + Duration::minutes(1));
        assert!(panel.set_plan(FocusPlan::new(60, false)).is_ok());
    }

    #[test]
    fn end_without_session_changes_nothing() {
        let mut panel = FocusPanel::new(t0());
        assert!(panel.end(t0()).is_empty());
        assert_eq!(panel.progress.completed_minutes(), 0);
    }

    #[test]
    fn tick_rolls_day_over() {
        let mut panel = FocusPanel::new(t0());
        let events = panel.tick(t0() + Duration::days(1));
        assert!(matches!(events[0], Event::DayRolledOver { .. }));
    }
}
