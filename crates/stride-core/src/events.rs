use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::format;

/// Every state change in the system produces an Event.
/// The front end renders them; most map to a user-facing [`Notice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    LoggedIn {
        username: String,
        guest: bool,
        at: DateTime<Local>,
    },
    FocusStarted {
        duration_secs: u64,
        /// `None` when breaks are skipped.
        break_secs: Option<u64>,
        at: DateTime<Local>,
    },
    BreakStarted {
        break_secs: u64,
        ends_at: DateTime<Local>,
        at: DateTime<Local>,
    },
    BreakEnded {
        at: DateTime<Local>,
    },
    FocusEnded {
        elapsed_secs: u64,
        /// Whole minutes credited to daily progress.
        minutes: u32,
        at: DateTime<Local>,
    },
    DailyTargetReached {
        target_minutes: u32,
        completed_minutes: u32,
        at: DateTime<Local>,
    },
    DailyTargetUpdated {
        target_minutes: u32,
    },
    DayRolledOver {
        yesterday_minutes: u32,
        streak_days: u32,
    },
    TaskAdded {
        id: Uuid,
        name: String,
    },
    TaskRenamed {
        id: Uuid,
        from: String,
        to: String,
    },
    TaskRemoved {
        id: Uuid,
        name: String,
    },
    TaskToggled {
        id: Uuid,
        name: String,
        completed: bool,
    },
    TasksCleared {
        count: usize,
        completed_only: bool,
    },
    StopwatchStarted,
    StopwatchPaused {
        elapsed_ms: u64,
    },
    LapRecorded {
        index: u32,
        time: String,
        elapsed_ms: u64,
    },
    StopwatchReset,
    SettingChanged {
        key: String,
        value: String,
        requires_restart: bool,
    },
    ScreenChanged {
        screen: crate::app::Screen,
    },
    HelpShown,
    MascotPoked {
        focusing: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient message for the user, the headless form of an info bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub content: String,
}

pub const HELP_TITLE: &str = "Hello there";
pub const HELP_TEXT: &str = "Everyone has their own pace and their own choices. \
There is no right or wrong, no higher or lower, only what fits and feels \
true to you. May we all make choices we can stand behind.";

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn from_error(err: &CoreError) -> Self {
        match err {
            CoreError::Auth(e) => Self::new(NoticeLevel::Error, "Login failed", e.to_string()),
            CoreError::Validation(e) => Self::new(NoticeLevel::Error, "Error", e.to_string()),
            other => Self::new(NoticeLevel::Error, "Error", other.to_string()),
        }
    }
}

impl Event {
    /// The notice the front end should show for this event, if any.
    pub fn notice(&self) -> Option<Notice> {
        use NoticeLevel::*;

        let notice = match self {
            Event::LoggedIn { username, .. } => {
                Notice::new(Success, "Welcome", format!("Welcome back, {username}!"))
            }
            Event::FocusStarted { .. } => {
                Notice::new(Info, "Focus in progress", "Stay focused, don't get distracted")
            }
            Event::BreakStarted { break_secs, .. } => Notice::new(
                Info,
                "Break time",
                format!(
                    "Stand up and move around, rest your eyes ({})",
                    format::ms(*break_secs)
                ),
            ),
            Event::BreakEnded { .. } => {
                Notice::new(Info, "Focus in progress", "Break is over, back to focus")
            }
            Event::FocusEnded { elapsed_secs, .. } => Notice::new(
                Success,
                "Focus complete",
                format!("Session length: {}", format::hms(*elapsed_secs)),
            ),
            Event::DailyTargetReached { target_minutes, .. } => Notice::new(
                Success,
                "Target reached",
                format!("You reached today's {target_minutes}-minute focus target!"),
            ),
            Event::DailyTargetUpdated { target_minutes } => Notice::new(
                Success,
                "Target updated",
                format!("Daily target set to {target_minutes} minutes"),
            ),
            Event::DayRolledOver { .. } => return None,
            Event::TaskAdded { name, .. } => {
                Notice::new(Success, "Task added", format!("Added task: {name}"))
            }
            Event::TaskRenamed { to, .. } => {
                Notice::new(Success, "Task renamed", format!("Task renamed to: {to}"))
            }
            Event::TaskRemoved { name, .. } => {
                Notice::new(Success, "Task deleted", format!("Deleted task: {name}"))
            }
            Event::TaskToggled {
                name, completed: true, ..
            } => Notice::new(Success, "Task completed", name.clone()),
            Event::TaskToggled {
                name, completed: false, ..
            } => Notice::new(Warning, "Task not completed", name.clone()),
            Event::TasksCleared {
                count: 0,
                completed_only: true,
            } => Notice::new(Info, "Nothing to clear", "There are no completed tasks"),
            Event::TasksCleared {
                count: 0,
                completed_only: false,
            } => Notice::new(Info, "Nothing to clear", "The task list is empty"),
            Event::TasksCleared {
                count,
                completed_only: true,
            } => Notice::new(
                Success,
                "Cleared",
                format!("Cleared {count} completed task(s)"),
            ),
            Event::TasksCleared { count, .. } => {
                Notice::new(Success, "Cleared", format!("Cleared all {count} task(s)"))
            }
            Event::StopwatchStarted | Event::StopwatchPaused { .. } => return None,
            Event::LapRecorded { index, time, .. } => {
                Notice::new(Success, format!("Flag #{index}"), time.clone())
            }
            Event::StopwatchReset => {
                Notice::new(Info, "Stopwatch reset", "The stopwatch was reset to zero")
            }
            Event::SettingChanged {
                requires_restart: true,
                ..
            } => Notice::new(
                Success,
                "Updated successfully",
                "Configuration takes effect after restart",
            ),
            Event::SettingChanged { key, value, .. } => {
                Notice::new(Success, "Setting saved", format!("{key} = {value}"))
            }
            Event::ScreenChanged { .. } => return None,
            Event::HelpShown => Notice::new(Info, HELP_TITLE, HELP_TEXT),
            Event::MascotPoked { focusing: true } => Notice::new(Success, "🍵", "Working..."),
            Event::MascotPoked { focusing: false } => Notice::new(Success, "🐧", "Resting."),
        };
        Some(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, ValidationError};

    #[test]
    fn empty_clear_is_informational() {
        let notice = Event::TasksCleared {
            count: 0,
            completed_only: true,
        }
        .notice()
        .unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
    }

    #[test]
    fn auth_errors_render_verbatim() {
        let notice = Notice::from_error(&CoreError::Auth(AuthError::MissingPassword));
        assert_eq!(notice.title, "Login failed");
        assert_eq!(notice.content, "please enter password");
    }

    #[test]
    fn validation_errors_render_as_error_level() {
        let err = CoreError::from(ValidationError::InvalidDuration { secs: 0 });
        assert_eq!(Notice::from_error(&err).level, NoticeLevel::Error);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(Event::StopwatchReset).unwrap();
        assert_eq!(json["type"], "StopwatchReset");
    }
}
