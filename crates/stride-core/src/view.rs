//! Declarative view-models.
//!
//! Each screen is described as plain data built from the core state. A
//! front end only needs to render these structs and turn user input back
//! into [`crate::app::Command`]s.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::focus::{FocusPanel, FocusState};
use crate::format;
use crate::stopwatch::{Lap, Stopwatch, StopwatchControls, StopwatchState};
use crate::storage::{mica_supported, Settings, HELP_URL};
use crate::task::TaskList;

/// The picture on the focus screen: a still image while idle, an
/// animation during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mascot {
    Still,
    Animated,
}

impl Mascot {
    pub fn asset_path(self) -> &'static str {
        match self {
            Mascot::Still => "resource/images/tong_resized.jpg",
            Mascot::Animated => "resource/images/tong.gif",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub target_minutes: u32,
    pub completed_minutes: u32,
    pub ring_value: u32,
    pub ring_format: String,
    pub label: String,
    pub yesterday_minutes: u32,
    pub streak_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusView {
    pub state: FocusState,
    pub button_label: &'static str,
    pub duration: String,
    pub skip_breaks: bool,
    pub hint: String,
    /// Picker and skip toggle are disabled while a session runs.
    pub controls_locked: bool,
    pub status: Option<StatusView>,
    pub mascot: Mascot,
    pub progress: ProgressView,
}

impl FocusView {
    pub fn build(panel: &FocusPanel, now: DateTime<Local>) -> Self {
        let state = panel.timer.state();
        let status = match state {
            FocusState::Idle => None,
            FocusState::Focusing => Some(StatusView {
                title: "Focus in progress".into(),
                content: format!(
                    "Focused for: {}",
                    format::hms(panel.timer.elapsed(now).num_seconds().max(0) as u64)
                ),
            }),
            FocusState::OnBreak => Some(StatusView {
                title: "Break time".into(),
                content: format!(
                    "Break remaining: {}",
                    format::ms(
                        panel
                            .timer
                            .break_remaining(now)
                            .map(|d| d.num_seconds().max(0) as u64)
                            .unwrap_or(0)
                    )
                ),
            }),
        };
        let active = state != FocusState::Idle;
        let progress = &panel.progress;

        Self {
            state,
            button_label: if active { "End focus" } else { "Start focus period" },
            duration: format::hms(panel.plan.duration_secs().max(0) as u64),
            skip_breaks: panel.plan.skip_breaks,
            hint: panel.plan.hint(),
            controls_locked: active,
            status,
            mascot: if active { Mascot::Animated } else { Mascot::Still },
            progress: ProgressView {
                target_minutes: progress.target_minutes(),
                completed_minutes: progress.completed_minutes(),
                ring_value: progress.ring_value(),
                ring_format: format!("Target {} minutes", progress.target_minutes()),
                label: progress.label(),
                yesterday_minutes: progress.yesterday_minutes(),
                streak_days: progress.streak_days(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    /// 1-based position in the list, used to address the task.
    pub number: usize,
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListView {
    /// Newest first.
    pub rows: Vec<TaskRow>,
    pub hint: String,
}

impl TaskListView {
    pub fn build(tasks: &TaskList) -> Self {
        let rows = tasks
            .tasks()
            .iter()
            .enumerate()
            .rev()
            .map(|(i, t)| TaskRow {
                number: i + 1,
                name: t.name.clone(),
                completed: t.completed,
            })
            .collect();
        Self {
            rows,
            hint: tasks.summary(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopwatchView {
    pub state: StopwatchState,
    pub display: String,
    pub controls: StopwatchControls,
    pub laps: Vec<Lap>,
}

impl StopwatchView {
    pub fn build(stopwatch: &Stopwatch) -> Self {
        Self {
            state: stopwatch.state(),
            display: stopwatch.display(),
            controls: stopwatch.controls(),
            laps: stopwatch.laps().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingCard {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub value: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsGroup {
    pub title: &'static str,
    pub cards: Vec<SettingCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsView {
    pub groups: Vec<SettingsGroup>,
    pub help_url: &'static str,
}

impl SettingsView {
    pub fn build(settings: &Settings) -> Self {
        let card = |key: &'static str, title: &'static str, description: &'static str, enabled: bool| SettingCard {
            key,
            title,
            description,
            value: settings.get(key).unwrap_or_default(),
            enabled,
        };

        Self {
            groups: vec![
                SettingsGroup {
                    title: "Personalization",
                    cards: vec![
                        card(
                            "MainWindow.MicaEnabled",
                            "Mica effect",
                            "Apply semi transparent to windows and surfaces",
                            mica_supported(),
                        ),
                        card(
                            "Appearance.ThemeMode",
                            "Application theme",
                            "Light, Dark, or Auto to follow the system",
                            true,
                        ),
                        card(
                            "Appearance.ThemeColor",
                            "Theme color",
                            "Accent color as #RRGGBB",
                            true,
                        ),
                        card(
                            "MainWindow.Language",
                            "Language",
                            "zh_CN, zh_HK, en or Auto (applies after restart)",
                            true,
                        ),
                    ],
                },
                SettingsGroup {
                    title: "Main Panel",
                    cards: vec![card(
                        "MainWindow.MinimizeToTray",
                        "Minimize to tray after closing",
                        "Keep running in the background when the window closes",
                        true,
                    )],
                },
            ],
            help_url: HELP_URL,
        }
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
    fn idle_focus_view() {
        let panel = FocusPanel::new(t0());
        let view = FocusView::build(&panel, t0());
        assert_eq!(view.button_label, "Start focus period");
        assert_eq!(view.duration, "00:25:00");
        assert!(!view.controls_locked);
        assert_eq!(view.status, None);
        assert_eq!(view.mascot.asset_path(), "resource/images/tong_resized.jpg");
        assert_eq!(view.progress.ring_format, "Target 120 minutes");
    }

    #[test]
    fn running_focus_view_shows_elapsed_then_break() {
        let mut panel = FocusPanel::new(t0());
        panel.start(t0()).unwrap();

        let view = FocusView::build(&panel, t0() + Duration::seconds(65));
        assert!(view.controls_locked);
        assert_eq!(view.mascot, Mascot::Animated);
        assert_eq!(view.status.unwrap().content, "Focused for: 00:01:05");

        panel.tick(t0() + Duration::minutes(25));
        let view = FocusView::build(&panel, t0() + Duration::minutes(26));
        let status = view.status.unwrap();
        assert_eq!(status.title, "Break time");
        assert_eq!(status.content, "Break remaining: 04:00");
    }

    #[test]
    fn task_rows_are_newest_first() {
        let mut tasks = TaskList::new();
        tasks.add("first", t0()).unwrap();
        tasks.add("second", t0()).unwrap();
        let view = TaskListView::build(&tasks);
        assert_eq!(view.rows[0].name, "second");
        assert_eq!(view.rows[0].number, 2);
        assert_eq!(view.rows[1].number, 1);
        assert_eq!(view.hint, "2 tasks, 0 completed");
    }

    #[test]
    fn settings_view_reads_current_values() {
        let view = SettingsView::build(&Settings::default());
        let tray = &view.groups[1].cards[0];
        assert_eq!(tray.key, "MainWindow.MinimizeToTray");
        assert_eq!(tray.value, "true");
        assert_eq!(view.groups[0].cards[0].enabled, mica_supported());
    }
}
