//! Application context.
//!
//! [`App`] owns the settings, the logged-in session and every screen's
//! state. Front ends hand it [`Command`]s for user actions and call the two
//! periodic callbacks; everything that changed comes back as [`Event`]s.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::{LoginForm, LoginGate, Session};
use crate::error::Result;
use crate::events::Event;
use crate::focus::{FocusPanel, FocusPlan};
use crate::stopwatch::Stopwatch;
use crate::storage::Settings;
use crate::view::{FocusView, SettingsView, StopwatchView, TaskListView};

/// Navigation targets of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Focus,
    Stopwatch,
    Settings,
}

/// Every user action the main window can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a session, optionally replacing the picker values first.
    StartFocus(Option<FocusPlan>),
    /// End the running session. Front ends confirm with the user first.
    EndFocus,
    SetFocusPlan(FocusPlan),
    SetDailyTarget(u32),
    AddTask(String),
    RenameTask { index: usize, name: String },
    RemoveTask(usize),
    ToggleTask(usize),
    ClearCompletedTasks,
    /// Front ends confirm with the user first.
    ClearAllTasks,
    ToggleStopwatch,
    FlagLap,
    ResetStopwatch,
    ChangeSetting { key: String, value: String },
    Navigate(Screen),
    ShowHelp,
    PokeMascot,
}

pub struct App {
    session: Session,
    settings: Settings,
    /// Where setting changes are written; `None` keeps them in memory.
    settings_path: Option<PathBuf>,
    screen: Screen,
    focus: FocusPanel,
    stopwatch: Stopwatch,
}

impl App {
    pub fn new(
        session: Session,
        settings: Settings,
        settings_path: Option<PathBuf>,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            session,
            settings,
            settings_path,
            screen: Screen::default(),
            focus: FocusPanel::new(now),
            stopwatch: Stopwatch::new(),
        }
    }

    /// Run the login gate and open the main window on success.
    /// The returned event carries the welcome message.
    pub fn login(
        gate: &LoginGate,
        form: &LoginForm,
        settings: Settings,
        settings_path: Option<PathBuf>,
        now: DateTime<Local>,
    ) -> Result<(Self, Event)> {
        let session = gate.authenticate(form)?;
        let event = Event::LoggedIn {
            username: session.username.clone(),
            guest: session.guest,
            at: now,
        };
        Ok((Self::new(session, settings, settings_path, now), event))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn focus(&self) -> &FocusPanel {
        &self.focus
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn focus_view(&self, now: DateTime<Local>) -> FocusView {
        FocusView::build(&self.focus, now)
    }

    pub fn tasks_view(&self) -> TaskListView {
        TaskListView::build(&self.focus.tasks)
    }

    pub fn stopwatch_view(&self) -> StopwatchView {
        StopwatchView::build(&self.stopwatch)
    }

    pub fn settings_view(&self) -> SettingsView {
        SettingsView::build(&self.settings)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn dispatch(&mut self, command: Command, now: DateTime<Local>) -> Result<Vec<Event>> {
        tracing::debug!(?command, "dispatch");
        let events = match command {
            Command::StartFocus(plan) => {
                if let Some(plan) = plan {
                    self.focus.set_plan(plan)?;
                }
                vec![self.focus.start(now)?]
            }
            Command::EndFocus => self.focus.end(now),
            Command::SetFocusPlan(plan) => {
                self.focus.set_plan(plan)?;
                Vec::new()
            }
            Command::SetDailyTarget(minutes) => vec![self.focus.progress.set_target(minutes)?],
            Command::AddTask(name) => vec![self.focus.tasks.add(&name, now)?],
            Command::RenameTask { index, name } => vec![self.focus.tasks.rename(index, &name)?],
            Command::RemoveTask(index) => vec![self.focus.tasks.remove(index)?],
            Command::ToggleTask(index) => vec![self.focus.tasks.toggle(index)?],
            Command::ClearCompletedTasks => vec![self.focus.tasks.clear_completed()],
            Command::ClearAllTasks => vec![self.focus.tasks.clear_all()],
            Command::ToggleStopwatch => vec![self.stopwatch.toggle()],
            Command::FlagLap => self.stopwatch.flag().into_iter().collect(),
            Command::ResetStopwatch => vec![self.stopwatch.reset()],
            Command::ChangeSetting { key, value } => vec![self.change_setting(key, value)?],
            Command::Navigate(screen) => {
                self.screen = screen;
                vec![Event::ScreenChanged { screen }]
            }
            Command::ShowHelp => vec![Event::HelpShown],
            Command::PokeMascot => vec![Event::MascotPoked {
                focusing: self.focus.timer.is_active(),
            }],
        };
        Ok(events)
    }

    /// One-second callback for the focus screen.
    pub fn tick_focus(&mut self, now: DateTime<Local>) -> Vec<Event> {
        self.focus.tick(now)
    }

    /// Ten-millisecond callback for the stopwatch.
    pub fn tick_stopwatch(&mut self) -> bool {
        self.stopwatch.tick()
    }

    fn change_setting(&mut self, key: String, value: String) -> Result<Event> {
        let mut updated = self.settings.clone();
        let requires_restart = updated.set(&key, &value)?;
        if let Some(path) = &self.settings_path {
            updated.save_to(path)?;
        }
        self.settings = updated;
        tracing::info!(key = %key, value = %value, requires_restart, "setting changed");

        Ok(Event::SettingChanged {
            key,
            value,
            requires_restart,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::error::{AuthError, CoreError};
    use crate::focus::FocusState;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn guest_app() -> App {
        App::new(Session::guest(), Settings::default(), None, t0())
    }

    #[test]
    fn login_produces_welcome() {
        let (app, event) = App::login(
            &LoginGate::default(),
            &LoginForm::with_credentials("jojo", "123456"),
            Settings::default(),
            None,
            t0(),
        )
        .unwrap();
        assert_eq!(app.session().username, "jojo");
        assert_eq!(event.notice().unwrap().content, "Welcome back, jojo!");
    }

    #[test]
    fn login_with_empty_password_fails() {
        let result = App::login(
            &LoginGate::new(Credentials::default()),
            &LoginForm::with_credentials("jojo", ""),
            Settings::default(),
            None,
            t0(),
        );
        assert!(matches!(
            result,
            Err(CoreError::Auth(AuthError::MissingPassword))
        ));
    }

    #[test]
    fn focus_cycle_through_dispatch() {
        let mut app = guest_app();
        app.dispatch(Command::StartFocus(Some(FocusPlan::new(25 * 60, false))), t0())
            .unwrap();

        let at = |secs: i64| t0() + Duration::seconds(secs);
        assert!(app.tick_focus(at(60)).is_empty());
        let events = app.tick_focus(at(25 * 60));
        assert!(matches!(events[0], Event::BreakStarted { break_secs: 300, .. }));
        let events = app.tick_focus(at(30 * 60));
        assert!(matches!(events[0], Event::BreakEnded { .. }));
        assert_eq!(app.focus().timer.state(), FocusState::Focusing);

        let events = app.dispatch(Command::EndFocus, at(31 * 60 + 30)).unwrap();
        assert!(matches!(events[0], Event::FocusEnded { minutes: 31, .. }));
        assert_eq!(app.focus().progress.completed_minutes(), 31);
    }

    #[test]
    fn invalid_start_leaves_state_idle() {
        let mut app = guest_app();
        let err = app
            .dispatch(Command::StartFocus(Some(FocusPlan::new(0, false))), t0())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(app.focus().timer.state(), FocusState::Idle);
    }

    #[test]
    fn task_commands_update_view() {
        let mut app = guest_app();
        app.dispatch(Command::AddTask("write report".into()), t0()).unwrap();
        app.dispatch(Command::AddTask("review".into()), t0()).unwrap();
        app.dispatch(Command::ToggleTask(0), t0()).unwrap();

        let view = app.tasks_view();
        assert_eq!(view.hint, "2 tasks, 1 completed");
        assert!(view.rows[1].completed);
        assert!(app.dispatch(Command::AddTask("  ".into()), t0()).is_err());
    }

    #[test]
    fn stopwatch_commands() {
        let mut app = guest_app();
        assert!(app.dispatch(Command::FlagLap, t0()).unwrap().is_empty());
        app.dispatch(Command::ToggleStopwatch, t0()).unwrap();
        for _ in 0..100 {
            app.tick_stopwatch();
        }
        let events = app.dispatch(Command::FlagLap, t0()).unwrap();
        assert!(matches!(&events[0], Event::LapRecorded { index: 1, time, .. } if time == "00:00:01.00"));
        assert_eq!(app.stopwatch_view().display, "00:00:01");
    }

    #[test]
    fn setting_change_is_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut app = App::new(Session::guest(), Settings::default(), Some(path.clone()), t0());

        let events = app
            .dispatch(
                Command::ChangeSetting {
                    key: "MainWindow.Language".into(),
                    value: "en".into(),
                },
                t0(),
            )
            .unwrap();
        assert!(matches!(
            events[0],
            Event::SettingChanged {
                requires_restart: true,
                ..
            }
        ));
        let on_disk = Settings::load_from(&path).unwrap();
        assert_eq!(on_disk.get("MainWindow.Language").as_deref(), Some("en"));
    }

    #[test]
    fn rejected_setting_change_keeps_old_settings() {
        let mut app = guest_app();
        let result = app.dispatch(
            Command::ChangeSetting {
                key: "Appearance.ThemeColor".into(),
                value: "blue".into(),
            },
            t0(),
        );
        assert!(result.is_err());
        assert_eq!(app.settings(), &Settings::default());
    }

    #[test]
    fn rejected_setting_change_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        Settings::default().save_to(&path).unwrap();
        let before = std::fs::read(&path).unwrap();
        let mut app = App::new(Session::guest(), Settings::default(), Some(path.clone()), t0());

        for (key, value) in [
            ("Appearance.ThemeColor", "blue"),
            ("Appearance.ThemeMode", "Neon"),
            ("MainWindow.Nope", "true"),
            ("MainWindow", "x"),
        ] {
            let result = app.dispatch(
                Command::ChangeSetting {
                    key: key.into(),
                    value: value.into(),
                },
                t0(),
            );
            assert!(matches!(result, Err(CoreError::Config(_))), "{key} accepted");
        }
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn mascot_reflects_focus_state() {
        let mut app = guest_app();
        let events = app.dispatch(Command::PokeMascot, t0()).unwrap();
        assert_eq!(events[0], Event::MascotPoked { focusing: false });
        app.dispatch(Command::StartFocus(None), t0()).unwrap();
        let events = app.dispatch(Command::PokeMascot, t0()).unwrap();
        assert_eq!(events[0], Event::MascotPoked { focusing: true });
    }

    #[test]
    fn navigation_changes_screen() {
        let mut app = guest_app();
        app.dispatch(Command::Navigate(Screen::Stopwatch), t0()).unwrap();
        assert_eq!(app.screen(), Screen::Stopwatch);
    }
}
