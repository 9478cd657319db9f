//! # Penguin Stride Core Library
//!
//! The state behind the Penguin Stride productivity app: a login gate, a
//! focus timer with automatic breaks and daily progress, a task list, a
//! stopwatch with lap flags, and JSON-backed settings. There is no GUI here;
//! screens are exposed as view-models so any front end can render them.
//!
//! ## Architecture
//!
//! - **App**: explicit application context owning settings, the session and
//!   every screen. User actions go in as [`Command`]s, changes come out as
//!   [`Event`]s.
//! - **Focus**: wall-clock state machine that the caller ticks once per second
//! - **Stopwatch**: counter advanced by a 10 ms tick
//! - **Storage**: settings file and data directory
//!
//! ## Key Components
//!
//! - [`App`]: application context
//! - [`FocusTimer`]: focus/break state machine
//! - [`Stopwatch`]: stopwatch with laps
//! - [`Settings`]: application configuration management

pub mod app;
pub mod auth;
pub mod error;
pub mod events;
pub mod focus;
pub mod format;
pub mod stopwatch;
pub mod storage;
pub mod task;
pub mod view;

pub use app::{App, Command, Screen};
pub use auth::{Credentials, LoginForm, LoginGate, Session};
pub use error::{AuthError, ConfigError, CoreError, ValidationError};
pub use events::{Event, Notice, NoticeLevel};
pub use focus::{DailyProgress, FocusPanel, FocusPlan, FocusState, FocusTimer};
pub use stopwatch::{Lap, Stopwatch, StopwatchState};
pub use storage::Settings;
pub use task::{Task, TaskList};
