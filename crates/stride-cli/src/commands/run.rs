//! Interactive session: login, then a single-threaded event loop that
//! multiplexes user input with the focus and stopwatch ticks.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use clap::Args;
use stride_core::stopwatch::TICK_MS;
use stride_core::storage::{self, Settings};
use stride_core::{App, Command, CoreError, Event, LoginForm, LoginGate, Notice, NoticeLevel, Screen};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{interval, MissedTickBehavior};

use crate::render;
use crate::shell::{self, Input, View};

type StdinLines = Lines<BufReader<Stdin>>;

#[derive(Args)]
pub struct RunArgs {
    /// Log in as guest without credentials
    #[arg(long, conflicts_with_all = ["username", "password"])]
    guest: bool,
    /// Username; prompts on stdin when omitted
    #[arg(long, requires = "password")]
    username: Option<String>,
    /// Password; prompts on stdin when omitted
    #[arg(long, requires = "username")]
    password: Option<String>,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let path = storage::settings_path()?;
    let settings = Settings::load_from(&path)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session(args, settings, path));
    // A pending stdin read would otherwise hold shutdown open.
    runtime.shutdown_background();
    result
}

async fn session(args: RunArgs, settings: Settings, path: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let gate = LoginGate::default();
    let (app, welcome) = login(&gate, &args, &mut lines, settings, path).await?;

    let mut shell = Shell::new(app);
    shell.print_events(&[welcome]);
    shell.show(None, false)?;

    let mut focus_tick = interval(Duration::from_secs(1));
    focus_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut stopwatch_tick = interval(Duration::from_millis(TICK_MS));
    stopwatch_tick.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if shell.handle(&line, Local::now())? == Flow::Quit {
                    break;
                }
            }
            _ = focus_tick.tick() => {
                let events = shell.app.tick_focus(Local::now());
                shell.print_events(&events);
            }
            _ = stopwatch_tick.tick() => {
                shell.app.tick_stopwatch();
            }
        }
    }
    tracing::debug!("session closed");
    Ok(())
}

async fn login(
    gate: &LoginGate,
    args: &RunArgs,
    lines: &mut StdinLines,
    settings: Settings,
    path: PathBuf,
) -> Result<(App, Event), Box<dyn Error>> {
    if args.guest {
        return Ok(App::login(gate, &LoginForm::guest(), settings, Some(path), Local::now())?);
    }

    if let (Some(username), Some(password)) = (&args.username, &args.password) {
        let form = LoginForm::with_credentials(username.clone(), password.clone());
        return App::login(gate, &form, settings, Some(path), Local::now()).map_err(|e| {
            println!("{}", render::notice(&Notice::from_error(&e)));
            e.into()
        });
    }

    loop {
        let Some(username) = prompt(lines, "username: ").await? else {
            return Err("login aborted".into());
        };
        let Some(password) = prompt(lines, "password: ").await? else {
            return Err("login aborted".into());
        };
        let form = LoginForm::with_credentials(username, password);
        match App::login(gate, &form, settings.clone(), Some(path.clone()), Local::now()) {
            Ok(logged_in) => return Ok(logged_in),
            Err(e @ CoreError::Auth(_)) => println!("{}", render::notice(&Notice::from_error(&e))),
            Err(e) => return Err(e.into()),
        }
    }
}

async fn prompt(lines: &mut StdinLines, label: &str) -> std::io::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    lines.next_line().await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Questions answered by the next input line.
#[derive(Debug, Clone, Copy)]
enum Confirm {
    EndFocus,
    ClearAllTasks,
}

struct Shell {
    app: App,
    pending: Option<Confirm>,
}

impl Shell {
    fn new(app: App) -> Self {
        Self { app, pending: None }
    }

    fn handle(&mut self, line: &str, now: DateTime<Local>) -> Result<Flow, Box<dyn Error>> {
        if let Some(confirm) = self.pending.take() {
            if matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
                let command = match confirm {
                    Confirm::EndFocus => Command::EndFocus,
                    Confirm::ClearAllTasks => Command::ClearAllTasks,
                };
                self.run_command(command, now)?;
            } else {
                println!("cancelled");
            }
            return Ok(Flow::Continue);
        }

        match shell::parse_line(line) {
            Err(message) => {
                println!("{}", render::notice(&Notice::new(NoticeLevel::Error, "Error", message)));
            }
            Ok(Input::Empty) => {}
            Ok(Input::Usage) => println!("{}", shell::USAGE),
            Ok(Input::Quit) => return Ok(Flow::Quit),
            Ok(Input::Show { view, json }) => self.show(view, json)?,
            Ok(Input::Command(Command::EndFocus)) => {
                if self.app.focus().timer.is_active() {
                    self.pending = Some(Confirm::EndFocus);
                    println!("End the current focus session? [y/N]");
                } else {
                    println!("No focus session is running.");
                }
            }
            Ok(Input::Command(Command::ClearAllTasks)) if !self.app.focus().tasks.is_empty() => {
                self.pending = Some(Confirm::ClearAllTasks);
                println!("Clear all tasks? This cannot be undone. [y/N]");
            }
            Ok(Input::Command(command)) => self.run_command(command, now)?,
        }
        Ok(Flow::Continue)
    }

    fn run_command(&mut self, command: Command, now: DateTime<Local>) -> Result<(), Box<dyn Error>> {
        let follow_up = view_after(&command);
        match self.app.dispatch(command, now) {
            Ok(events) => {
                self.print_events(&events);
                if follow_up.is_some() {
                    self.show(follow_up, false)?;
                }
            }
            Err(e @ (CoreError::Validation(_) | CoreError::Config(_))) => {
                println!("{}", render::notice(&Notice::from_error(&e)));
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn print_events(&self, events: &[Event]) {
        for notice in events.iter().filter_map(Event::notice) {
            println!("{}", render::notice(&notice));
        }
    }

    fn show(&self, view: Option<View>, json: bool) -> Result<(), Box<dyn Error>> {
        let now = Local::now();
        let views = match view {
            Some(v) => vec![v],
            None => match self.app.screen() {
                Screen::Focus => vec![View::Focus, View::Tasks],
                Screen::Stopwatch => vec![View::Stopwatch],
                Screen::Settings => vec![View::Settings],
            },
        };

        for view in views {
            let text = match (view, json) {
                (View::Focus, false) => render::focus(&self.app.focus_view(now)),
                (View::Tasks, false) => render::tasks(&self.app.tasks_view()),
                (View::Stopwatch, false) => render::stopwatch(&self.app.stopwatch_view()),
                (View::Settings, false) => render::settings(&self.app.settings_view()),
                (View::Focus, true) => serde_json::to_string_pretty(&self.app.focus_view(now))?,
                (View::Tasks, true) => serde_json::to_string_pretty(&self.app.tasks_view())?,
                (View::Stopwatch, true) => serde_json::to_string_pretty(&self.app.stopwatch_view())?,
                (View::Settings, true) => serde_json::to_string_pretty(&self.app.settings_view())?,
            };
            println!("{text}");
        }
        Ok(())
    }
}

/// The view re-rendered after a command.
fn view_after(command: &Command) -> Option<View> {
    match command {
        Command::StartFocus(_)
        | Command::EndFocus
        | Command::SetFocusPlan(_)
        | Command::SetDailyTarget(_) => Some(View::Focus),
        Command::AddTask(_)
        | Command::RenameTask { .. }
        | Command::RemoveTask(_)
        | Command::ToggleTask(_)
        | Command::ClearCompletedTasks
        | Command::ClearAllTasks => Some(View::Tasks),
        Command::ToggleStopwatch | Command::ResetStopwatch => Some(View::Stopwatch),
        Command::Navigate(Screen::Focus) => Some(View::Focus),
        Command::Navigate(Screen::Stopwatch) => Some(View::Stopwatch),
        Command::Navigate(Screen::Settings) => Some(View::Settings),
        Command::FlagLap | Command::ChangeSetting { .. } | Command::ShowHelp | Command::PokeMascot => {
            None
        }
    }
}
