//! Line grammar of the interactive session.

use stride_core::{Command, FocusPlan, Screen};

use crate::duration::parse_duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Focus,
    Tasks,
    Stopwatch,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Render a view; `None` means the current screen.
    Show { view: Option<View>, json: bool },
    Usage,
    Quit,
    Empty,
}

pub const USAGE: &str = "\
commands:
  focus start [DURATION] [--skip-breaks]   start a focus session (25m, 1h30m, 25:00)
  focus plan DURATION [--skip-breaks]      set the picker without starting
  focus end                                end the session (asks to confirm)
  target MINUTES                           set the daily target
  task add NAME | rename N NAME | rm N | done N | clear-done | clear | list
  sw toggle | flag | reset | laps          stopwatch
  set KEY VALUE                            change a setting (see `show settings`)
  go focus|stopwatch|settings              switch screen
  show [focus|tasks|stopwatch|settings] [--json]
  mascot | about | help | quit";

pub fn parse_line(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let input = match head {
        "focus" => parse_focus(&rest)?,
        "target" => {
            let minutes = one_arg(&rest, "target MINUTES")?
                .parse::<u32>()
                .map_err(|_| "target must be a whole number of minutes".to_string())?;
            Input::Command(Command::SetDailyTarget(minutes))
        }
        "task" => parse_task(&rest)?,
        "sw" | "stopwatch" => parse_stopwatch(&rest)?,
        "set" => match rest.as_slice() {
            [key, value @ ..] if !value.is_empty() => Input::Command(Command::ChangeSetting {
                key: key.to_string(),
                value: value.join(" "),
            }),
            _ => return Err("usage: set KEY VALUE".to_string()),
        },
        "go" => Input::Command(Command::Navigate(parse_screen(one_arg(&rest, "go SCREEN")?)?)),
        "show" => parse_show(&rest)?,
        "settings" => Input::Show {
            view: Some(View::Settings),
            json: false,
        },
        "mascot" => Input::Command(Command::PokeMascot),
        "about" => Input::Command(Command::ShowHelp),
        "help" | "?" => Input::Usage,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("unknown command '{other}', try `help`")),
    };
    Ok(input)
}

fn parse_focus(args: &[&str]) -> Result<Input, String> {
    let skip_breaks = args.contains(&"--skip-breaks");
    let positional: Vec<&str> = args
        .iter()
        .copied()
        .filter(|a| *a != "--skip-breaks")
        .collect();

    let plan_from = |d: &str| -> Result<FocusPlan, String> {
        Ok(FocusPlan::new(parse_duration(d)?, skip_breaks))
    };

    let command = match positional.as_slice() {
        ["start"] if skip_breaks => {
            return Err("give a duration together with --skip-breaks".to_string());
        }
        ["start"] => Command::StartFocus(None),
        ["start", d] => Command::StartFocus(Some(plan_from(*d)?)),
        ["plan", d] => Command::SetFocusPlan(plan_from(*d)?),
        ["end"] => Command::EndFocus,
        _ => return Err("usage: focus start|plan|end".to_string()),
    };
    Ok(Input::Command(command))
}

fn parse_task(args: &[&str]) -> Result<Input, String> {
    let command = match args {
        ["add", name @ ..] if !name.is_empty() => Command::AddTask(name.join(" ")),
        ["add"] => return Err("usage: task add NAME".to_string()),
        ["rename", n, name @ ..] if !name.is_empty() => Command::RenameTask {
            index: task_index(n)?,
            name: name.join(" "),
        },
        ["rm" | "delete", n] => Command::RemoveTask(task_index(n)?),
        ["done" | "toggle", n] => Command::ToggleTask(task_index(n)?),
        ["clear-done"] => Command::ClearCompletedTasks,
        ["clear"] => Command::ClearAllTasks,
        ["list"] | [] => {
            return Ok(Input::Show {
                view: Some(View::Tasks),
                json: false,
            })
        }
        _ => return Err("usage: task add|rename|rm|done|clear-done|clear|list".to_string()),
    };
    Ok(Input::Command(command))
}

fn parse_stopwatch(args: &[&str]) -> Result<Input, String> {
    let command = match args {
        ["toggle" | "start" | "pause"] => Command::ToggleStopwatch,
        ["flag" | "lap"] => Command::FlagLap,
        ["reset"] => Command::ResetStopwatch,
        ["laps" | "show"] | [] => {
            return Ok(Input::Show {
                view: Some(View::Stopwatch),
                json: false,
            })
        }
        _ => return Err("usage: sw toggle|flag|reset|laps".to_string()),
    };
    Ok(Input::Command(command))
}

fn parse_show(args: &[&str]) -> Result<Input, String> {
    let json = args.contains(&"--json");
    let names: Vec<&str> = args.iter().copied().filter(|a| *a != "--json").collect();
    let view = match names.as_slice() {
        [] => None,
        ["focus"] => Some(View::Focus),
        ["tasks"] => Some(View::Tasks),
        ["stopwatch" | "sw"] => Some(View::Stopwatch),
        ["settings"] => Some(View::Settings),
        _ => return Err("usage: show [focus|tasks|stopwatch|settings] [--json]".to_string()),
    };
    Ok(Input::Show { view, json })
}

fn parse_screen(name: &str) -> Result<Screen, String> {
    match name {
        "focus" => Ok(Screen::Focus),
        "stopwatch" | "sw" => Ok(Screen::Stopwatch),
        "settings" => Ok(Screen::Settings),
        other => Err(format!("unknown screen '{other}'")),
    }
}

/// Task numbers on screen are 1-based.
fn task_index(n: &str) -> Result<usize, String> {
    match n.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(format!("'{n}' is not a task number")),
    }
}

fn one_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, String> {
    match args {
        [one] => Ok(*one),
        _ => Err(format!("usage: {usage}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_line(line).unwrap() {
            Input::Command(c) => c,
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn focus_start_with_duration() {
        assert_eq!(
            command("focus start 25m --skip-breaks"),
            Command::StartFocus(Some(FocusPlan::new(1500, true)))
        );
        assert_eq!(command("focus start"), Command::StartFocus(None));
        assert!(parse_line("focus start --skip-breaks").is_err());
    }

    #[test]
    fn zero_duration_reaches_the_core() {
        assert_eq!(
            command("focus start 0m"),
            Command::StartFocus(Some(FocusPlan::new(0, false)))
        );
    }

    #[test]
    fn task_numbers_are_one_based() {
        assert_eq!(command("task done 1"), Command::ToggleTask(0));
        assert_eq!(
            command("task rename 2 new  name"),
            Command::RenameTask {
                index: 1,
                name: "new name".into()
            }
        );
        assert!(parse_line("task rm 0").is_err());
    }

    #[test]
    fn task_add_joins_words() {
        assert_eq!(
            command("task add Read Deep Work"),
            Command::AddTask("Read Deep Work".into())
        );
    }

    #[test]
    fn show_variants() {
        assert_eq!(
            parse_line("show tasks --json").unwrap(),
            Input::Show {
                view: Some(View::Tasks),
                json: true
            }
        );
        assert_eq!(
            parse_line("show").unwrap(),
            Input::Show {
                view: None,
                json: false
            }
        );
    }

    #[test]
    fn blank_and_unknown() {
        assert_eq!(parse_line("   ").unwrap(), Input::Empty);
        assert!(parse_line("dance").is_err());
        assert_eq!(parse_line("quit").unwrap(), Input::Quit);
    }

    #[test]
    fn set_keeps_value_spaces() {
        assert_eq!(
            command("set MainWindow.Language en"),
            Command::ChangeSetting {
                key: "MainWindow.Language".into(),
                value: "en".into()
            }
        );
        assert!(parse_line("set MainWindow.Language").is_err());
    }
}
