//! Plain-text rendering of core view-models.

use stride_core::view::{FocusView, SettingsView, StopwatchView, TaskListView};
use stride_core::{Notice, NoticeLevel, StopwatchState};

pub fn notice(n: &Notice) -> String {
    let tag = match n.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warn",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}: {}", n.title, n.content)
}

pub fn focus(view: &FocusView) -> String {
    let mut out = vec![format!(
        "Focus  {}{}  ({})",
        view.duration,
        if view.skip_breaks { " no breaks" } else { "" },
        view.button_label
    )];
    out.push(format!("  {}", view.hint));
    out.push(format!("  Mascot: {}", view.mascot.asset_path()));
    if let Some(status) = &view.status {
        out.push(format!("  {}: {}", status.title, status.content));
    }
    let p = &view.progress;
    out.push(format!(
        "  {}  [{}/{}]  {}",
        p.label, p.ring_value, p.target_minutes, p.ring_format
    ));
    out.push(format!(
        "  Yesterday: {} minutes  Streak: {} days",
        p.yesterday_minutes, p.streak_days
    ));
    out.join("\n")
}

pub fn tasks(view: &TaskListView) -> String {
    let mut out = vec![format!("Tasks  {}", view.hint)];
    for row in &view.rows {
        let mark = if row.completed { "x" } else { " " };
        out.push(format!("  {:>2}. [{mark}] {}", row.number, row.name));
    }
    out.join("\n")
}

pub fn stopwatch(view: &StopwatchView) -> String {
    let state = match view.state {
        StopwatchState::Stopped => "stopped",
        StopwatchState::Running => "running",
        StopwatchState::Paused => "paused",
    };
    let mut out = vec![format!("Stopwatch  {}  ({state})", view.display)];
    for lap in &view.laps {
        out.push(format!("  {}. {}", lap.index, lap.time));
    }
    out.join("\n")
}

pub fn settings(view: &SettingsView) -> String {
    let mut out = vec!["Settings".to_string()];
    for group in &view.groups {
        out.push(format!("  {}", group.title));
        for card in &group.cards {
            let disabled = if card.enabled { "" } else { " (unavailable)" };
            out.push(format!(
                "    {:<28} {}{disabled}\n      {}: {}",
                card.key, card.value, card.title, card.description
            ));
        }
    }
    out.push(format!("  Help: {}", view.help_url));
    out.join("\n")
}
