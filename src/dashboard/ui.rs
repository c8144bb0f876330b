//! TUI event loop for the dashboard.

use super::app::App;
use super::model::ReportFilter;
use super::terminal::TerminalGuard;
use super::EVENT_POLL_MS;
use crate::report::AuditRow;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub(super) fn run_tui(report: PathBuf, rows: Vec<AuditRow>, filter: ReportFilter) -> Result<()> {
    let mut app = App::new(report, rows, filter);

    let mut guard = TerminalGuard::enter()?;
    let mut terminal = ratatui::Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("init terminal")?;

    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("draw dashboard")?;

        if !event::poll(Duration::from_millis(EVENT_POLL_MS)).context("poll event")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = action_from_key(key) else {
            continue;
        };
        match action {
            Action::Quit => {
                if app.show_help {
                    app.toggle_help();
                } else {
                    break;
                }
            }
            Action::NextTab => app.next_tab(),
            Action::PrevTab => app.prev_tab(),
            Action::Up => app.move_selection(-1),
            Action::Down => app.move_selection(1),
            Action::PageUp => app.move_selection(-10),
            Action::PageDown => app.move_selection(10),
            Action::ToggleExpanded => app.toggle_expanded(),
            Action::CycleStatus => app.cycle_status_filter(),
            Action::CycleKind => app.cycle_kind_filter(),
            Action::CycleId => app.cycle_id_filter(),
            Action::ClearFilters => app.clear_filters(),
            Action::Reload => match app.reload() {
                Ok(()) => app.set_message("reloaded".to_string()),
                Err(err) => app.set_message(format!("reload failed: {err}")),
            },
            Action::ToggleHelp => app.toggle_help(),
        }
    }

    guard.restore();
    terminal.show_cursor().ok();
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Quit,
    NextTab,
    PrevTab,
    Up,
    Down,
    PageUp,
    PageDown,
    ToggleExpanded,
    CycleStatus,
    CycleKind,
    CycleId,
    ClearFilters,
    Reload,
    ToggleHelp,
}

fn action_from_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PrevTab),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Enter => Some(Action::ToggleExpanded),
        KeyCode::Char('s') => Some(Action::CycleStatus),
        KeyCode::Char('t') => Some(Action::CycleKind),
        KeyCode::Char('i') => Some(Action::CycleId),
        KeyCode::Char('c') => Some(Action::ClearFilters),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}
