use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Settings;
use crate::models::ReportKind;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;

pub(crate) fn as_tui(settings: Settings) -> Result<()> {
    let mut app = App::new(settings);
    app.refresh_file_browser();
    tracing::info!(dir = %app.file_browser_path.display(), "starting tui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Confirm => handle_confirm_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App) -> Result<()> {
    if app.screen == Screen::Sources && app.file_browser_input_focused {
        handle_file_browser_input(key, app);
        return Ok(());
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => app.running = false,
        KeyCode::Char('d') if ctrl => page_down(app),
        KeyCode::Char('u') if ctrl => page_up(app),
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('1') => app.switch_screen(Screen::Sources),
        KeyCode::Char('2') => app.switch_screen(Screen::Results),
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match app.screen {
                Screen::Sources => Screen::Results,
                Screen::Results => Screen::Sources,
            };
            app.switch_screen(next);
        }
        KeyCode::Char('/') if app.screen == Screen::Sources => {
            app.file_browser_input_focused = true;
        }
        KeyCode::Char('j') | KeyCode::Down => move_down(app),
        KeyCode::Char('k') | KeyCode::Up => move_up(app),
        KeyCode::Char('g') => cursor_top(app),
        KeyCode::Char('G') => cursor_bottom(app),
        KeyCode::Enter if app.screen == Screen::Sources => open_selected(app),
        KeyCode::Backspace if app.screen == Screen::Sources => browse_parent(app),
        KeyCode::Char('.') if app.screen == Screen::Sources => {
            app.file_browser_show_hidden = !app.file_browser_show_hidden;
            app.refresh_file_browser();
        }
        KeyCode::Char('b') if app.screen == Screen::Sources => {
            app.active_slot = ReportKind::Burn;
            app.set_status("Pick the Burn report");
        }
        KeyCode::Char('i') if app.screen == Screen::Sources => {
            app.active_slot = ReportKind::Invoice;
            app.set_status("Pick the Invoice report");
        }
        KeyCode::Char('f') if app.screen == Screen::Results => {
            app.cycle_result_filter();
            match app.result_filter {
                Some(c) => app.set_status(format!("Showing {c} rows")),
                None => app.set_status("Showing all rows"),
            }
        }
        KeyCode::Char('e') if app.screen == Screen::Results => {
            commands::handle_command("export", app)?;
        }
        KeyCode::Char('R') if app.screen == Screen::Results => {
            commands::handle_command("run", app)?;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_file_browser_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) => {
            app.file_browser_filter.push(c);
            app.file_browser_cursor.top();
        }
        KeyCode::Backspace => {
            if app.file_browser_filter.pop().is_none() {
                browse_parent(app);
                app.file_browser_input_focused = true;
            }
            app.file_browser_cursor.top();
        }
        KeyCode::Down => app.file_browser_input_focused = false,
        KeyCode::Esc => {
            if app.file_browser_filter.is_empty() {
                app.file_browser_input_focused = false;
            } else {
                app.file_browser_filter.clear();
                app.file_browser_cursor.top();
            }
        }
        KeyCode::Enter => {
            let filtered = app.file_browser_filtered();
            match filtered.as_slice() {
                [only] => {
                    if let Some(path) = app.file_browser_entries.get(*only).cloned() {
                        app.open_browser_entry(path);
                    }
                }
                _ => app.file_browser_input_focused = false,
            }
        }
        _ => {}
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::OverwriteExport { path }) = app.pending_action.take() {
                commands::export_to(app, &path);
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn list_len(app: &App) -> usize {
    match app.screen {
        Screen::Sources => app.file_browser_filtered().len(),
        Screen::Results => app.visible_results().len(),
    }
}

fn move_down(app: &mut App) {
    let (len, page) = (list_len(app), app.visible_rows);
    match app.screen {
        Screen::Sources => app.file_browser_cursor.down(len, page),
        Screen::Results => app.result_cursor.down(len, page),
    }
}

fn move_up(app: &mut App) {
    match app.screen {
        Screen::Sources => app.file_browser_cursor.up(),
        Screen::Results => app.result_cursor.up(),
    }
}

fn page_down(app: &mut App) {
    let (len, page) = (list_len(app), app.visible_rows);
    match app.screen {
        Screen::Sources => app.file_browser_cursor.page_down(len, page),
        Screen::Results => app.result_cursor.page_down(len, page),
    }
}

fn page_up(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Sources => app.file_browser_cursor.page_up(page),
        Screen::Results => app.result_cursor.page_up(page),
    }
}

fn cursor_top(app: &mut App) {
    match app.screen {
        Screen::Sources => app.file_browser_cursor.top(),
        Screen::Results => app.result_cursor.top(),
    }
}

fn cursor_bottom(app: &mut App) {
    let (len, page) = (list_len(app), app.visible_rows);
    match app.screen {
        Screen::Sources => app.file_browser_cursor.bottom(len, page),
        Screen::Results => app.result_cursor.bottom(len, page),
    }
}

fn open_selected(app: &mut App) {
    let filtered = app.file_browser_filtered();
    let selected = filtered
        .get(app.file_browser_cursor.index)
        .and_then(|&i| app.file_browser_entries.get(i))
        .cloned();
    if let Some(path) = selected {
        app.open_browser_entry(path);
    }
}

fn browse_parent(app: &mut App) {
    if let Some(parent) = app.file_browser_path.parent().map(|p| p.to_path_buf()) {
        app.file_browser_path = parent;
        app.refresh_file_browser();
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
