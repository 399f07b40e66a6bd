use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    match app.screen {
        Screen::Sources => super::screens::sources::render(f, chunks[1], app),
        Screen::Results => super::screens::results::render(f, chunks[1], app),
    }
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let label = format!("{}:{s}", i + 1);
            let style = if *s == app.screen {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            Line::from(Span::styled(label, style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn mode_style(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    Style::default()
        .fg(theme::HEADER_BG)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);

    let info = if app.results.is_empty() {
        let loaded = [app.burn.is_some(), app.invoices.is_some()]
            .iter()
            .filter(|b| **b)
            .count();
        format!(" {} | {loaded}/2 reports", app.screen)
    } else {
        format!(" {} | {} rows", app.screen, app.summary.rows)
    };

    let right = match app.screen {
        Screen::Sources if app.file_browser_input_focused => " type to filter | Esc/Down back ",
        Screen::Sources => " b/i slot | Enter pick | / filter | ? help ",
        Screen::Results => " f filter | e export | R re-run | ? help ",
    };

    let used = mode_label.len() + info.len() + right.len();
    let pad = (area.width as usize).saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style(app.input_mode)),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => (
            Line::from(Span::styled(
                " Press : for commands, ? for help",
                theme::dim_style(),
            )),
            None,
        ),
        InputMode::Normal => (
            Line::from(Span::styled(
                &app.status_message,
                theme::command_bar_style(),
            )),
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let keys = [
        "  j/k or Up/Down   Move cursor           1-2        Switch tabs",
        "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
        "  Ctrl-d/u         Page Down/Up          Ctrl-q     Quit",
        "  b/i (Sources)    Burn/Invoice slot     .          Toggle hidden files",
        "  / (Sources)      Filter file list      Esc        Clear status",
        "  Enter (Sources)  Open dir / pick file  Backspace  Parent directory",
        "  f (Results)      Cycle comment filter  e          Export CSV",
        "  R (Results)      Re-run comparison     :          Command mode",
    ];

    let mut help_text = vec![
        Line::from(Span::styled(
            " burnrecon Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Keys"),
    ];
    help_text.extend(
        keys.iter()
            .map(|k| Line::from(Span::styled(*k, theme::normal_style()))),
    );
    help_text.push(Line::from(""));
    help_text.push(section(" Commands"));

    // One line per command, skipping short aliases
    let mut cmd_lines: Vec<(&str, &str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .map(|(&name, cmd)| (name, cmd.description))
        .collect();
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<10} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
