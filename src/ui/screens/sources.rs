use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::import::TableLayout;
use crate::models::ReportKind;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_slot(f, slots[0], app, ReportKind::Burn);
    render_slot(f, slots[1], app, ReportKind::Invoice);
    render_path_bar(f, chunks[1], app);
    render_file_list(f, chunks[2], app);
}

fn render_slot(f: &mut Frame, area: Rect, app: &App, kind: ReportKind) {
    let active = app.active_slot == kind;
    let border = if active { theme::ACCENT } else { theme::OVERLAY };
    let expected = TableLayout::for_kind(kind).arity();
    let width = area.width.saturating_sub(14) as usize;

    let label = |text: &'static str| Span::styled(format!(" {text:<10} "), theme::dim_style());
    let lines = match app.source(kind) {
        Some(source) => {
            let name = source.path.display().to_string();
            let columns = source.preview.header.len();
            let layout_line = match source.preview.kind {
                Some(detected) if detected == kind => Span::styled(
                    format!("{detected} ({columns} columns)"),
                    Style::default().fg(theme::GREEN),
                ),
                Some(detected) => Span::styled(
                    format!("looks like {detected} ({columns} columns)"),
                    Style::default().fg(theme::YELLOW),
                ),
                None => Span::styled(
                    format!("{columns} columns, expected {expected}"),
                    Style::default().fg(theme::RED),
                ),
            };
            vec![
                Line::from(vec![
                    label("File"),
                    Span::styled(truncate(&name, width), theme::normal_style()),
                ]),
                Line::from(vec![
                    label("Rows"),
                    Span::styled(source.preview.rows.to_string(), theme::normal_style()),
                ]),
                Line::from(vec![label("Layout"), layout_line]),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" No {kind} report picked ({expected} columns)"),
                theme::dim_style(),
            )),
        ],
    };

    let title_style = if active {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme::TEXT_DIM)
            .add_modifier(Modifier::BOLD)
    };
    let key = match kind {
        ReportKind::Burn => 'b',
        ReportKind::Invoice => 'i',
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(format!(" {key}: {kind} report "), title_style));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_path_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" Path: ", theme::dim_style()),
        Span::styled(
            app.file_browser_path.display().to_string(),
            Style::default().fg(theme::ACCENT),
        ),
    ];
    if app.file_browser_input_focused || !app.file_browser_filter.is_empty() {
        spans.push(Span::styled("  filter: ", theme::dim_style()));
        spans.push(Span::styled(
            app.file_browser_filter.as_str(),
            Style::default().fg(theme::YELLOW),
        ));
    }

    let title = format!(" Pick the {} report ", app.active_slot);
    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(bar, area);

    if app.file_browser_input_focused {
        let offset = 7
            + app.file_browser_path.display().to_string().chars().count()
            + 10
            + app.file_browser_filter.chars().count();
        let x = area.x + 1 + offset as u16;
        if x < area.right().saturating_sub(1) {
            f.set_cursor_position((x, area.y + 1));
        }
    }
}

fn render_file_list(f: &mut Frame, area: Rect, app: &mut App) {
    let page = area.height.saturating_sub(2) as usize;
    app.visible_rows = page.max(1);

    let filtered = app.file_browser_filtered();
    app.file_browser_cursor.clamp(filtered.len());
    let cursor = app.file_browser_cursor;
    let parent = app.file_browser_path.parent();

    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(page)
        .filter_map(|(pos, &i)| app.file_browser_entries.get(i).map(|p| (pos, p)))
        .map(|(pos, path)| {
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
            let name = if Some(path.as_path()) == parent {
                "📁 ..".to_string()
            } else if path.is_dir() {
                format!("📁 {file_name}")
            } else {
                format!("📄 {file_name}")
            };

            let style = if pos == cursor.index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(Span::styled(name, style)))
        })
        .collect();

    let hint = if app.file_browser_show_hidden {
        " j/k navigate, Enter pick, . hide dotfiles "
    } else {
        " j/k navigate, Enter pick, . show dotfiles "
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(hint, theme::dim_style())),
    );
    f.render_widget(list, area);
}
