use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::{Comment, ComparisonRecord};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_optional, truncate};

const HEADERS: [&str; 10] = [
    "Project",
    "Description",
    "PM",
    "AM",
    "Time",
    "Expense",
    "Total",
    "Invoiced",
    "Difference",
    "Comment",
];

pub(crate) fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_summary(f, chunks[0], app);

    if app.results.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No comparison yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Pick a burn and an invoice report on the Sources tab, or use :burn and :invoice",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY));
        f.render_widget(Paragraph::new(msg).centered().block(block), chunks[1]);
        return;
    }

    render_table(f, chunks[1], app);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.summary;
    let counts = Comment::all().iter().flat_map(|&c| {
        [
            Span::styled(format!(" {c}: "), theme::dim_style()),
            Span::styled(s.count(c).to_string(), comment_style(c)),
        ]
    });

    let mut spans: Vec<Span> = counts.collect();
    spans.push(Span::styled("   Burn ", theme::dim_style()));
    spans.push(Span::styled(format_amount(s.total_burn), theme::normal_style()));
    spans.push(Span::styled("  Invoiced ", theme::dim_style()));
    spans.push(Span::styled(format_amount(s.invoiced), theme::normal_style()));
    spans.push(Span::styled("  Difference ", theme::dim_style()));
    spans.push(Span::styled(
        format_amount(s.difference),
        theme::difference_style(Some(s.difference)),
    ));

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Summary ({} rows) ", s.rows),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(bar, area);
}

fn comment_style(comment: Comment) -> Style {
    match comment {
        Comment::NoInvoice => Style::default().fg(theme::RED),
        Comment::Ok => Style::default().fg(theme::GREEN),
        Comment::BurnExceedsInvoice => Style::default().fg(theme::YELLOW),
        Comment::InvoiceExceedsBurn => Style::default().fg(theme::ACCENT),
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let page = area.height.saturating_sub(3) as usize;
    app.visible_rows = page.max(1);

    let visible = app.visible_results();
    app.result_cursor.clamp(visible.len());
    let cursor = app.result_cursor;

    let header = Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(page)
        .filter_map(|(pos, &i)| app.results.get(i).map(|r| (pos, r)))
        .map(|(pos, record)| {
            let style = if pos == cursor.index {
                theme::selected_style()
            } else if pos % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let [plain @ .., difference, comment] = grid_cells(record);

            let mut cells: Vec<Cell> = plain.into_iter().map(Cell::from).collect();
            cells.push(Cell::from(Span::styled(
                difference,
                theme::difference_style(record.difference),
            )));
            cells.push(Cell::from(Span::styled(comment, comment_style(record.comment))));
            Row::new(cells).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(14),
    ];

    let filter = app
        .result_filter
        .map(|c| format!("filter: {c} "))
        .unwrap_or_default();
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Burn vs Invoice ({}/{}) {filter}", visible.len(), app.results.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(table, area);
}

/// Display text for one row, in export column order.
pub(crate) fn grid_cells(record: &ComparisonRecord) -> [String; 10] {
    let b = &record.burn;
    [
        b.project_number.clone(),
        truncate(b.project_description.as_deref().unwrap_or(""), 30),
        truncate(&b.project_manager, 14),
        truncate(&b.account_manager, 14),
        format_optional(b.time_burn),
        format_optional(b.expense_burn),
        format_optional(b.total_burn),
        format_amount(record.invoiced_amount),
        format_optional(record.difference),
        record.comment.to_string(),
    ]
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
