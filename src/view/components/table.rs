use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::MUTED;
use crate::derive::time_ago;
use crate::icons;

use super::popups::truncate_string;

const MAX_CARD_LABELS: usize = 4;

/// Render the issue table for the active label tab
pub fn render_issue_table(f: &mut Frame, app: &App, area: Rect) {
    let visible_issues = app.visible_issues();

    if visible_issues.is_empty() {
        let text = if app.snapshot.is_none() && app.loading {
            "Loading…"
        } else {
            "No issues found"
        };
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(MUTED)),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Title").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Labels").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Author").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Updated").style(Style::default().fg(Color::Yellow).bold()),
    ])
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = visible_issues
        .iter()
        .map(|issue| {
            let labels: Vec<Span> = issue
                .display_labels(MAX_CARD_LABELS)
                .into_iter()
                .flat_map(|label| {
                    [
                        Span::styled(truncate_string(label, 14), Style::default().fg(Color::Blue)),
                        Span::raw(" "),
                    ]
                })
                .collect();

            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled(
                        format!("{} ", icons::ISSUE_OPEN),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(format!("{}", issue.number)),
                ])),
                Cell::from(truncate_string(&issue.title, 60)),
                Cell::from(Line::from(labels)),
                Cell::from(truncate_string(&issue.author_login, 16))
                    .style(Style::default().fg(Color::Magenta)),
                Cell::from(time_ago(Some(issue.activity_timestamp())))
                    .style(Style::default().fg(MUTED)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(30),
        Constraint::Length(34),
        Constraint::Length(17),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(icons::SELECTOR);

    f.render_stateful_widget(table, area, &mut app.issue_table_state.clone());
}
