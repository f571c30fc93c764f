use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{BadgeTone, PullRequestRow, MUTED};
use crate::derive::pr_rows::{author_avatar, repo_avatar};
use crate::icons;

use super::popups::truncate_string;

fn author_line(row: &PullRequestRow) -> Line<'static> {
    let mut spans = vec![Span::styled(
        truncate_string(&row.author.name, 16),
        Style::default().fg(Color::Magenta),
    )];
    for badge in &row.author.badges {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            badge.clone(),
            Style::default().fg(BadgeTone::classify(badge).color()),
        ));
    }
    Line::from(spans)
}

fn indicator_line(row: &PullRequestRow) -> Line<'static> {
    let spans: Vec<Span> = row
        .indicators
        .iter()
        .flat_map(|indicator| {
            let (icon, color) = indicator.display();
            [Span::styled(icon, Style::default().fg(color)), Span::raw(" ")]
        })
        .collect();
    Line::from(spans)
}

fn repo_line(row: &PullRequestRow) -> Line<'static> {
    let mut spans = vec![Span::styled(
        truncate_string(&row.repo, 24),
        Style::default().fg(Color::Gray),
    )];
    if !row.org.is_empty() {
        spans.push(Span::styled(
            format!(" {} {}", icons::BULLET, truncate_string(&row.org, 12)),
            Style::default().fg(MUTED),
        ));
    }
    Line::from(spans)
}

/// Link line for the selected row: PR url and avatar images.
fn detail_lines(row: &PullRequestRow) -> Vec<Line<'static>> {
    let label = Style::default().fg(MUTED);
    vec![
        Line::from(vec![
            Span::styled("url ", label),
            Span::styled(row.url.clone(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("author ", label),
            Span::raw(author_avatar(row)),
            Span::styled("  repo ", label),
            Span::raw(repo_avatar(row)),
        ]),
    ]
}

/// Render pull request rows
pub fn render_pr_rows(f: &mut Frame, app: &App, area: Rect) {
    let visible_rows = app.visible_pr_rows();

    if visible_rows.is_empty() {
        let text = if app.snapshot.is_none() && app.loading {
            "Loading…"
        } else {
            "No pull requests found"
        };
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(MUTED)),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Pull request").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Status").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Author").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Repository").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("").style(Style::default().fg(Color::Yellow).bold()),
    ])
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = visible_rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(icons::PULL_REQUEST).style(Style::default().fg(row.status.color())),
                Cell::from(truncate_string(&row.title, 60)),
                Cell::from(format!(
                    "#{} {} {}",
                    row.number,
                    icons::BULLET,
                    row.status_detail
                ))
                .style(Style::default().fg(Color::Gray)),
                Cell::from(author_line(row)),
                Cell::from(repo_line(row)),
                Cell::from(indicator_line(row)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(30),
        Constraint::Length(24),
        Constraint::Length(24),
        Constraint::Length(40),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(icons::SELECTOR);

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).split(area);
    f.render_stateful_widget(table, chunks[0], &mut app.pr_table_state.clone());

    if let Some(row) = app.selected_pr_row() {
        f.render_widget(Paragraph::new(detail_lines(row)), chunks[1]);
    }
}
