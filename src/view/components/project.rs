use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::MUTED;
use crate::icons;

use super::popups::truncate_string;

/// Render the repository name, subtitle and overview
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let lines = match &app.view {
        Some(view) => vec![
            Line::from(vec![
                Span::styled(view.repo_name.clone(), Style::default().fg(Color::White).bold()),
                Span::styled(
                    format!(
                        "  {}",
                        truncate_string(
                            view.subtitle(),
                            width.saturating_sub(view.repo_name.len() + 2)
                        )
                    ),
                    Style::default().fg(MUTED),
                ),
            ]),
            Line::from(vec![
                Span::styled("✦ ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    truncate_string(view.overview(), width.saturating_sub(2)),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ],
        None => vec![Line::styled("Loading…", Style::default().fg(MUTED))],
    };
    f.render_widget(Paragraph::new(lines), area);
}

/// Render the latest pull request activity
pub fn render_recent_activity(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Recent activity ")
        .title_style(Style::default().fg(Color::Yellow).bold())
        .borders(Borders::TOP)
        .border_style(Style::default().fg(MUTED));

    let items = app
        .view
        .as_ref()
        .map(|v| v.recent_activity.as_slice())
        .unwrap_or_default();

    let lines: Vec<Line> = if items.is_empty() {
        vec![Line::styled("No recent pull requests", Style::default().fg(MUTED))]
    } else {
        items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", icons::PULL_REQUEST),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(format!("{:<7}", item.number), Style::default().fg(Color::Cyan)),
                    Span::raw(truncate_string(
                        &item.title,
                        (area.width as usize).saturating_sub(22).max(8),
                    )),
                    Span::styled(format!("  {}", item.date), Style::default().fg(MUTED)),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
