use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    Frame,
};

use crate::app::App;
use crate::data::{ViewMode, MUTED};

fn tab_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(MUTED)
    }
}

/// Render the view switcher bar
pub fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let issue_count = app.issues().len();
    let pr_count = app.pr_rows.len();

    let loading_indicator = if app.loading {
        format!("{} ", app.spinner())
    } else {
        String::new()
    };

    let project_display = app
        .view
        .as_ref()
        .map(|v| v.full_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(&app.project_id);

    let left = Line::from(vec![
        Span::styled(
            format!(" [1] Issues ({}) ", issue_count),
            tab_style(app.view_mode == ViewMode::Issues),
        ),
        Span::raw(" "),
        Span::styled(
            format!("[2] Pull Requests ({}) ", pr_count),
            tab_style(app.view_mode == ViewMode::PullRequests),
        ),
    ]);

    // Right side: loading + project info
    let right = Line::from(vec![
        Span::styled(loading_indicator, Style::default().fg(Color::Yellow)),
        Span::styled(format!("{} ", project_display), Style::default().fg(MUTED)),
    ]);

    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(right.width() as u16)])
        .split(area);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

/// Render the issue label tabs with their counts
pub fn render_issue_tabs(f: &mut Frame, app: &App, area: Rect) {
    let active = app.active_tab_index();
    let mut spans = Vec::with_capacity(app.issue_tabs.len() * 2);

    for (idx, tab) in app.issue_tabs.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(MUTED)));
        }
        let style = if idx == active {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", tab.label, tab.count), style));
    }

    f.render_widget(Line::from(spans), area);
}
