use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::data::ViewMode;
use crate::icons;

/// Render the search bar
pub fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let (filtered_count, total_count) = match app.view_mode {
        ViewMode::Issues => (
            app.filtered_issues.len(),
            app.issue_tabs
                .get(app.active_tab_index())
                .map_or(0, |tab| tab.count),
        ),
        ViewMode::PullRequests => (app.filtered_prs.len(), app.pr_rows.len()),
    };

    let cursor = if app.search_mode { icons::CURSOR } else { "" };
    let count_display = if app.search_query.is_empty() {
        String::new()
    } else {
        format!(" ({}/{})", filtered_count, total_count)
    };

    let search_line = Line::from(vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::styled(&app.search_query, Style::default().fg(Color::White)),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
        Span::styled(count_display, Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(Paragraph::new(search_line), area);
}
