use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::data::{ViewMode, MUTED};
use crate::icons;

use super::components::{
    render_error_popup, render_header, render_help_popup, render_issue_preview,
    render_issue_table, render_issue_tabs, render_legend, render_pr_rows, render_project_prompt,
    render_recent_activity, render_search_bar, render_sidebar, render_tabs,
};

const SIDEBAR_WIDTH: u16 = 34;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let show_search = app.search_mode || !app.search_query.is_empty();

    let search_height = if show_search { 1 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(1),             // Tabs
        Constraint::Length(1),             // Separator
        Constraint::Min(0),                // Body
        Constraint::Length(search_height), // Search bar
        Constraint::Length(1),             // Legend
    ])
    .split(f.area());

    render_tabs(f, app, chunks[0]);

    let separator = icons::SEPARATOR_CHAR.repeat(chunks[1].width as usize);
    f.render_widget(
        Paragraph::new(separator).style(Style::default().fg(MUTED)),
        chunks[1],
    );

    match app.view_mode {
        ViewMode::Issues => render_issues_view(f, app, chunks[2]),
        ViewMode::PullRequests => render_pr_rows(f, app, chunks[2]),
    }

    if show_search {
        render_search_bar(f, app, chunks[3]);
    }

    render_legend(f, chunks[4]);

    // Render popups (order matters for layering)
    if app.show_issue_preview {
        render_issue_preview(f, app);
    }

    if app.show_project_prompt {
        render_project_prompt(f, app);
    }

    if app.show_help_popup {
        render_help_popup(f);
    }

    if app.show_error_popup {
        if let Some(ref error) = app.error {
            render_error_popup(f, error);
        }
    }
}

fn render_issues_view(f: &mut Frame, app: &App, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).split(area);
    render_sidebar(f, app, columns[0]);

    let main = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(1), // Issue tabs
        Constraint::Length(1), // Spacer
        Constraint::Min(0),    // Issue table
        Constraint::Length(5), // Recent activity
    ])
    .split(columns[1].inner(Margin::new(1, 0)));

    render_header(f, app, main[0]);
    render_issue_tabs(f, app, main[1]);
    render_issue_table(f, app, main[3]);
    render_recent_activity(f, app, main[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{update, LoadResult, Message};
    use crate::data::{Issue, Label, LanguageShare, Project, ProjectSnapshot, RepoInfo};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::mpsc;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn app() -> (App, mpsc::Receiver<crate::services::LoadRequest>) {
        let (load_tx, load_rx) = mpsc::channel();
        let (_result_tx, result_rx) = mpsc::channel();
        (App::with_channels("p1".into(), load_tx, result_rx, None), load_rx)
    }

    #[test]
    fn renders_loading_state() {
        let (mut app, _rx) = app();
        app.start_load("p1".into());
        let screen = draw(&app);
        assert!(screen.contains("[1] Issues (0)"));
        assert!(screen.contains("[2] Pull Requests (0)"));
        assert!(screen.contains("Loading…"));
        assert!(screen.contains("No recent pull requests"));
    }

    #[test]
    fn renders_loaded_project() {
        let (mut app, rx) = app();
        app.start_load("p1".into());
        let ticket = rx.try_recv().unwrap().ticket;

        let snapshot = ProjectSnapshot {
            project: Project {
                id: "p1".into(),
                github_full_name: "octo/widgets".into(),
                repo: Some(RepoInfo {
                    description: "Widgets for everyone".into(),
                    ..Default::default()
                }),
                languages: vec![LanguageShare {
                    name: "Rust".into(),
                    percentage: 87.6,
                }],
                ..Default::default()
            },
            issues: vec![Issue {
                number: 42,
                title: "Fix the flux capacitor".into(),
                author_login: "ann".into(),
                labels: vec![Label::PlainName("bug".into())],
                ..Default::default()
            }],
            pull_requests: vec![],
        };
        update(
            &mut app,
            Message::LoadComplete(LoadResult::Success(ticket, Box::new(snapshot))),
        );

        let screen = draw(&app);
        assert!(screen.contains("[1] Issues (1)"));
        assert!(screen.contains("widgets"));
        assert!(screen.contains("Widgets for everyone"));
        assert!(screen.contains("All issues 1"));
        assert!(screen.contains("bug 1"));
        assert!(screen.contains("Fix the flux capacitor"));
        assert!(screen.contains("88%"));
        assert!(screen.contains("No contributors yet") || screen.contains("ann"));
        assert!(screen.contains("Unknown"));
    }

    #[test]
    fn renders_description_fallback() {
        let (mut app, rx) = app();
        app.start_load("p1".into());
        let ticket = rx.try_recv().unwrap().ticket;
        let snapshot = ProjectSnapshot {
            project: Project {
                id: "p1".into(),
                github_full_name: "octo/gears".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        update(
            &mut app,
            Message::LoadComplete(LoadResult::Success(ticket, Box::new(snapshot))),
        );

        let screen = draw(&app);
        assert!(screen.contains("gears  octo/gears"));
        assert!(screen.contains("No description available."));
        assert!(screen.contains("No issues found"));
        assert!(screen.contains("No recent pull requests"));
    }

    #[test]
    fn renders_pull_request_view() {
        let (mut app, rx) = app();
        app.start_load("p1".into());
        let ticket = rx.try_recv().unwrap().ticket;
        let snapshot = ProjectSnapshot {
            project: Project {
                id: "p1".into(),
                github_full_name: "octo/widgets".into(),
                ..Default::default()
            },
            issues: vec![],
            pull_requests: vec![crate::data::PullRequest {
                number: 7,
                title: "Speed up parser".into(),
                state: "open".into(),
                author_login: "cy".into(),
                ..Default::default()
            }],
        };
        update(
            &mut app,
            Message::LoadComplete(LoadResult::Success(ticket, Box::new(snapshot))),
        );
        update(&mut app, Message::SwitchView(ViewMode::PullRequests));

        let screen = draw(&app);
        assert!(screen.contains("[2] Pull Requests (1)"));
        assert!(screen.contains("Speed up parser"));
        assert!(screen.contains("octo/widgets • octo"));
        assert!(screen.contains("https://github.com/cy.png?size=28"));
    }

    #[test]
    fn renders_error_popup() {
        let (mut app, rx) = app();
        app.start_load("p1".into());
        let ticket = rx.try_recv().unwrap().ticket;
        update(
            &mut app,
            Message::LoadComplete(LoadResult::Error(ticket, "Failed to load project".into())),
        );
        let screen = draw(&app);
        assert!(screen.contains("Error"));
        assert!(screen.contains("Failed to load project"));
    }
}
