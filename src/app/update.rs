use tracing::{debug, warn};

use crate::data::ViewMode;
use crate::utils::open_url;

use super::message::{Command, LoadResult, Message};
use super::model::App;

/// Update the application state based on a message.
/// Returns an optional command to be executed by the main loop.
pub fn update(app: &mut App, msg: Message) -> Option<Command> {
    match msg {
        // Navigation
        Message::NextItem => {
            next_item(app);
            None
        }
        Message::PreviousItem => {
            previous_item(app);
            None
        }
        Message::GoToTop => {
            if app.visible_len() > 0 {
                app.table_state_mut().select(Some(0));
            }
            None
        }
        Message::GoToBottom => {
            let len = app.visible_len();
            if len > 0 {
                app.table_state_mut().select(Some(len - 1));
            }
            None
        }

        // View and issue tab switching
        Message::SwitchView(mode) => {
            switch_view(app, mode);
            None
        }
        Message::NextIssueTab => {
            cycle_issue_tab(app, 1);
            None
        }
        Message::PreviousIssueTab => {
            cycle_issue_tab(app, -1);
            None
        }

        // Actions
        Message::OpenSelected => {
            open_selected(app);
            None
        }
        Message::OpenRepository => {
            if let Some(url) = app.view.as_ref().map(|v| v.github_url.clone()) {
                open(&url);
            }
            None
        }
        Message::OpenWebsite => {
            if let Some(url) = app.view.as_ref().map(|v| v.website_url.clone()) {
                open(&url);
            }
            None
        }
        Message::Refresh => Some(Command::StartLoad(app.project_id.clone())),

        // Issue preview
        Message::OpenIssuePreview => {
            if app.view_mode == ViewMode::Issues && app.selected_issue().is_some() {
                app.show_issue_preview = true;
                app.preview_scroll = 0;
            }
            None
        }
        Message::CloseIssuePreview => {
            app.show_issue_preview = false;
            None
        }
        Message::PreviewScrollDown => {
            app.preview_scroll = app.preview_scroll.saturating_add(1);
            None
        }
        Message::PreviewScrollUp => {
            app.preview_scroll = app.preview_scroll.saturating_sub(1);
            None
        }

        // Search
        Message::EnterSearchMode => {
            app.search_mode = true;
            None
        }
        Message::ExitSearchMode { clear } => {
            exit_search_mode(app, clear);
            None
        }
        Message::SearchInput(c) => {
            app.search_query.push(c);
            reset_selection(app);
            None
        }
        Message::SearchBackspace => {
            app.search_query.pop();
            reset_selection(app);
            None
        }

        // Project switching
        Message::OpenProjectPrompt => {
            app.show_project_prompt = true;
            app.project_input.clear();
            None
        }
        Message::CloseProjectPrompt => {
            app.show_project_prompt = false;
            app.project_input.clear();
            None
        }
        Message::ProjectInput(c) => {
            app.project_input.push(c);
            None
        }
        Message::ProjectBackspace => {
            app.project_input.pop();
            None
        }
        Message::ConfirmProject => confirm_project(app),

        // Popups
        Message::ToggleHelp => {
            app.show_help_popup = !app.show_help_popup;
            None
        }
        Message::DismissHelp => {
            app.show_help_popup = false;
            None
        }
        Message::DismissError => {
            app.show_error_popup = false;
            None
        }

        // Async results
        Message::LoadComplete(result) => {
            handle_load_result(app, result);
            None
        }

        // System
        Message::Tick => {
            if app.loading {
                app.update_spinner();
            }
            None
        }
        Message::Quit => Some(Command::Quit),
    }
}

// Helper functions

fn next_item(app: &mut App) {
    let len = app.visible_len();
    if len == 0 {
        return;
    }
    let state = app.table_state_mut();
    let i = match state.selected() {
        Some(i) if i + 1 < len => i + 1,
        Some(i) => i,
        None => 0,
    };
    state.select(Some(i));
}

fn previous_item(app: &mut App) {
    if app.visible_len() == 0 {
        return;
    }
    let state = app.table_state_mut();
    let i = state.selected().map_or(0, |i| i.saturating_sub(1));
    state.select(Some(i));
}

fn switch_view(app: &mut App, mode: ViewMode) {
    if app.view_mode != mode {
        app.view_mode = mode;
        // Clear search when switching views
        app.search_mode = false;
        app.search_query.clear();
        app.show_issue_preview = false;
        app.refilter();
    }
}

fn cycle_issue_tab(app: &mut App, step: isize) {
    if app.view_mode != ViewMode::Issues || app.issue_tabs.is_empty() {
        return;
    }
    let len = app.issue_tabs.len() as isize;
    let current = app.active_tab_index() as isize;
    let next = (current + step).rem_euclid(len) as usize;
    let tab = app.issue_tabs[next].id.clone();
    app.set_active_tab(tab);
}

fn reset_selection(app: &mut App) {
    app.table_state_mut().select(None);
    app.refilter();
}

fn exit_search_mode(app: &mut App, clear_query: bool) {
    app.search_mode = false;
    if clear_query {
        app.search_query.clear();
        reset_selection(app);
    }
}

fn open(url: &str) {
    if let Err(e) = open_url(url) {
        warn!(url, error = %e, "could not open url");
    }
}

fn open_selected(app: &App) {
    let url = match app.view_mode {
        ViewMode::Issues => app.selected_issue().map(|i| i.url.clone()),
        ViewMode::PullRequests => app.selected_pr_row().map(|r| r.url.clone()),
    };
    if let Some(url) = url {
        open(&url);
    }
}

fn confirm_project(app: &mut App) -> Option<Command> {
    let project_id = app.project_input.trim().to_string();
    if project_id.is_empty() {
        return None;
    }
    app.show_project_prompt = false;
    app.project_input.clear();
    Some(Command::StartLoad(project_id))
}

fn handle_load_result(app: &mut App, result: LoadResult) {
    match result {
        LoadResult::Success(ticket, snapshot) => {
            if !app.loads.is_current(ticket) {
                debug!(?ticket, "dropping superseded load");
                return;
            }
            app.loading = false;
            app.apply_snapshot(*snapshot);
        }
        LoadResult::Error(ticket, message) => {
            if !app.loads.is_current(ticket) {
                debug!(?ticket, "dropping superseded load failure");
                return;
            }
            app.loading = false;
            app.error = Some(message);
            app.show_error_popup = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Issue, IssueTabId, Label, Project, ProjectSnapshot, PullRequest};
    use crate::services::LoadRequest;
    use std::sync::mpsc::{self, Receiver, Sender};

    struct Harness {
        app: App,
        requests: Receiver<LoadRequest>,
        _results: Sender<LoadResult>,
    }

    fn harness() -> Harness {
        let (load_tx, requests) = mpsc::channel();
        let (results, result_rx) = mpsc::channel();
        Harness {
            app: App::with_channels("p1".into(), load_tx, result_rx, None),
            requests,
            _results: results,
        }
    }

    fn snapshot(full_name: &str) -> ProjectSnapshot {
        let issue = |title: &str, labels: &[&str]| Issue {
            title: title.into(),
            author_login: "ann".into(),
            labels: labels.iter().map(|l| Label::PlainName(l.to_string())).collect(),
            ..Default::default()
        };
        ProjectSnapshot {
            project: Project {
                id: "p1".into(),
                github_full_name: full_name.into(),
                ..Default::default()
            },
            issues: vec![issue("A", &["bug", "ui"]), issue("B", &["bug"]), issue("C", &[])],
            pull_requests: vec![PullRequest {
                number: 5,
                state: "open".into(),
                author_login: "bob".into(),
                ..Default::default()
            }],
        }
    }

    fn start(h: &mut Harness, project_id: &str) -> LoadRequest {
        h.app.start_load(project_id.into());
        h.requests.try_recv().unwrap()
    }

    #[test]
    fn successful_load_derives_views() {
        let mut h = harness();
        let req = start(&mut h, "p1");
        assert!(h.app.loading);

        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Success(req.ticket, Box::new(snapshot("octo/widgets")))),
        );

        assert!(!h.app.loading);
        assert_eq!(h.app.view.as_ref().unwrap().repo_name, "widgets");
        assert_eq!(h.app.issue_tabs.len(), 3);
        assert_eq!(h.app.filtered_issues, vec![0, 1, 2]);
        assert_eq!(h.app.pr_rows.len(), 1);
        assert_eq!(h.app.issue_table_state.selected(), Some(0));
    }

    #[test]
    fn superseded_load_is_dropped() {
        let mut h = harness();
        let first = start(&mut h, "p1");
        let second = start(&mut h, "p2");
        assert_eq!(second.project_id, "p2");

        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Success(first.ticket, Box::new(snapshot("old/one")))),
        );
        assert!(h.app.snapshot.is_none());
        assert!(h.app.loading);

        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Error(first.ticket, "stale failure".into())),
        );
        assert!(h.app.error.is_none());

        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Success(second.ticket, Box::new(snapshot("new/two")))),
        );
        assert_eq!(h.app.view.as_ref().unwrap().repo_name, "two");
    }

    #[test]
    fn failed_load_shows_single_error() {
        let mut h = harness();
        let req = start(&mut h, "p1");
        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Error(req.ticket, "Failed to load project".into())),
        );
        assert!(!h.app.loading);
        assert!(h.app.show_error_popup);
        assert_eq!(h.app.error.as_deref(), Some("Failed to load project"));
        assert!(h.app.snapshot.is_none());
    }

    #[test]
    fn tab_cycling_filters_issues() {
        let mut h = harness();
        let req = start(&mut h, "p1");
        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Success(req.ticket, Box::new(snapshot("octo/widgets")))),
        );

        update(&mut h.app, Message::NextIssueTab);
        assert_eq!(h.app.active_tab, IssueTabId::Label("bug".into()));
        assert_eq!(h.app.filtered_issues, vec![0, 1]);

        update(&mut h.app, Message::NextIssueTab);
        assert_eq!(h.app.filtered_issues, vec![0]);

        // Wraps back to "all"
        update(&mut h.app, Message::NextIssueTab);
        assert_eq!(h.app.active_tab, IssueTabId::All);

        update(&mut h.app, Message::PreviousIssueTab);
        assert_eq!(h.app.active_tab, IssueTabId::Label("ui".into()));
    }

    #[test]
    fn navigation_clamps_to_visible_rows() {
        let mut h = harness();
        let req = start(&mut h, "p1");
        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Success(req.ticket, Box::new(snapshot("octo/widgets")))),
        );

        update(&mut h.app, Message::GoToBottom);
        assert_eq!(h.app.issue_table_state.selected(), Some(2));
        update(&mut h.app, Message::NextItem);
        assert_eq!(h.app.issue_table_state.selected(), Some(2));
        update(&mut h.app, Message::GoToTop);
        update(&mut h.app, Message::PreviousItem);
        assert_eq!(h.app.issue_table_state.selected(), Some(0));
    }

    #[test]
    fn project_prompt_starts_new_load() {
        let mut h = harness();
        update(&mut h.app, Message::OpenProjectPrompt);
        assert_eq!(update(&mut h.app, Message::ConfirmProject), None);
        for c in " p9 ".chars() {
            update(&mut h.app, Message::ProjectInput(c));
        }
        assert_eq!(
            update(&mut h.app, Message::ConfirmProject),
            Some(Command::StartLoad("p9".into()))
        );
        assert!(!h.app.show_project_prompt);
    }

    #[test]
    fn search_narrows_active_tab() {
        let mut h = harness();
        let req = start(&mut h, "p1");
        update(
            &mut h.app,
            Message::LoadComplete(LoadResult::Success(req.ticket, Box::new(snapshot("octo/widgets")))),
        );

        update(&mut h.app, Message::EnterSearchMode);
        update(&mut h.app, Message::SearchInput('C'));
        assert_eq!(h.app.filtered_issues, vec![2]);

        update(&mut h.app, Message::ExitSearchMode { clear: true });
        assert_eq!(h.app.filtered_issues, vec![0, 1, 2]);
    }
}
