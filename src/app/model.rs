use ratatui::widgets::TableState;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::data::{
    Issue, IssueTab, IssueTabId, ProjectSnapshot, PullRequestRow, ViewMode, SPINNER_FRAMES,
};
use crate::derive::{
    build_issue_tabs, derive_project_view, filter_issue_indices, pull_request_rows, ProjectView,
};
use crate::services::{
    load_error_message, load_project, search_issues, search_pr_rows, Cache, LoadRequest,
    LoadTracker, ProjectSource,
};

use super::message::LoadResult;

pub struct App {
    // Data state
    pub project_id: String,
    pub snapshot: Option<ProjectSnapshot>,
    pub view: Option<ProjectView>,
    pub issue_tabs: Vec<IssueTab>,
    pub pr_rows: Vec<PullRequestRow>,

    // Filter/View state
    pub view_mode: ViewMode,
    pub active_tab: IssueTabId,
    pub issue_table_state: TableState,
    pub pr_table_state: TableState,
    pub filtered_issues: Vec<usize>,
    pub filtered_prs: Vec<usize>,

    // Search state
    pub search_mode: bool,
    pub search_query: String,

    // Loading state
    pub loading: bool,
    pub loads: LoadTracker,

    // Popup state
    pub show_help_popup: bool,
    pub show_error_popup: bool,
    pub show_project_prompt: bool,
    pub show_issue_preview: bool,
    pub preview_scroll: u16,

    // Error state
    pub error: Option<String>,

    // Project prompt input
    pub project_input: String,

    // Local preferences
    pub cache: Option<Cache>,

    // Async communication
    pub load_tx: Sender<LoadRequest>,
    pub result_rx: Receiver<LoadResult>,

    // Spinner state
    pub spinner_idx: usize,
    pub last_spinner_update: Instant,
}

/// Run loads on a dedicated thread with its own tokio runtime.
fn spawn_load_worker(
    source: Arc<dyn ProjectSource>,
) -> (Sender<LoadRequest>, Receiver<LoadResult>) {
    let (load_tx, load_rx) = mpsc::channel::<LoadRequest>();
    let (result_tx, result_rx) = mpsc::channel::<LoadResult>();

    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new();
        if let Err(e) = &rt {
            error!(error = %e, "failed to start async runtime");
        }

        while let Ok(request) = load_rx.recv() {
            let msg = match &rt {
                Ok(rt) => match rt.block_on(load_project(source.as_ref(), &request.project_id)) {
                    Ok(snapshot) => {
                        info!(
                            project_id = %request.project_id,
                            issues = snapshot.issues.len(),
                            pull_requests = snapshot.pull_requests.len(),
                            "project loaded"
                        );
                        LoadResult::Success(request.ticket, Box::new(snapshot))
                    }
                    Err(e) => {
                        warn!(
                            project_id = %request.project_id,
                            error = %format!("{:#}", e),
                            "project load failed"
                        );
                        LoadResult::Error(request.ticket, load_error_message(&e))
                    }
                },
                Err(e) => LoadResult::Error(
                    request.ticket,
                    format!("Failed to start async runtime: {}", e),
                ),
            };
            if result_tx.send(msg).is_err() {
                break;
            }
        }
    });

    (load_tx, result_rx)
}

impl App {
    pub fn new(project_id: String, source: Arc<dyn ProjectSource>, cache: Option<Cache>) -> Self {
        let (load_tx, result_rx) = spawn_load_worker(source);
        Self::with_channels(project_id, load_tx, result_rx, cache)
    }

    /// Build the app around existing channels. No load is started.
    pub fn with_channels(
        project_id: String,
        load_tx: Sender<LoadRequest>,
        result_rx: Receiver<LoadResult>,
        cache: Option<Cache>,
    ) -> Self {
        Self {
            project_id,
            snapshot: None,
            view: None,
            issue_tabs: vec![IssueTab::all(0)],
            pr_rows: Vec::new(),
            view_mode: ViewMode::Issues,
            active_tab: IssueTabId::All,
            issue_table_state: TableState::default(),
            pr_table_state: TableState::default(),
            filtered_issues: Vec::new(),
            filtered_prs: Vec::new(),
            search_mode: false,
            search_query: String::new(),
            loading: false,
            loads: LoadTracker::default(),
            show_help_popup: false,
            show_error_popup: false,
            show_project_prompt: false,
            show_issue_preview: false,
            preview_scroll: 0,
            error: None,
            project_input: String::new(),
            cache,
            load_tx,
            result_rx,
            spinner_idx: 0,
            last_spinner_update: Instant::now(),
        }
    }

    // Getters

    pub fn issues(&self) -> &[Issue] {
        self.snapshot
            .as_ref()
            .map(|s| s.issues.as_slice())
            .unwrap_or_default()
    }

    pub fn visible_issues(&self) -> Vec<&Issue> {
        let issues = self.issues();
        self.filtered_issues
            .iter()
            .filter_map(|&idx| issues.get(idx))
            .collect()
    }

    pub fn visible_pr_rows(&self) -> Vec<&PullRequestRow> {
        self.filtered_prs
            .iter()
            .filter_map(|&idx| self.pr_rows.get(idx))
            .collect()
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.issue_table_state
            .selected()
            .and_then(|sel| self.filtered_issues.get(sel))
            .and_then(|&idx| self.issues().get(idx))
    }

    pub fn selected_pr_row(&self) -> Option<&PullRequestRow> {
        self.pr_table_state
            .selected()
            .and_then(|sel| self.filtered_prs.get(sel))
            .and_then(|&idx| self.pr_rows.get(idx))
    }

    pub fn active_tab_index(&self) -> usize {
        self.issue_tabs
            .iter()
            .position(|t| t.id == self.active_tab)
            .unwrap_or(0)
    }

    /// Length of the list shown in the current view after filtering.
    pub fn visible_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Issues => self.filtered_issues.len(),
            ViewMode::PullRequests => self.filtered_prs.len(),
        }
    }

    pub fn table_state_mut(&mut self) -> &mut TableState {
        match self.view_mode {
            ViewMode::Issues => &mut self.issue_table_state,
            ViewMode::PullRequests => &mut self.pr_table_state,
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_idx]
    }

    // Spinner update

    pub fn update_spinner(&mut self) {
        if self.last_spinner_update.elapsed() >= Duration::from_millis(80) {
            self.spinner_idx = (self.spinner_idx + 1) % SPINNER_FRAMES.len();
            self.last_spinner_update = Instant::now();
        }
    }

    // Load management

    /// Start loading `project_id`. Any load still in flight becomes stale.
    pub fn start_load(&mut self, project_id: String) {
        if project_id != self.project_id {
            // A different project replaces everything derived from the old one
            self.snapshot = None;
            self.view = None;
            self.issue_tabs = vec![IssueTab::all(0)];
            self.pr_rows.clear();
            self.active_tab = IssueTabId::All;
            self.search_query.clear();
            self.search_mode = false;
            self.refilter();
            self.project_id = project_id;
        }

        let ticket = self.loads.begin();
        self.loading = true;
        self.error = None;
        self.show_error_popup = false;
        debug!(project_id = %self.project_id, ?ticket, "starting load");

        let request = LoadRequest {
            ticket,
            project_id: self.project_id.clone(),
        };
        if self.load_tx.send(request).is_err() {
            self.loading = false;
            self.error = Some("Background loader is not running".to_string());
            self.show_error_popup = true;
        }
    }

    pub fn check_load_result(&mut self) -> Option<LoadResult> {
        self.result_rx.try_recv().ok()
    }

    /// Replace the current snapshot and re-derive every view from it.
    pub fn apply_snapshot(&mut self, snapshot: ProjectSnapshot) {
        self.view = Some(derive_project_view(
            &snapshot.project,
            &snapshot.issues,
            &snapshot.pull_requests,
        ));
        self.issue_tabs = build_issue_tabs(&snapshot.issues);
        self.pr_rows = pull_request_rows(&snapshot.pull_requests, &snapshot.project);

        let remembered = self
            .cache
            .as_ref()
            .and_then(|c| c.load_active_tab(&self.project_id).ok().flatten());
        let wanted = if self.active_tab != IssueTabId::All {
            Some(self.active_tab.clone())
        } else {
            remembered
        };
        self.active_tab = wanted
            .filter(|id| self.issue_tabs.iter().any(|t| &t.id == id))
            .unwrap_or(IssueTabId::All);

        if let Some(cache) = &self.cache {
            let full_name = &snapshot.project.github_full_name;
            if let Err(e) = cache.remember_project(&self.project_id, full_name) {
                warn!(error = %e, "failed to record recent project");
            }
        }

        self.snapshot = Some(snapshot);
        self.refilter();
    }

    /// Recompute visible rows from the active tab and search query.
    pub fn refilter(&mut self) {
        let filtered_issues = {
            let issues = self.issues();
            let in_tab = filter_issue_indices(issues, &self.active_tab);
            search_issues(issues, &in_tab, &self.search_query)
        };
        self.filtered_issues = filtered_issues;
        self.filtered_prs = search_pr_rows(&self.pr_rows, &self.search_query);

        for (state, len) in [
            (&mut self.issue_table_state, self.filtered_issues.len()),
            (&mut self.pr_table_state, self.filtered_prs.len()),
        ] {
            match state.selected() {
                _ if len == 0 => state.select(None),
                Some(sel) if sel >= len => state.select(Some(len - 1)),
                None => state.select(Some(0)),
                Some(_) => {}
            }
        }
    }

    pub fn set_active_tab(&mut self, tab: IssueTabId) {
        if self.active_tab == tab {
            return;
        }
        self.active_tab = tab;
        self.issue_table_state = TableState::default();
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save_active_tab(&self.project_id, &self.active_tab) {
                warn!(error = %e, "failed to save issue tab");
            }
        }
        self.refilter();
    }
}
