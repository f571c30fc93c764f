pub mod models;
pub mod types;

pub use models::{
    Issue, IssuesEnvelope, Label, LanguageShare, PrAuthor, Project, ProjectSnapshot, PullRequest,
    PullRequestRow, PullRequestsEnvelope, RecentProject, RepoInfo,
};
pub use types::{
    BadgeTone, CacheMeta, Indicator, IssueTab, IssueTabId, IssueTabPrefsTable, PrStatus,
    RecentProjectsTable, ViewMode, CACHE_VERSION, MUTED,
};

pub use crate::icons::SPINNER_FRAMES;
