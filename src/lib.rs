pub mod app;
pub mod data;
pub mod derive;
pub mod icons;
pub mod logging;
pub mod services;
pub mod utils;
pub mod view;

pub use app::{update, App, Command, LoadResult, Message};
pub use data::{Issue, IssueTab, IssueTabId, Label, Project, ProjectSnapshot, PullRequest};
pub use derive::{build_issue_tabs, derive_project_view, filter_issues, time_ago};
pub use services::{get_cache_path, Cache, HttpProjectSource};
pub use view::ui;
