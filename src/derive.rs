pub mod pr_rows;
pub mod project_view;
pub mod tabs;
pub mod time_ago;

pub use pr_rows::{pull_request_row, pull_request_rows};
pub use project_view::{
    avatar_url, derive_project_view, ActivityItem, Contributor, LanguageStat, ProjectView,
};
pub use tabs::{build_issue_tabs, filter_issue_indices, filter_issues, MAX_LABEL_TABS};
pub use time_ago::{date_prefix, parse_timestamp, time_ago, time_ago_at};
