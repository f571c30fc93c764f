pub mod popups;
pub mod pr_rows;
pub mod preview;
pub mod project;
pub mod search;
pub mod sidebar;
pub mod table;
pub mod tabs;

pub use popups::{
    centered_rect, render_error_popup, render_help_popup, render_legend,
    render_project_prompt, truncate_string,
};
pub use pr_rows::render_pr_rows;
pub use preview::render_issue_preview;
pub use project::{render_header, render_recent_activity};
pub use search::render_search_bar;
pub use sidebar::render_sidebar;
pub use table::render_issue_table;
pub use tabs::{render_issue_tabs, render_tabs};
