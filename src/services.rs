pub mod api;
pub mod cache;
pub mod loader;
pub mod search;

pub use api::{HttpProjectSource, DEFAULT_API_URL};
pub use cache::{get_cache_path, Cache};
pub use loader::{
    load_error_message, load_project, LoadRequest, LoadTicket, LoadTracker, ProjectSource,
};
pub use search::{search_issues, search_pr_rows};
