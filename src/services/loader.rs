use anyhow::Result;
use async_trait::async_trait;

use crate::data::{Issue, Project, ProjectSnapshot, PullRequest};

pub const DEFAULT_LOAD_ERROR: &str = "Failed to load project";

/// Where project data comes from. The HTTP client is the production source.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_project(&self, project_id: &str) -> Result<Project>;
    async fn fetch_issues(&self, project_id: &str) -> Result<Vec<Issue>>;
    async fn fetch_pull_requests(&self, project_id: &str) -> Result<Vec<PullRequest>>;
}

/// Fetch the project, its issues and its pull requests concurrently.
///
/// All three must succeed. The first failure fails the load and whatever the
/// other requests returned is dropped.
pub async fn load_project<S>(source: &S, project_id: &str) -> Result<ProjectSnapshot>
where
    S: ProjectSource + ?Sized,
{
    let (project, issues, pull_requests) = futures::try_join!(
        source.fetch_project(project_id),
        source.fetch_issues(project_id),
        source.fetch_pull_requests(project_id),
    )?;

    Ok(ProjectSnapshot {
        project,
        issues,
        pull_requests,
    })
}

/// One human-readable line for a failed load.
pub fn load_error_message(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    if message.trim().is_empty() {
        DEFAULT_LOAD_ERROR.to_string()
    } else {
        message
    }
}

/// Identifies one load attempt. Only the newest ticket may commit results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct LoadTracker {
    generation: u64,
}

impl LoadTracker {
    /// Start a new load, superseding every earlier ticket.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }
}

/// Work item for the background loader.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub project_id: String,
}
