use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::data::{Issue, IssuesEnvelope, Project, PullRequest, PullRequestsEnvelope};

use super::loader::ProjectSource;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/public";

/// Client for the discovery service's public project endpoints.
pub struct HttpProjectSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProjectSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("grainview/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, project_id: &str, suffix: &str) -> String {
        format!(
            "{}/projects/{}{}",
            self.base_url,
            urlencoding::encode(project_id),
            suffix
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Request to {} failed with status {}", url, status);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Invalid response from {}", url))
    }
}

#[async_trait]
impl ProjectSource for HttpProjectSource {
    async fn fetch_project(&self, project_id: &str) -> Result<Project> {
        self.get_json(&self.endpoint(project_id, "")).await
    }

    async fn fetch_issues(&self, project_id: &str) -> Result<Vec<Issue>> {
        let envelope: IssuesEnvelope = self.get_json(&self.endpoint(project_id, "/issues")).await?;
        Ok(envelope.issues)
    }

    async fn fetch_pull_requests(&self, project_id: &str) -> Result<Vec<PullRequest>> {
        let envelope: PullRequestsEnvelope =
            self.get_json(&self.endpoint(project_id, "/prs")).await?;
        Ok(envelope.prs)
    }
}
