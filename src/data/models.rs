use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Indicator, PrStatus};

/// Treat an explicit `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything that is not a JSON array yields no labels.
fn labels_or_empty<'de, D>(deserializer: D) -> Result<Vec<Label>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().map(Label::from_value).collect(),
        _ => Vec::new(),
    })
}

/// An issue label as the API hands it out: either a bare string or an
/// object carrying a `name`. Every other shape is kept as `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    PlainName(String),
    Named(String),
    Unrecognized,
}

impl Label {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Label::PlainName(name.clone()),
            Value::Object(map) => match map.get("name") {
                Some(Value::String(name)) => Label::Named(name.clone()),
                _ => Label::Unrecognized,
            },
            _ => Label::Unrecognized,
        }
    }

    /// Resolve the label to its name. Empty names resolve to `None`.
    pub fn name(&self) -> Option<&str> {
        match self {
            Label::PlainName(name) | Label::Named(name) if !name.is_empty() => Some(name.as_str()),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Label::from_value(&Value::deserialize(deserializer)?))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoInfo {
    #[serde(default, deserialize_with = "nullable")]
    pub owner_login: String,
    #[serde(default, deserialize_with = "nullable")]
    pub owner_avatar_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub html_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub homepage: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageShare {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub github_full_name: String,
    #[serde(default)]
    pub repo: Option<RepoInfo>,
    #[serde(default, deserialize_with = "nullable")]
    pub languages: Vec<LanguageShare>,
    /// Single primary language reported by older records.
    #[serde(default, deserialize_with = "nullable")]
    pub language: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ecosystem_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub contributors_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issue {
    #[serde(rename = "github_issue_id", default, deserialize_with = "nullable")]
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub number: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub state: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub author_login: String,
    #[serde(default, deserialize_with = "labels_or_empty")]
    pub labels: Vec<Label>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_seen_at: String,
}

impl Issue {
    /// Resolved label names, each name once, in the order they appear.
    pub fn label_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.labels.iter().filter_map(Label::name) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name() == Some(name))
    }

    /// Label names shown on an issue card.
    pub fn display_labels(&self, max: usize) -> Vec<&str> {
        self.labels.iter().filter_map(Label::name).take(max).collect()
    }

    /// Best timestamp for "last activity": `updated_at`, else `last_seen_at`.
    pub fn activity_timestamp(&self) -> &str {
        match self.updated_at.as_deref() {
            Some(ts) if !ts.is_empty() => ts,
            _ => &self.last_seen_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    #[serde(rename = "github_pr_id", default, deserialize_with = "nullable")]
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub number: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub state: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author_login: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub merged: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub merged_at: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_seen_at: String,
}

#[derive(Debug, Deserialize)]
pub struct IssuesEnvelope {
    #[serde(default, deserialize_with = "nullable")]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestsEnvelope {
    #[serde(default, deserialize_with = "nullable")]
    pub prs: Vec<PullRequest>,
}

/// Everything fetched for one project in a single load.
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    pub project: Project,
    pub issues: Vec<Issue>,
    pub pull_requests: Vec<PullRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrAuthor {
    pub name: String,
    #[serde(default)]
    pub badges: Vec<String>,
}

/// A pull request as listed on the maintainer dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestRow {
    pub title: String,
    pub number: u64,
    pub status: PrStatus,
    #[serde(default)]
    pub status_detail: String,
    pub author: PrAuthor,
    pub repo: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

impl PullRequestRow {
    /// Owner used for the repository avatar: the org, else the first segment of `repo`.
    pub fn repo_owner(&self) -> &str {
        if !self.org.is_empty() {
            return &self.org;
        }
        self.repo.split('/').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct RecentProject {
    pub project_id: String,
    pub full_name: String,
    pub viewed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_resolution_is_total() {
        assert_eq!(Label::from_value(&Value::Null).name(), None);
        assert_eq!(Label::from_value(&json!("bug")).name(), Some("bug"));
        assert_eq!(Label::from_value(&json!({"name": "bug"})).name(), Some("bug"));
        assert_eq!(Label::from_value(&json!({})).name(), None);
        assert_eq!(Label::from_value(&json!(42)).name(), None);
        assert_eq!(Label::from_value(&json!({"name": 7})).name(), None);
        assert_eq!(Label::from_value(&json!("")).name(), None);
    }

    #[test]
    fn issue_tolerates_odd_label_shapes() {
        let issue: Issue = serde_json::from_value(json!({
            "github_issue_id": 11,
            "number": 3,
            "title": "Crash on start",
            "labels": ["bug", {"name": "ui", "color": "fff"}, null, 5, {"id": 1}],
            "updated_at": null,
        }))
        .unwrap();

        assert_eq!(issue.labels.len(), 5);
        assert_eq!(issue.label_names(), vec!["bug", "ui"]);
        assert!(issue.has_label("ui"));
        assert!(!issue.has_label("docs"));
        assert_eq!(issue.updated_at, None);
    }

    #[test]
    fn non_array_labels_are_empty() {
        let issue: Issue =
            serde_json::from_value(json!({"title": "x", "labels": "bug"})).unwrap();
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn project_accepts_nulls() {
        let project: Project = serde_json::from_value(json!({
            "id": "p1",
            "github_full_name": null,
            "repo": null,
            "languages": null,
            "contributors_count": null,
        }))
        .unwrap();

        assert_eq!(project.github_full_name, "");
        assert!(project.repo.is_none());
        assert!(project.languages.is_empty());
        assert_eq!(project.contributors_count, 0);
    }

    #[test]
    fn envelopes_default_to_empty() {
        let issues: IssuesEnvelope = serde_json::from_value(json!({"issues": null})).unwrap();
        assert!(issues.issues.is_empty());
        let prs: PullRequestsEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(prs.prs.is_empty());
    }

    #[test]
    fn pr_row_from_dashboard_json() {
        let row: PullRequestRow = serde_json::from_value(json!({
            "title": "Add caching",
            "number": 42,
            "status": "draft",
            "statusDetail": "opened 2d ago",
            "author": {"name": "octocat", "badges": ["High trust"]},
            "repo": "octo/widgets",
            "org": "",
            "url": "https://github.com/octo/widgets/pull/42",
            "indicators": ["check", "eye", "sparkle"],
        }))
        .unwrap();

        assert_eq!(row.status, PrStatus::Draft);
        assert_eq!(row.status_detail, "opened 2d ago");
        assert_eq!(
            row.indicators,
            vec![Indicator::Check, Indicator::Eye, Indicator::Other]
        );
        assert_eq!(row.repo_owner(), "octo");
    }
}
