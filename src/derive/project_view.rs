//! Read-only projection of a loaded project into what the detail page shows.

use std::collections::HashSet;

use crate::data::{Issue, Project, PullRequest};

use super::time_ago::date_prefix;

/// Image host used for every avatar. Logins are templated into its URL scheme.
pub const AVATAR_HOST: &str = "https://github.com";

pub const OWNER_AVATAR_SIZE: u32 = 200;
pub const CONTRIBUTOR_AVATAR_SIZE: u32 = 80;
pub const MAX_CONTRIBUTORS: usize = 6;
pub const RECENT_ACTIVITY_LEN: usize = 3;
pub const PLACEHOLDER_REPO_NAME: &str = "Project";
pub const NO_DESCRIPTION: &str = "No description available.";

pub fn avatar_url(login: &str, size: u32) -> String {
    format!("{}/{}.png?size={}", AVATAR_HOST, login, size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageStat {
    pub name: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub number: String,
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectView {
    pub repo_name: String,
    pub full_name: String,
    pub owner: String,
    pub owner_avatar: String,
    pub github_url: String,
    pub website_url: String,
    pub description: String,
    pub languages: Vec<LanguageStat>,
    pub contributors: Vec<Contributor>,
    pub contributors_count: u64,
    pub recent_activity: Vec<ActivityItem>,
    pub ecosystems: Vec<String>,
    pub categories: Vec<String>,
}

impl ProjectView {
    /// Header subtitle: the description, else the `owner/repo` name.
    pub fn subtitle(&self) -> &str {
        if self.description.is_empty() {
            &self.full_name
        } else {
            &self.description
        }
    }

    /// Overview text: the description, else a placeholder.
    pub fn overview(&self) -> &str {
        if self.description.is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }

    /// "alice, bob and 12 others". Empty when nobody has contributed yet.
    pub fn contributor_summary(&self) -> String {
        if self.contributors.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self
            .contributors
            .iter()
            .take(2)
            .map(|c| c.name.as_str())
            .collect();
        let mut summary = names.join(", ");
        if self.contributors_count > 2 {
            summary.push_str(&format!(" and {} others", self.contributors_count - 2));
        }
        summary
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

pub fn repo_name(project: &Project) -> String {
    let full = project.github_full_name.as_str();
    full.split('/')
        .nth(1)
        .and_then(non_empty)
        .or_else(|| non_empty(full))
        .unwrap_or(PLACEHOLDER_REPO_NAME)
        .to_string()
}

pub fn owner_login(project: &Project) -> String {
    project
        .repo
        .as_ref()
        .and_then(|r| non_empty(&r.owner_login))
        .or_else(|| project.github_full_name.split('/').next())
        .unwrap_or_default()
        .to_string()
}

pub fn owner_avatar(project: &Project, owner: &str) -> String {
    if let Some(url) = project
        .repo
        .as_ref()
        .and_then(|r| non_empty(&r.owner_avatar_url))
    {
        return url.to_string();
    }
    if owner.is_empty() {
        String::new()
    } else {
        avatar_url(owner, OWNER_AVATAR_SIZE)
    }
}

pub fn github_url(project: &Project) -> String {
    if let Some(url) = project.repo.as_ref().and_then(|r| non_empty(&r.html_url)) {
        return url.to_string();
    }
    if project.github_full_name.is_empty() {
        String::new()
    } else {
        format!("{}/{}", AVATAR_HOST, project.github_full_name)
    }
}

fn round_percentage(p: f64) -> u32 {
    if p.is_nan() || p <= 0.0 {
        0
    } else {
        (p + 0.5).floor() as u32
    }
}

/// Language breakdown, largest share first, percentages rounded.
pub fn languages(project: &Project) -> Vec<LanguageStat> {
    if !project.languages.is_empty() {
        let mut sorted: Vec<_> = project.languages.iter().collect();
        sorted.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        return sorted
            .into_iter()
            .map(|l| LanguageStat {
                name: l.name.clone(),
                percentage: round_percentage(l.percentage),
            })
            .collect();
    }

    match non_empty(&project.language) {
        Some(name) => vec![LanguageStat {
            name: name.to_string(),
            percentage: 100,
        }],
        None => Vec::new(),
    }
}

/// Distinct authors across issues then pull requests, first seen first.
pub fn contributors(issues: &[Issue], prs: &[PullRequest]) -> Vec<Contributor> {
    let logins = issues
        .iter()
        .map(|i| i.author_login.as_str())
        .chain(prs.iter().map(|p| p.author_login.as_str()));

    let mut seen = HashSet::new();
    let mut roster = Vec::new();
    for login in logins {
        if login.is_empty() || !seen.insert(login) {
            continue;
        }
        roster.push(Contributor {
            name: login.to_string(),
            avatar: avatar_url(login, CONTRIBUTOR_AVATAR_SIZE),
        });
        if roster.len() >= MAX_CONTRIBUTORS {
            break;
        }
    }
    roster
}

/// The first few pull requests as given; callers decide the order.
pub fn recent_activity(prs: &[PullRequest]) -> Vec<ActivityItem> {
    prs.iter()
        .take(RECENT_ACTIVITY_LEN)
        .map(|p| {
            let ts = match p.updated_at.as_deref() {
                Some(ts) if !ts.is_empty() => ts,
                _ => p.last_seen_at.as_str(),
            };
            ActivityItem {
                number: p.number.to_string(),
                title: p.title.clone(),
                date: date_prefix(ts),
            }
        })
        .collect()
}

pub fn derive_project_view(
    project: &Project,
    issues: &[Issue],
    prs: &[PullRequest],
) -> ProjectView {
    let owner = owner_login(project);
    let repo = project.repo.as_ref();

    ProjectView {
        repo_name: repo_name(project),
        full_name: project.github_full_name.clone(),
        owner_avatar: owner_avatar(project, &owner),
        owner,
        github_url: github_url(project),
        website_url: repo.map(|r| r.homepage.clone()).unwrap_or_default(),
        description: repo.map(|r| r.description.clone()).unwrap_or_default(),
        languages: languages(project),
        contributors: contributors(issues, prs),
        contributors_count: project.contributors_count,
        recent_activity: recent_activity(prs),
        ecosystems: non_empty(&project.ecosystem_name)
            .map(|e| vec![e.to_string()])
            .unwrap_or_default(),
        categories: non_empty(&project.category)
            .map(|c| vec![c.to_string()])
            .unwrap_or_default(),
    }
}
