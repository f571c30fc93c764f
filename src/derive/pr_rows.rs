use crate::data::{Indicator, PrAuthor, PrStatus, Project, PullRequest, PullRequestRow};

use super::project_view::{avatar_url, owner_login};
use super::time_ago::time_ago;

pub const AUTHOR_AVATAR_SIZE: u32 = 28;
pub const REPO_AVATAR_SIZE: u32 = 20;

pub fn pr_status(pr: &PullRequest) -> PrStatus {
    if pr.merged {
        return PrStatus::Merged;
    }
    match pr.state.to_lowercase().as_str() {
        "draft" => PrStatus::Draft,
        "open" => PrStatus::Open,
        _ => PrStatus::Unknown,
    }
}

fn with_age(verb: &str, ts: Option<&str>) -> String {
    let age = time_ago(ts);
    if age.is_empty() {
        verb.to_string()
    } else {
        format!("{} {}", verb, age)
    }
}

fn status_detail(pr: &PullRequest, status: PrStatus) -> String {
    match status {
        PrStatus::Merged => with_age("merged", pr.merged_at.as_deref()),
        PrStatus::Unknown if pr.state.eq_ignore_ascii_case("closed") => {
            with_age("closed", pr.closed_at.as_deref())
        }
        PrStatus::Unknown => pr.state.clone(),
        PrStatus::Open | PrStatus::Draft => with_age("opened", pr.created_at.as_deref()),
    }
}

fn indicators(pr: &PullRequest, status: PrStatus) -> Vec<Indicator> {
    match status {
        PrStatus::Merged => vec![Indicator::Trophy, Indicator::Check],
        PrStatus::Draft => vec![Indicator::Code],
        PrStatus::Open => vec![Indicator::Eye, Indicator::Code],
        PrStatus::Unknown if pr.state.eq_ignore_ascii_case("closed") => vec![Indicator::X],
        PrStatus::Unknown => Vec::new(),
    }
}

/// Project a fetched pull request into a maintainer-list row.
pub fn pull_request_row(pr: &PullRequest, project: &Project) -> PullRequestRow {
    let status = pr_status(pr);
    PullRequestRow {
        title: pr.title.clone(),
        number: pr.number,
        status,
        status_detail: status_detail(pr, status),
        author: PrAuthor {
            name: pr.author_login.clone(),
            badges: Vec::new(),
        },
        repo: project.github_full_name.clone(),
        org: owner_login(project),
        url: pr.url.clone(),
        indicators: indicators(pr, status),
    }
}

pub fn pull_request_rows(prs: &[PullRequest], project: &Project) -> Vec<PullRequestRow> {
    prs.iter().map(|pr| pull_request_row(pr, project)).collect()
}

pub fn author_avatar(row: &PullRequestRow) -> String {
    avatar_url(&row.author.name, AUTHOR_AVATAR_SIZE)
}

pub fn repo_avatar(row: &PullRequestRow) -> String {
    avatar_url(row.repo_owner(), REPO_AVATAR_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            github_full_name: "octo/widgets".into(),
            ..Default::default()
        }
    }

    fn pr(state: &str, merged: bool) -> PullRequest {
        PullRequest {
            number: 12,
            title: "Speed up parser".into(),
            state: state.into(),
            merged,
            author_login: "ann".into(),
            url: "https://github.com/octo/widgets/pull/12".into(),
            ..Default::default()
        }
    }

    #[test]
    fn merged_flag_wins_over_state() {
        let row = pull_request_row(&pr("closed", true), &project());
        assert_eq!(row.status, PrStatus::Merged);
        assert_eq!(row.status_detail, "merged");
        assert_eq!(row.indicators, vec![Indicator::Trophy, Indicator::Check]);
    }

    #[test]
    fn closed_unmerged_is_marked_x() {
        let row = pull_request_row(&pr("closed", false), &project());
        assert_eq!(row.status, PrStatus::Unknown);
        assert_eq!(row.status_detail, "closed");
        assert_eq!(row.indicators, vec![Indicator::X]);
    }

    #[test]
    fn open_row_carries_repo_and_org() {
        let row = pull_request_row(&pr("open", false), &project());
        assert_eq!(row.status, PrStatus::Open);
        assert_eq!(row.repo, "octo/widgets");
        assert_eq!(row.org, "octo");
        assert_eq!(row.author.name, "ann");
        assert_eq!(author_avatar(&row), "https://github.com/ann.png?size=28");
        assert_eq!(repo_avatar(&row), "https://github.com/octo.png?size=20");
    }

    #[test]
    fn open_row_with_creation_time_has_age() {
        let mut p = pr("open", false);
        p.created_at = Some("2000-01-01T00:00:00Z".into());
        let row = pull_request_row(&p, &project());
        assert!(row.status_detail.starts_with("opened "));
        assert!(row.status_detail.ends_with("d ago"));
    }
}
