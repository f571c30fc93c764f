use chrono::{TimeZone, Utc};
use grainview::data::{IssueTab, IssueTabId, IssuesEnvelope, Project, PullRequestsEnvelope};
use grainview::derive::{build_issue_tabs, derive_project_view, filter_issues, time_ago_at};

fn issues_json() -> IssuesEnvelope {
    serde_json::from_str(
        r#"{"issues": [
            {"github_issue_id": 1, "number": 10, "title": "A", "author_login": "ann",
             "labels": ["bug", {"name": "ui"}], "url": "https://github.com/octo/widgets/issues/10"},
            {"github_issue_id": 2, "number": 11, "title": "B", "author_login": "bob",
             "labels": [{"name": "bug"}, null, 7, {}]},
            {"github_issue_id": 3, "number": 12, "title": "C", "author_login": null,
             "labels": null}
        ]}"#,
    )
    .unwrap()
}

#[test]
fn issue_tabs_from_api_payload() {
    let issues = issues_json().issues;
    let tabs = build_issue_tabs(&issues);

    assert_eq!(
        tabs,
        vec![
            IssueTab::all(3),
            IssueTab {
                id: IssueTabId::Label("bug".into()),
                label: "bug".into(),
                count: 2,
            },
            IssueTab {
                id: IssueTabId::Label("ui".into()),
                label: "ui".into(),
                count: 1,
            },
        ]
    );

    let titles: Vec<&str> = filter_issues(&issues, &IssueTabId::Label("bug".into()))
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(titles, vec!["A", "B"]);

    assert_eq!(filter_issues(&issues, &IssueTabId::All).len(), 3);
    assert!(filter_issues(&issues, &IssueTabId::Label("missing".into())).is_empty());
}

#[test]
fn project_view_from_api_payload() {
    let project: Project = serde_json::from_str(
        r#"{"id": "p1", "github_full_name": "octo/widgets", "repo": null,
            "languages": [{"name": "Go", "percentage": 12.5}, {"name": "Rust", "percentage": 80.4}],
            "ecosystem_name": "Cloud", "category": null, "contributors_count": 9}"#,
    )
    .unwrap();
    let issues = issues_json().issues;
    let prs = serde_json::from_str::<PullRequestsEnvelope>(
        r#"{"prs": [
            {"github_pr_id": 5, "number": 7, "title": "Speed up", "author_login": "cy",
             "state": "open", "merged": false, "updated_at": "2025-03-01T09:00:00Z"}
        ]}"#,
    )
    .unwrap()
    .prs;

    let view = derive_project_view(&project, &issues, &prs);

    assert_eq!(view.repo_name, "widgets");
    assert_eq!(view.owner, "octo");
    assert_eq!(view.github_url, "https://github.com/octo/widgets");
    assert_eq!(view.owner_avatar, "https://github.com/octo.png?size=200");

    let langs: Vec<(&str, u32)> = view
        .languages
        .iter()
        .map(|l| (l.name.as_str(), l.percentage))
        .collect();
    assert_eq!(langs, vec![("Rust", 80), ("Go", 13)]);

    let names: Vec<&str> = view.contributors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ann", "bob", "cy"]);

    assert_eq!(view.recent_activity.len(), 1);
    assert_eq!(view.recent_activity[0].number, "7");
    assert_eq!(view.recent_activity[0].date, "2025-03-01");

    assert_eq!(view.ecosystems, vec!["Cloud".to_string()]);
    assert!(view.categories.is_empty());
}

#[test]
fn relative_times() {
    let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
    assert_eq!(time_ago_at(Some("2025-03-10T10:30:00Z"), now), "1h ago");
    assert_eq!(time_ago_at(Some("2025-03-10T11:59:30Z"), now), "0m ago");
    assert_eq!(time_ago_at(Some("2025-03-07T12:00:00Z"), now), "3d ago");
    assert_eq!(time_ago_at(None, now), "");
}
