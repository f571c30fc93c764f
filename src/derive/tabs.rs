use std::collections::HashMap;

use crate::data::{Issue, IssueTab, IssueTabId};

/// Number of label tabs shown next to the synthetic "all" tab.
pub const MAX_LABEL_TABS: usize = 6;

/// Build the issue filter tabs: "all" first, then the most common labels.
///
/// A label is counted once per issue carrying it. Labels with equal counts
/// keep the order in which they were first seen.
pub fn build_issue_tabs(issues: &[Issue]) -> Vec<IssueTab> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for issue in issues {
        for name in issue.label_names() {
            match positions.get(name) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(name, counts.len());
                    counts.push((name, 1));
                }
            }
        }
    }

    // Stable sort, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut tabs = Vec::with_capacity(MAX_LABEL_TABS + 1);
    tabs.push(IssueTab::all(issues.len()));
    tabs.extend(
        counts
            .into_iter()
            .take(MAX_LABEL_TABS)
            .map(|(name, count)| IssueTab {
                id: IssueTabId::Label(name.to_string()),
                label: name.to_string(),
                count,
            }),
    );
    tabs
}

/// Issues visible under `active`, in their original order.
pub fn filter_issues<'a>(issues: &'a [Issue], active: &IssueTabId) -> Vec<&'a Issue> {
    match active {
        IssueTabId::All => issues.iter().collect(),
        IssueTabId::Label(name) => issues.iter().filter(|it| it.has_label(name)).collect(),
    }
}

/// Indices variant of [`filter_issues`], used by the table state.
pub fn filter_issue_indices(issues: &[Issue], active: &IssueTabId) -> Vec<usize> {
    match active {
        IssueTabId::All => (0..issues.len()).collect(),
        IssueTabId::Label(name) => issues
            .iter()
            .enumerate()
            .filter(|(_, it)| it.has_label(name))
            .map(|(idx, _)| idx)
            .collect(),
    }
}
