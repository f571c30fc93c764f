use nucleo_matcher::{
    pattern::{CaseMatching, Normalization, Pattern},
    Matcher,
};

use crate::data::{Issue, PullRequestRow};

/// Search text paired with the index of the item it describes.
struct Haystack {
    idx: usize,
    text: String,
}

impl AsRef<str> for Haystack {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Fuzzy-rank `haystacks`, best match first. An empty query keeps the input order.
fn rank(haystacks: Vec<Haystack>, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return haystacks.into_iter().map(|h| h.idx).collect();
    }

    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    // match_list returns matches sorted by score, descending
    pattern
        .match_list(haystacks, &mut matcher)
        .into_iter()
        .map(|(haystack, _score)| haystack.idx)
        .collect()
}

/// Narrow `candidates` (indices into `issues`) to those matching `query`.
pub fn search_issues(issues: &[Issue], candidates: &[usize], query: &str) -> Vec<usize> {
    let haystacks = candidates
        .iter()
        .filter_map(|&idx| issues.get(idx).map(|issue| (idx, issue)))
        .map(|(idx, issue)| Haystack {
            idx,
            text: format!(
                "#{} {} {} {}",
                issue.number,
                issue.author_login,
                issue.title,
                issue.label_names().join(" ")
            ),
        })
        .collect();
    rank(haystacks, query)
}

pub fn search_pr_rows(rows: &[PullRequestRow], query: &str) -> Vec<usize> {
    let haystacks = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| Haystack {
            idx,
            text: format!(
                "#{} {} {} {} {}",
                row.number,
                row.author.name,
                row.title,
                row.status.to_str(),
                row.repo
            ),
        })
        .collect();
    rank(haystacks, query)
}
