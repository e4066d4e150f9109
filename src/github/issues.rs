use crate::github::tracker::IssueTracker;
use crate::issue::RemoteIssueSummary;
use crate::output::Console;
use anyhow::{Context, Result};

/// Parses the JSON printed by `gh issue list --json title,url`.
///
/// Empty output is treated as an empty result set.
pub fn parse_issue_search_output(stdout: &str) -> Result<Vec<RemoteIssueSummary>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("Failed to parse issue search output")
}

/// True when some search result has exactly `title`.
pub fn contains_exact_title(issues: &[RemoteIssueSummary], title: &str) -> bool {
    issues.iter().any(|issue| issue.title == title)
}

/// Checks whether an issue titled exactly `title` exists in `repo`.
///
/// The tracker search only narrows candidates. A failed search is reported
/// and treated as "does not exist".
pub async fn issue_exists(
    tracker: &dyn IssueTracker,
    title: &str,
    repo: &str,
    console: &Console<'_>,
) -> bool {
    console.println(&format!("🔍 Checking if issue exists: {title}"));

    match tracker.search_issues(repo, title).await {
        Ok(issues) => {
            if contains_exact_title(&issues, title) {
                console.println(&format!("📝 Issue already exists: {title}"));
                true
            } else {
                console.println(&format!("✨ Issue is new: {title}"));
                false
            }
        }
        Err(err) => {
            tracing::warn!(%title, error = %err, "Issue lookup failed, assuming it does not exist");
            console.error(&format!("❌ Error checking issue existence: {title}"));
            console.error(&format!("   ❌ Error details: {err:#}"));
            false
        }
    }
}
