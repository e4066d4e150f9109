use crate::issue::RemoteIssueSummary;
use anyhow::Result;
use async_trait::async_trait;

/// Default color for labels created on demand.
pub const DEFAULT_LABEL_COLOR: &str = "0000FF";

/// Operations the batch needs from the remote issue tracker.
///
/// Every method reports failure through `Err`; callers decide whether a
/// failure is fatal for the record or recoverable.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Succeeds only when `label` exists in `repo`.
    async fn view_label(&self, repo: &str, label: &str) -> Result<()>;

    /// Creates `label`, overwriting it if it already exists.
    async fn create_label(&self, repo: &str, label: &str, color: &str) -> Result<()>;

    /// Full text search over issues in `repo`. Matches are not exact.
    async fn search_issues(&self, repo: &str, query: &str) -> Result<Vec<RemoteIssueSummary>>;

    /// Creates an issue and returns its URL.
    async fn create_issue(
        &self,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<String>;
}
