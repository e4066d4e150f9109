//! In-memory [`IssueTracker`] used by unit tests.

use crate::github::tracker::IssueTracker;
use crate::issue::RemoteIssueSummary;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ViewLabel(String),
    CreateLabel { label: String, color: String },
    SearchIssues(String),
    CreateIssue { title: String, labels: Vec<String> },
}

#[derive(Default)]
struct State {
    labels: HashSet<String>,
    issues: Vec<RemoteIssueSummary>,
    calls: Vec<Call>,
}

/// Tracker whose behavior is configured up front and whose calls are recorded.
///
/// Search is a substring match over existing titles, like a real full text
/// search would return near misses.
#[derive(Default)]
pub struct FakeTracker {
    state: Mutex<State>,
    failing_labels: HashSet<String>,
    failing_searches: HashSet<String>,
    panicking_searches: HashSet<String>,
    failing_creates: HashSet<String>,
    search_results: HashMap<String, Vec<RemoteIssueSummary>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(self, label: &str) -> Self {
        self.lock().labels.insert(label.to_string());
        self
    }

    pub fn with_issue(self, title: &str) -> Self {
        {
            let mut state = self.lock();
            let url = format!("https://github.com/o/r/issues/{}", state.issues.len() + 1);
            state.issues.push(RemoteIssueSummary {
                title: title.to_string(),
                url,
            });
        }
        self
    }

    /// Creating `label` fails.
    pub fn failing_label(mut self, label: &str) -> Self {
        self.failing_labels.insert(label.to_string());
        self
    }

    /// Searching for `query` returns an error.
    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    /// Searching for `query` panics.
    pub fn panicking_search(mut self, query: &str) -> Self {
        self.panicking_searches.insert(query.to_string());
        self
    }

    /// Creating an issue titled `title` fails.
    pub fn failing_create(mut self, title: &str) -> Self {
        self.failing_creates.insert(title.to_string());
        self
    }

    /// Searching for `query` returns exactly `titles`, bypassing the substring match.
    pub fn search_returns(mut self, query: &str, titles: &[&str]) -> Self {
        let results = titles
            .iter()
            .map(|title| RemoteIssueSummary {
                title: title.to_string(),
                url: String::new(),
            })
            .collect();
        self.search_results.insert(query.to_string(), results);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn label_creations(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::CreateLabel { .. }))
            .count()
    }

    pub fn issue_creations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateIssue { title, .. } => Some(title),
                _ => None,
            })
            .collect()
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.lock().labels.contains(label)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn view_label(&self, _repo: &str, label: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::ViewLabel(label.to_string()));
        if state.labels.contains(label) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("label '{label}' not found"))
        }
    }

    async fn create_label(&self, _repo: &str, label: &str, color: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::CreateLabel {
            label: label.to_string(),
            color: color.to_string(),
        });
        if self.failing_labels.contains(label) {
            return Err(anyhow::anyhow!("HTTP 422: label '{label}' rejected"));
        }
        state.labels.insert(label.to_string());
        Ok(())
    }

    async fn search_issues(&self, _repo: &str, query: &str) -> Result<Vec<RemoteIssueSummary>> {
        if self.panicking_searches.contains(query) {
            panic!("search for '{query}' blew up");
        }
        let mut state = self.lock();
        state.calls.push(Call::SearchIssues(query.to_string()));
        if self.failing_searches.contains(query) {
            return Err(anyhow::anyhow!("HTTP 502: search unavailable"));
        }
        if let Some(results) = self.search_results.get(query) {
            return Ok(results.clone());
        }
        Ok(state
            .issues
            .iter()
            .filter(|issue| issue.title.contains(query) || query.contains(&issue.title))
            .cloned()
            .collect())
    }

    async fn create_issue(
        &self,
        _repo: &str,
        title: &str,
        _body: &str,
        labels: &[String],
    ) -> Result<String> {
        let mut state = self.lock();
        state.calls.push(Call::CreateIssue {
            title: title.to_string(),
            labels: labels.to_vec(),
        });
        if self.failing_creates.contains(title) {
            return Err(anyhow::anyhow!("HTTP 500: could not create issue"));
        }
        let url = format!("https://github.com/o/r/issues/{}", state.issues.len() + 1);
        state.issues.push(RemoteIssueSummary {
            title: title.to_string(),
            url: url.clone(),
        });
        Ok(url)
    }
}
