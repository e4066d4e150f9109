use serde::Deserialize;

/// One row of the issues CSV file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueRecord {
    pub title: String,
    pub body: String,
    /// Comma separated label names, as written in the file.
    pub labels: String,
}

impl IssueRecord {
    /// Label names in file order, trimmed, with empty entries dropped.
    pub fn label_names(&self) -> Vec<String> {
        parse_labels(&self.labels)
    }
}

/// Minimal projection of a remote issue returned by a search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteIssueSummary {
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Splits a comma separated label field into label names.
pub fn parse_labels(labels: &str) -> Vec<String> {
    labels
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Final state of a single record after the batch has processed it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created { url: String },
    SkippedExisting,
    SkippedLabelFailure { failed_labels: Vec<String> },
    CreateFailed { reason: String },
    Errored { reason: String },
}
