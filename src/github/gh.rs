//! [`IssueTracker`] backed by the GitHub CLI.
//!
//! Every operation spawns `gh` with an explicit argument vector, so titles
//! and bodies are never interpreted by a shell.

use crate::github::issues::parse_issue_search_output;
use crate::github::tracker::IssueTracker;
use crate::issue::RemoteIssueSummary;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use tokio::process::Command;

const DEFAULT_PROGRAM: &str = "gh";

/// Runs `gh` subcommands against a repository.
pub struct GhCli {
    program: OsString,
}

impl GhCli {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Uses `program` instead of the `gh` found on `PATH`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        GhCli {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(?args, "Running gh");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to execute gh {}", subcommand(args)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!(
                "gh {} failed ({}): {}",
                subcommand(args),
                output.status,
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new()
    }
}

fn subcommand(args: &[&str]) -> String {
    args.iter().take(2).copied().collect::<Vec<_>>().join(" ")
}

/// Arguments for `gh label view`. `--` keeps labels such as `-wip` positional.
pub fn label_view_args<'a>(repo: &'a str, label: &'a str) -> Vec<&'a str> {
    vec!["label", "view", "--repo", repo, "--", label]
}

/// Arguments for `gh label create --force`. `--` keeps labels such as `-wip` positional.
pub fn label_create_args<'a>(repo: &'a str, label: &'a str, color: &'a str) -> Vec<&'a str> {
    vec![
        "label", "create", "--color", color, "--repo", repo, "--force", "--", label,
    ]
}

/// Arguments for `gh issue create`. `--label` is omitted when there are no labels.
pub fn issue_create_args<'a>(
    repo: &'a str,
    title: &'a str,
    body: &'a str,
    joined_labels: &'a str,
) -> Vec<&'a str> {
    let mut args = vec!["issue", "create", "--title", title, "--body", body];
    if !joined_labels.is_empty() {
        args.extend(["--label", joined_labels]);
    }
    args.extend(["--repo", repo]);
    args
}

#[async_trait]
impl IssueTracker for GhCli {
    async fn view_label(&self, repo: &str, label: &str) -> Result<()> {
        self.run(&label_view_args(repo, label)).await?;
        Ok(())
    }

    async fn create_label(&self, repo: &str, label: &str, color: &str) -> Result<()> {
        self.run(&label_create_args(repo, label, color)).await?;
        Ok(())
    }

    async fn search_issues(&self, repo: &str, query: &str) -> Result<Vec<RemoteIssueSummary>> {
        let stdout = self
            .run(&[
                "issue", "list", "--repo", repo, "--search", query, "--json", "title,url",
            ])
            .await?;
        parse_issue_search_output(&stdout)
    }

    async fn create_issue(
        &self,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<String> {
        let joined_labels = labels.join(",");
        let stdout = self
            .run(&issue_create_args(repo, title, body, &joined_labels))
            .await?;
        Ok(stdout.trim().to_string())
    }
}
