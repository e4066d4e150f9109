use crate::batch::{self, BatchSummary};
use crate::cli;
use crate::config::{self, RunConfiguration};
use crate::github::gh::GhCli;
use crate::github::tracker::IssueTracker;
use crate::logging;
use crate::output::Console;
use crate::source;
use anyhow::{Context, Result};

/// Entry point shared by the binary and the acceptance tests.
///
/// Returns `Err` only for failures that abort the whole run: invalid
/// arguments, unusable configuration, or an unreadable CSV file. Failures of
/// individual issues are reported and do not surface here.
pub async fn run(args: Vec<String>, stdout_additional: Option<&mut dyn std::io::Write>) -> Result<()> {
    let console = Console::new(stdout_additional);

    match cli::parser::parse_args(&args) {
        cli::parser::Command::Help(text) | cli::parser::Command::Version(text) => {
            console.println(text.trim_end());
        }
        cli::parser::Command::Invalid(message) => {
            return Err(anyhow::anyhow!(message.trim_end().to_string()));
        }
        cli::parser::Command::Create(options) => {
            logging::init(options.verbose);

            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let file_config = config::load_project_config(&cwd)?;
            let merged = config::update_config(&file_config, &config::cli_overrides(&options));
            let run_config = config::resolve_run_configuration(
                &merged,
                std::env::var(config::REPOSITORY_ENV).ok(),
                &cwd,
            )?;
            tracing::debug!(?run_config, "Resolved run configuration");

            let tracker = GhCli::new();
            create_issues_from_csv(&tracker, &run_config, &console).await?;
        }
    }
    Ok(())
}

/// Reads every record from the configured CSV file and processes the batch.
pub async fn create_issues_from_csv(
    tracker: &dyn IssueTracker,
    config: &RunConfiguration,
    console: &Console<'_>,
) -> Result<BatchSummary> {
    console.println("📄 Parsing CSV file...");
    let records = source::read_issue_records(&config.csv_path)
        .context("Failed to read or process the CSV file")?;
    console.println(&format!("✅ Found {} issues to create.", records.len()));

    let summary = batch::process_records(tracker, config, &records, console).await;

    console.println(&format!("\n📊 Summary ({} issues): {summary}", summary.total()));
    if summary.failures() > 0 {
        console.error(&format!(
            "⚠️ {} issues were not created because of errors.",
            summary.failures()
        ));
    }
    console.println("🎉 All issues have been processed!");
    Ok(summary)
}
