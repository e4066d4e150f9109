//! Sequential processing of issue records.
//!
//! Records are handled one at a time in file order. The only concurrency is
//! the label fan-out inside a single record, which always waits for every
//! label before deciding whether the issue can be created.

use crate::config::RunConfiguration;
use crate::github::issues::issue_exists;
use crate::github::labels::ensure_label;
use crate::github::tracker::IssueTracker;
use crate::issue::{IssueRecord, Outcome};
use crate::output::Console;
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// Per-outcome counts for a finished batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    pub created: usize,
    pub skipped_existing: usize,
    pub skipped_label_failure: usize,
    pub create_failed: usize,
    pub errored: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Created { .. } => self.created += 1,
            Outcome::SkippedExisting => self.skipped_existing += 1,
            Outcome::SkippedLabelFailure { .. } => self.skipped_label_failure += 1,
            Outcome::CreateFailed { .. } => self.create_failed += 1,
            Outcome::Errored { .. } => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created
            + self.skipped_existing
            + self.skipped_label_failure
            + self.create_failed
            + self.errored
    }

    pub fn failures(&self) -> usize {
        self.skipped_label_failure + self.create_failed + self.errored
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} already existed, {} skipped for label failures, {} failed to create, {} errored",
            self.created,
            self.skipped_existing,
            self.skipped_label_failure,
            self.create_failed,
            self.errored
        )
    }
}

/// Processes every record in order and returns the outcome counts.
///
/// Nothing that happens inside one record stops the batch, including a panic
/// raised by the tracker.
pub async fn process_records(
    tracker: &dyn IssueTracker,
    config: &RunConfiguration,
    records: &[IssueRecord],
    console: &Console<'_>,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let total = records.len();

    for (index, record) in records.iter().enumerate() {
        console.println(&format!(
            "⏳ Processing issue {}/{}: {}",
            index + 1,
            total,
            record.title
        ));

        let outcome = AssertUnwindSafe(process_record(tracker, config, record, console))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Outcome::Errored {
                reason: panic_message(panic.as_ref()),
            });

        report_outcome(record, &outcome, console);
        tracing::debug!(title = %record.title, ?outcome, "Record processed");
        summary.record(&outcome);
    }

    summary
}

/// Drives a single record to its outcome.
pub async fn process_record(
    tracker: &dyn IssueTracker,
    config: &RunConfiguration,
    record: &IssueRecord,
    console: &Console<'_>,
) -> Outcome {
    let labels = record.label_names();

    if issue_exists(tracker, &record.title, &config.repository, console).await {
        return Outcome::SkippedExisting;
    }

    let results = join_all(labels.iter().map(|label| {
        ensure_label(
            tracker,
            label,
            &config.repository,
            &config.label_color,
            console,
        )
    }))
    .await;

    let failed_labels: Vec<String> = labels
        .iter()
        .zip(results)
        .filter(|(_, ok)| !ok)
        .map(|(label, _)| label.clone())
        .collect();
    if !failed_labels.is_empty() {
        return Outcome::SkippedLabelFailure { failed_labels };
    }

    match tracker
        .create_issue(&config.repository, &record.title, &record.body, &labels)
        .await
    {
        Ok(url) => Outcome::Created { url },
        Err(err) => Outcome::CreateFailed {
            reason: format!("{err:#}"),
        },
    }
}

fn report_outcome(record: &IssueRecord, outcome: &Outcome, console: &Console<'_>) {
    let title = &record.title;
    match outcome {
        Outcome::Created { url } => {
            console.println(&format!("✅ Created new issue: {title}"));
            console.println(&format!("   🌐 Issue URL: {url}"));
        }
        Outcome::SkippedExisting => {
            console.println(&format!("📝 Skipping existing issue: {title}"));
        }
        Outcome::SkippedLabelFailure { failed_labels } => {
            console.error(&format!(
                "❌ Skipped issue: {title} due to label creation failure ({})",
                failed_labels.join(", ")
            ));
        }
        Outcome::CreateFailed { reason } | Outcome::Errored { reason } => {
            console.error(&format!("❌ Error creating issue: {title}"));
            console.error(&format!("   ❌ Error details: {reason}"));
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic while processing issue".to_string()
    }
}
