use crate::github::tracker::IssueTracker;
use crate::output::Console;

/// Makes sure `label` exists in `repo`, creating it with `color` when the
/// lookup fails.
///
/// Any lookup failure leads to a forced create, so a label that exists but
/// could not be viewed is overwritten rather than duplicated. Returns whether
/// the label exists afterwards.
pub async fn ensure_label(
    tracker: &dyn IssueTracker,
    label: &str,
    repo: &str,
    color: &str,
    console: &Console<'_>,
) -> bool {
    console.println(&format!("🏷️  Checking label: {label}"));

    match tracker.view_label(repo, label).await {
        Ok(()) => {
            console.println(&format!("✅ Label exists: {label}"));
            return true;
        }
        Err(err) => tracing::debug!(%label, error = %err, "Label lookup failed"),
    }

    console.println(&format!("🏷️  Creating missing label: {label}"));
    match tracker.create_label(repo, label, color).await {
        Ok(()) => {
            console.println(&format!("✅ Label created: {label}"));
            true
        }
        Err(err) => {
            tracing::warn!(%label, error = %err, "Label creation failed");
            console.error(&format!("❌ Failed to create label: {label}"));
            console.error(&format!("   ❌ Error details: {err:#}"));
            false
        }
    }
}
