use crate::issue::IssueRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads every issue record from the CSV file at `path`.
///
/// The whole file is drained before returning. A row that fails to parse
/// fails the whole read, so callers never see a partial record set.
pub fn read_issue_records(path: &Path) -> Result<Vec<IssueRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_issue_records(BufReader::new(file))
}

/// Parses issue records from any CSV reader with a `title,body,labels` header.
pub fn parse_issue_records<R: Read>(reader: R) -> Result<Vec<IssueRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_idx, result) in rdr.deserialize::<IssueRecord>().enumerate() {
        // +2 for 1-indexed and header row
        let record = result.with_context(|| format!("Invalid CSV row {}", row_idx + 2))?;
        records.push(record);
    }
    tracing::debug!(count = records.len(), "Parsed issue records");
    Ok(records)
}
