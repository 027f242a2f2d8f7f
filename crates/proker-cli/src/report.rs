//! Normalization report formatting and exit codes
//!
//! ## Exit Code Semantics
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success (dropped rows allowed unless `--strict`) |
//! | 1 | Failure: schema error, or dropped rows under `--strict` |
//! | 2 | Error: unreadable source, bad settings, render failure |

use std::io::Write;
use std::process;

use proker_core::{NormalizationReport, SchemaError};
use proker_pipeline::Dataset;
use serde::Serialize;

// ============================================================================
// Exit Code
// ============================================================================

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    /// The data is unusable: schema error or strict-mode drops
    Failure = 1,
    /// The run could not complete
    Error = 2,
}

impl ExitCode {
    /// Exit code of a `check` run
    pub fn for_report(report: &NormalizationReport, strict: bool) -> Self {
        if strict && report.dropped_count() > 0 {
            ExitCode::Failure
        } else {
            ExitCode::Success
        }
    }

    /// Exit code for an error that aborted the run
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.is::<SchemaError>()) {
            ExitCode::Failure
        } else {
            ExitCode::Error
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get the numeric value
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

// ============================================================================
// Report
// ============================================================================

/// Write a human-readable normalization report
pub fn write_text<W: Write>(mut out: W, source: &str, report: &NormalizationReport) -> std::io::Result<()> {
    writeln!(out, "Source:        {}", source)?;
    writeln!(out, "Rows read:     {}", report.rows_read)?;
    writeln!(out, "Records kept:  {}", report.records_kept)?;
    writeln!(out, "Dropped:       {}", report.dropped_count())?;

    if report.dropped.is_empty() {
        return Ok(());
    }

    writeln!(out, "  unparseable date: {}", report.parse_failures())?;
    writeln!(out, "  missing field:    {}", report.missing_fields())?;
    writeln!(out, "  start after end:  {}", report.inverted_ranges())?;
    writeln!(out)?;
    for dropped in &report.dropped {
        writeln!(out, "row {}: {}", dropped.row + 1, dropped.reason)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    #[serde(flatten)]
    report: &'a NormalizationReport,
}

/// Serialize a normalization report as JSON
pub fn to_json(source: &str, report: &NormalizationReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { source, report })
}

/// Write the groups, quarters and months present in a dataset
pub fn write_options<W: Write>(mut out: W, dataset: &Dataset) -> std::io::Result<()> {
    writeln!(out, "Groups:")?;
    for group in dataset.groups() {
        writeln!(out, "  {}", group)?;
    }

    let quarters: Vec<String> = dataset.quarters().iter().map(ToString::to_string).collect();
    writeln!(out, "Quarters: {}", quarters.join(", "))?;

    let months: Vec<&str> = dataset
        .months()
        .into_iter()
        .map(proker_core::month_name)
        .collect();
    writeln!(out, "Months: {}", months.join(", "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proker_core::{DropReason, DroppedRow, ParseFailure, ParseFailureKind};

    fn report() -> NormalizationReport {
        NormalizationReport {
            rows_read: 3,
            records_kept: 2,
            dropped: vec![DroppedRow {
                row: 1,
                reason: DropReason::UnparseableDate {
                    column: "Mulai".into(),
                    failure: ParseFailure::new("TBD", ParseFailureKind::UnrecognizedFormat),
                },
            }],
        }
    }

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Failure.code(), 1);
        assert_eq!(ExitCode::Error.code(), 2);
    }

    #[test]
    fn strict_mode_fails_on_drops() {
        assert!(ExitCode::for_report(&report(), false).is_success());
        assert_eq!(ExitCode::for_report(&report(), true), ExitCode::Failure);
        assert!(ExitCode::for_report(&NormalizationReport::default(), true).is_success());
    }

    #[test]
    fn schema_errors_map_to_failure() {
        let err = anyhow::Error::new(SchemaError::MissingColumn("Mulai".into()))
            .context("invalid schedule");
        assert_eq!(ExitCode::for_error(&err), ExitCode::Failure);

        let err = anyhow::anyhow!("network down");
        assert_eq!(ExitCode::for_error(&err), ExitCode::Error);
    }

    #[test]
    fn text_report_lists_drops() {
        let mut out = Vec::new();
        write_text(&mut out, "plan.csv", &report()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Rows read:     3"));
        assert!(text.contains("Dropped:       1"));
        assert!(text.contains("unparseable date: 1"));
        assert!(text.contains("row 2: column 'Mulai'"));
        assert!(text.contains("TBD"));
    }

    #[test]
    fn json_report_is_flat() {
        let json = to_json("plan.csv", &report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"], "plan.csv");
        assert_eq!(value["rows_read"], 3);
        assert_eq!(value["dropped"][0]["reason"]["kind"], "unparseable-date");
        assert_eq!(value["dropped"][0]["reason"]["failure"]["kind"], "unrecognized-format");
    }
}
