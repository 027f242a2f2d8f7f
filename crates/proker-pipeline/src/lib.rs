//! # proker-pipeline
//!
//! Normalization pipeline turning a raw spreadsheet export into an ordered,
//! date-typed set of initiatives.
//!
//! Stages, in order:
//! - [`schema`]: header validation and forward-fill of merged cells
//! - [`temporal`]: start/end parsing under an explicit date policy
//! - [`classify`]: quarter and month buckets
//! - [`ordering`]: stable `(group, start)` order, boundaries and sections
//! - [`filter`]: group and time-bucket selection for a view
//!
//! ## Example
//!
//! ```rust
//! use proker_core::{PipelineConfig, RawTable, ViewConfig};
//! use proker_pipeline::Pipeline;
//!
//! let mut table = RawTable::new(["Bagian", "Program Kerja", "Mulai", "Selesai"]);
//! table.push_record(["Mktg", "Launch", "01/03/2026", "15/03/2026"]);
//! table.push_record(["", "Survey", "20/03/2026", "25/03/2026"]);
//!
//! let pipeline = Pipeline::new(PipelineConfig::new().day_first(true));
//! let dataset = pipeline.run(&table).unwrap();
//! let view = dataset.view(&ViewConfig::new());
//!
//! assert_eq!(view.records.len(), 2);
//! assert!(view.boundaries.is_empty());
//! ```

pub mod classify;
pub mod filter;
pub mod ordering;
pub mod schema;
pub mod temporal;

pub use filter::{available_groups, available_months, available_quarters, build_view};
pub use schema::{forward_fill, NormalizedRow};
pub use temporal::DateParser;

use chrono::Month;
use proker_core::{
    DropReason, DroppedRow, InitiativeRecord, NormalizationReport, PipelineConfig, Quarter,
    RawTable, SchemaError, TimelineView, ViewConfig,
};
use tracing::{debug, info};

/// Runs the normalization stages over a raw table
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalize, parse, classify and order a raw table.
    ///
    /// Fails only on a schema error. Rows that cannot become records are
    /// dropped and listed in the dataset's report.
    pub fn run(&self, table: &RawTable) -> Result<Dataset, SchemaError> {
        let rows = schema::normalize(table, &self.config.columns)?;
        let parser = DateParser::new(&self.config);

        let mut report = NormalizationReport {
            rows_read: table.len(),
            ..NormalizationReport::default()
        };
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            match self.build_record(&parser, row) {
                Ok(record) => records.push(record),
                Err(dropped) => {
                    debug!(row = dropped.row, reason = %dropped.reason, "dropping row");
                    report.dropped.push(dropped);
                }
            }
        }

        let records = ordering::order_records(records);
        report.records_kept = records.len();

        info!(
            rows = report.rows_read,
            kept = report.records_kept,
            dropped = report.dropped_count(),
            "normalized schedule"
        );

        Ok(Dataset {
            records,
            report,
            reference_year: self.config.reference_year,
        })
    }

    fn build_record(
        &self,
        parser: &DateParser,
        row: NormalizedRow,
    ) -> Result<InitiativeRecord, DroppedRow> {
        let columns = &self.config.columns;
        let reject = |reason: DropReason| DroppedRow {
            row: row.index,
            reason,
        };

        let start = parser.parse_start(&row.start).map_err(|failure| {
            reject(DropReason::UnparseableDate {
                column: columns.start.clone(),
                failure,
            })
        })?;
        let end = parser.parse_end(&row.end).map_err(|failure| {
            reject(DropReason::UnparseableDate {
                column: columns.end.clone(),
                failure,
            })
        })?;

        if row.group.is_empty() {
            return Err(reject(DropReason::MissingField {
                column: columns.group.clone(),
            }));
        }
        if row.title.is_empty() {
            return Err(reject(DropReason::MissingField {
                column: columns.title.clone(),
            }));
        }
        if start > end {
            return Err(reject(DropReason::InvertedRange { start, end }));
        }

        let buckets = classify::classify(start);
        Ok(InitiativeRecord {
            group: row.group,
            title: row.title,
            start,
            end,
            deliverables: row.deliverables,
            quarter: buckets.quarter,
            month_name: buckets.month_name.to_string(),
            source_row: row.index,
        })
    }
}

/// Output of one pipeline run: ordered records plus diagnostics
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    /// Records ordered by `(group, start)`
    pub records: Vec<InitiativeRecord>,
    pub report: NormalizationReport,
    pub reference_year: i32,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Filter the dataset for a renderer
    pub fn view(&self, config: &ViewConfig) -> TimelineView {
        build_view(&self.records, config, self.reference_year)
    }

    pub fn groups(&self) -> Vec<String> {
        available_groups(&self.records)
    }

    pub fn quarters(&self) -> Vec<Quarter> {
        available_quarters(&self.records)
    }

    pub fn months(&self) -> Vec<Month> {
        available_months(&self.records)
    }
}
