//! # proker-core
//!
//! Core domain model and traits for the proker timeline engine.
//!
//! This crate provides:
//! - Raw input types: `RawTable`, `RawRow`
//! - Domain types: `InitiativeRecord`, `Quarter`, `TimelineView`
//! - Configuration: `PipelineConfig`, `ColumnMap`, `ViewConfig`
//! - Core traits: `TimelineRenderer`
//! - Error types and the normalization report
//!
//! ## Example
//!
//! ```rust
//! use proker_core::{RawTable, Quarter, ViewConfig, Granularity};
//!
//! let mut table = RawTable::new(["Bagian", "Program Kerja", "Mulai", "Selesai"]);
//! table.push_record(["Mktg", "Launch", "03/01/2026", "03/15/2026"]);
//! assert_eq!(table.rows[0].cell("Bagian"), "Mktg");
//!
//! let view = ViewConfig::new()
//!     .granularity(Granularity::Quarterly)
//!     .quarters([Quarter::Q1]);
//! assert!(view.quarters.allows(&Quarter::Q1));
//! ```

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Raw Input
// ============================================================================

/// One unmodified row of the external tabular feed.
///
/// Cells are keyed by the header exactly as it appeared in the source,
/// surrounding whitespace included. Trimming happens in the schema normalizer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Zero-based position of the row in the source (header excluded)
    pub index: usize,
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: HashMap::new(),
        }
    }

    /// Set a cell value (builder style)
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a cell value. The first value written for a column wins.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.entry(column.into()).or_insert_with(|| value.into());
    }

    /// Get a cell value if the column exists in this row
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Get a cell value, treating a missing column as an empty cell
    pub fn cell(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The raw feed: header list plus rows in source order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column identifiers as read from the source
    pub headers: Vec<String>,
    /// Rows in physical source order
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Create an empty table with the given headers
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row given positionally against the headers.
    ///
    /// Missing trailing values read as empty cells; values beyond the
    /// header count are ignored.
    pub fn push_record<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_record_at(self.rows.len(), values);
    }

    /// Append a row that sits at `index` in the source.
    ///
    /// Used when the reader skips rows, so that reported positions still
    /// point at the source row.
    pub fn push_record_at<I, S>(&mut self, index: usize, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = RawRow::new(index);
        let mut values = values.into_iter();
        for header in &self.headers {
            let value = values.next().map(Into::into).unwrap_or_default();
            row.insert(header.clone(), value);
        }
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// Calendar Buckets
// ============================================================================

/// Calendar months in order, indexed by `month0`
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Map a one-based month number to a `Month`
pub fn month_from_number(number: u32) -> Option<Month> {
    number
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
}

/// Calendar quarter
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Quarter containing a one-based month number (⌈month / 3⌉)
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// Quarter containing a date
    pub fn of(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// One-based number of the first month in this quarter
    pub fn first_month(self) -> u32 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 4,
            Quarter::Q3 => 7,
            Quarter::Q4 => 10,
        }
    }

    /// First day of this quarter in the given year
    pub fn start_date(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.first_month(), 1)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        f.write_str(label)
    }
}

impl FromStr for Quarter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .unwrap_or(trimmed);
        match digits {
            "1" => Ok(Quarter::Q1),
            "2" => Ok(Quarter::Q2),
            "3" => Ok(Quarter::Q3),
            "4" => Ok(Quarter::Q4),
            _ => Err(ConfigError::InvalidValue {
                field: "quarter",
                value: s.to_string(),
            }),
        }
    }
}

/// Locale used to recognize full month names in the named-month encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthLocale {
    #[default]
    English,
    Indonesian,
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const INDONESIAN_MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

impl MonthLocale {
    /// Full month names, January first
    pub fn names(self) -> &'static [&'static str; 12] {
        match self {
            MonthLocale::English => &ENGLISH_MONTHS,
            MonthLocale::Indonesian => &INDONESIAN_MONTHS,
        }
    }

    /// Full name of a month in this locale
    pub fn name(self, month: Month) -> &'static str {
        self.names()[month.number_from_month() as usize - 1]
    }

    /// Match a full month name, ignoring case and surrounding whitespace
    pub fn parse(self, s: &str) -> Option<Month> {
        let needle = s.trim();
        self.names()
            .iter()
            .position(|name| name.eq_ignore_ascii_case(needle))
            .map(|i| MONTHS[i])
    }
}

impl FromStr for MonthLocale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(MonthLocale::English),
            "indonesian" | "id" => Ok(MonthLocale::Indonesian),
            _ => Err(ConfigError::InvalidValue {
                field: "locale",
                value: s.to_string(),
            }),
        }
    }
}

/// Full English month name. Bucket labels always use this reference locale.
pub fn month_name(month: Month) -> &'static str {
    MonthLocale::English.name(month)
}

// ============================================================================
// Initiative Record
// ============================================================================

/// A normalized, date-typed initiative. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InitiativeRecord {
    /// Owning department/section
    pub group: String,
    /// Initiative name
    pub title: String,
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
    /// Free-text deliverables
    pub deliverables: Option<String>,
    /// Quarter of `start`
    pub quarter: Quarter,
    /// Full English month name of `start`
    pub month_name: String,
    /// Zero-based position of the originating raw row
    pub source_row: usize,
}

impl InitiativeRecord {
    /// Month of `start`
    pub fn month(&self) -> Month {
        MONTHS[self.start.month0() as usize]
    }

    /// Exclusive end of the rendered bar: the day after `end`
    pub fn bar_end(&self) -> NaiveDate {
        self.end.succ_opt().unwrap_or(self.end)
    }

    /// Length of the rendered bar in days, never zero for a valid record
    pub fn duration_days(&self) -> i64 {
        (self.bar_end() - self.start).num_days().max(1)
    }
}

// ============================================================================
// Pipeline Configuration
// ============================================================================

/// Field order for ambiguous numeric dates such as `06/01/2026`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `06/01/2026` is 6 January
    DayFirst,
    /// `06/01/2026` is 1 June
    #[default]
    MonthFirst,
}

impl DateOrder {
    pub fn from_day_first(day_first: bool) -> Self {
        if day_first {
            DateOrder::DayFirst
        } else {
            DateOrder::MonthFirst
        }
    }

    pub fn is_day_first(self) -> bool {
        matches!(self, DateOrder::DayFirst)
    }
}

/// How the start/end cells encode dates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateEncoding {
    /// Cells hold calendar dates
    #[default]
    Explicit,
    /// Cells hold a month name; days are synthesized in the reference year
    NamedMonth,
}

impl FromStr for DateEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(DateEncoding::Explicit),
            "named-month" | "named_month" | "month" => Ok(DateEncoding::NamedMonth),
            _ => Err(ConfigError::InvalidValue {
                field: "encoding",
                value: s.to_string(),
            }),
        }
    }
}

/// Source column names for each field of a record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub group: String,
    pub title: String,
    pub start: String,
    pub end: String,
    /// Optional column; its absence is not an error
    pub deliverables: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            group: "Bagian".into(),
            title: "Program Kerja".into(),
            start: "Mulai".into(),
            end: "Selesai".into(),
            deliverables: "Output / Deliverables".into(),
        }
    }
}

impl ColumnMap {
    /// Columns that must be present in the source header
    pub fn required(&self) -> [&str; 4] {
        [&self.group, &self.title, &self.start, &self.end]
    }
}

/// Reference year used by the named-month encoding
pub const DEFAULT_REFERENCE_YEAR: i32 = 2026;

/// Configuration of one pipeline run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub date_order: DateOrder,
    pub date_encoding: DateEncoding,
    pub reference_year: i32,
    pub month_locale: MonthLocale,
    pub columns: ColumnMap,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::default(),
            date_encoding: DateEncoding::default(),
            reference_year: DEFAULT_REFERENCE_YEAR,
            month_locale: MonthLocale::default(),
            columns: ColumnMap::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the day/month order from a `day_first` flag
    pub fn day_first(mut self, day_first: bool) -> Self {
        self.date_order = DateOrder::from_day_first(day_first);
        self
    }

    pub fn encoding(mut self, encoding: DateEncoding) -> Self {
        self.date_encoding = encoding;
        self
    }

    pub fn reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn locale(mut self, locale: MonthLocale) -> Self {
        self.month_locale = locale;
        self
    }

    pub fn columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }
}

// ============================================================================
// View Configuration
// ============================================================================

/// A caller's choice among the options of one filter widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<T> {
    /// Every value passes
    All,
    /// Only the listed values pass; an empty list passes nothing
    Only(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        Selection::Only(values.into_iter().collect())
    }

    /// Whether a value passes this selection
    pub fn allows(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values.contains(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// `All` is written as an absent value (`null`), `Only` as a list
impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Selection::All => serializer.serialize_none(),
            Selection::Only(values) => serializer.serialize_some(values),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Selection<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.map_or(Selection::All, Selection::Only))
    }
}

/// Time granularity of the timeline view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    #[default]
    Annual,
    Quarterly,
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Annual => "annual",
            Granularity::Quarterly => "quarterly",
            Granularity::Monthly => "monthly",
        };
        f.write_str(label)
    }
}

impl FromStr for Granularity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "year" | "all" => Ok(Granularity::Annual),
            "quarterly" | "quarter" => Ok(Granularity::Quarterly),
            "monthly" | "month" => Ok(Granularity::Monthly),
            _ => Err(ConfigError::InvalidValue {
                field: "view",
                value: s.to_string(),
            }),
        }
    }
}

/// Query-time filter selection
///
/// `quarters` only applies in the quarterly view and `months` only in the
/// monthly view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub groups: Selection<String>,
    pub granularity: Granularity,
    pub quarters: Selection<Quarter>,
    pub months: Selection<Month>,
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given groups
    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Selection::only(groups.into_iter().map(Into::into));
        self
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Restrict the quarterly view to the given quarters
    pub fn quarters(mut self, quarters: impl IntoIterator<Item = Quarter>) -> Self {
        self.quarters = Selection::only(quarters);
        self
    }

    /// Restrict the monthly view to the given months
    pub fn months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.months = Selection::only(months);
        self
    }
}

// ============================================================================
// Timeline View
// ============================================================================

/// Smallest recommended canvas height in pixels
pub const MIN_DISPLAY_HEIGHT: u32 = 450;

/// Recommended canvas height per record in pixels
pub const ROW_DISPLAY_HEIGHT: u32 = 50;

/// Recommended canvas height for a number of records
///
/// Monotonically non-decreasing in `count`.
pub fn recommended_height(count: usize) -> u32 {
    let rows = u32::try_from(count).unwrap_or(u32::MAX);
    rows.saturating_mul(ROW_DISPLAY_HEIGHT).max(MIN_DISPLAY_HEIGHT)
}

/// Whether a view has anything to show, and why not
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewStatus {
    /// Nothing was loaded upstream
    NoData,
    /// Data is loaded but no record passes the filter
    NoMatches,
    Ready,
}

/// A contiguous run of records sharing one group
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupSection {
    pub group: String,
    /// First row of the run
    pub start: usize,
    /// One past the last row of the run
    pub end: usize,
}

impl GroupSection {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Filtered, ordered records ready for a renderer
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub status: ViewStatus,
    pub granularity: Granularity,
    /// Year the quarterly axis is laid out against
    pub reference_year: i32,
    pub records: Vec<InitiativeRecord>,
    /// Positions `i` where `records[i].group != records[i + 1].group`
    pub boundaries: Vec<usize>,
    pub sections: Vec<GroupSection>,
    /// Recommended canvas height in pixels
    pub display_height: u32,
}

impl TimelineView {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest start and latest exclusive bar end over all records
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.records.iter().map(|r| r.start).min()?;
        let end = self.records.iter().map(InitiativeRecord::bar_end).max()?;
        Some((start, end))
    }

    /// Distinct groups in display order
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for record in &self.records {
            if !groups.contains(&record.group.as_str()) {
                groups.push(&record.group);
            }
        }
        groups
    }
}

// ============================================================================
// Normalization Report
// ============================================================================

/// Why a raw row did not become a record
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DropReason {
    /// A start or end cell failed to parse
    UnparseableDate { column: String, failure: ParseFailure },
    /// A required field is still empty after forward-fill
    MissingField { column: String },
    /// Start falls after end
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::UnparseableDate { column, failure } => {
                write!(f, "column '{}': {}", column, failure)
            }
            DropReason::MissingField { column } => write!(f, "column '{}' is empty", column),
            DropReason::InvertedRange { start, end } => {
                write!(f, "start {} is after end {}", start, end)
            }
        }
    }
}

/// A raw row that was dropped during normalization
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DroppedRow {
    pub row: usize,
    pub reason: DropReason,
}

/// Diagnostics for one pipeline run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    /// Raw rows read
    pub rows_read: usize,
    /// Records produced
    pub records_kept: usize,
    pub dropped: Vec<DroppedRow>,
}

impl NormalizationReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Rows dropped because a date failed to parse
    pub fn parse_failures(&self) -> usize {
        self.count(|r| matches!(r, DropReason::UnparseableDate { .. }))
    }

    /// Rows dropped because a required field stayed empty
    pub fn missing_fields(&self) -> usize {
        self.count(|r| matches!(r, DropReason::MissingField { .. }))
    }

    /// Rows dropped because start fell after end
    pub fn inverted_ranges(&self) -> usize {
        self.count(|r| matches!(r, DropReason::InvertedRange { .. }))
    }

    fn count(&self, pred: impl Fn(&DropReason) -> bool) -> usize {
        self.dropped.iter().filter(|d| pred(&d.reason)).count()
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering of a finished timeline view
pub trait TimelineRenderer {
    type Output;

    /// Render a view to the output format
    fn render(&self, view: &TimelineView) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Schema validation error. Fatal to a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Why a date cell could not be parsed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseFailureKind {
    /// The cell is blank
    Empty,
    /// The text matches no accepted date shape
    UnrecognizedFormat,
    /// The fields are well-formed but name no calendar day
    InvalidDate,
    /// The text is not a month name in the configured locale
    UnknownMonth,
}

impl fmt::Display for ParseFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParseFailureKind::Empty => "empty cell",
            ParseFailureKind::UnrecognizedFormat => "unrecognized date format",
            ParseFailureKind::InvalidDate => "no such calendar day",
            ParseFailureKind::UnknownMonth => "unknown month name",
        };
        f.write_str(label)
    }
}

/// A date cell that failed to parse under the active policy. Non-fatal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Error)]
#[error("cannot parse {value:?} ({kind})")]
pub struct ParseFailure {
    pub value: String,
    pub kind: ParseFailureKind,
}

impl ParseFailure {
    pub fn new(value: impl Into<String>, kind: ParseFailureKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

/// Configuration value error
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
