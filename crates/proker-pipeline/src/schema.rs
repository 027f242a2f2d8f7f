//! Schema normalizer
//!
//! Validates the source header against the configured [`ColumnMap`] and turns
//! raw rows into typed rows. Hierarchical columns (group and title) come from
//! merged spreadsheet cells: only the first row of a merged block carries the
//! value, so empty cells are forward-filled from the nearest preceding
//! non-empty cell, in source order.

use proker_core::{ColumnMap, RawTable, SchemaError};

/// A raw row after column validation and forward-fill.
///
/// Date cells are still raw text here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRow {
    /// Zero-based position in the source
    pub index: usize,
    pub group: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub deliverables: Option<String>,
}

/// Find the source header whose trimmed text equals `name`.
///
/// Returns the header as written in the source, since rows are keyed by it.
/// The first match wins when trimming makes two headers collide.
pub fn resolve_column<'a>(headers: &'a [String], name: &str) -> Option<&'a str> {
    let name = name.trim();
    headers
        .iter()
        .find(|h| h.trim() == name)
        .map(String::as_str)
}

fn require<'a>(headers: &'a [String], name: &str) -> Result<&'a str, SchemaError> {
    resolve_column(headers, name).ok_or_else(|| SchemaError::MissingColumn(name.trim().to_string()))
}

/// Replace each empty cell with the last non-empty value above it.
///
/// Values are trimmed; whitespace-only cells count as empty. Leading empty
/// cells with nothing above them stay empty.
pub fn forward_fill<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut last: Option<&str> = None;
    values
        .into_iter()
        .map(|value| {
            let value = value.trim();
            if value.is_empty() {
                last.unwrap_or_default().to_string()
            } else {
                last = Some(value);
                value.to_string()
            }
        })
        .collect()
}

/// Validate the header and produce typed, forward-filled rows.
///
/// Every required column must be present or nothing is produced. The
/// deliverables column is optional.
pub fn normalize(table: &RawTable, columns: &ColumnMap) -> Result<Vec<NormalizedRow>, SchemaError> {
    let group_col = require(&table.headers, &columns.group)?;
    let title_col = require(&table.headers, &columns.title)?;
    let start_col = require(&table.headers, &columns.start)?;
    let end_col = require(&table.headers, &columns.end)?;
    let deliverables_col = resolve_column(&table.headers, &columns.deliverables);

    let groups = forward_fill(table.rows.iter().map(|r| r.cell(group_col)));
    let titles = forward_fill(table.rows.iter().map(|r| r.cell(title_col)));

    let rows = table
        .rows
        .iter()
        .zip(groups)
        .zip(titles)
        .map(|((row, group), title)| {
            let deliverables = deliverables_col
                .map(|col| row.cell(col).trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string);

            NormalizedRow {
                index: row.index,
                group,
                title,
                start: row.cell(start_col).to_string(),
                end: row.cell(end_col).to_string(),
                deliverables,
            }
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut table = RawTable::new(headers.iter().copied());
        for row in rows {
            table.push_record(row.iter().copied());
        }
        table
    }

    #[test]
    fn forward_fill_merged_cells() {
        let filled = forward_fill(["A", "", "", "B", ""]);
        assert_eq!(filled, vec!["A", "A", "A", "B", "B"]);
    }

    #[test]
    fn forward_fill_leading_empty_stays_empty() {
        let filled = forward_fill(["", " ", "C", ""]);
        assert_eq!(filled, vec!["", "", "C", "C"]);
    }

    #[test]
    fn forward_fill_treats_whitespace_as_empty() {
        let filled = forward_fill([" Mktg ", "   ", "\t"]);
        assert_eq!(filled, vec!["Mktg", "Mktg", "Mktg"]);
    }

    #[test]
    fn headers_are_matched_after_trimming() {
        let t = table(
            &[" Bagian ", "Program Kerja ", "  Mulai", "Selesai"],
            &[&["Mktg", "Launch", "03/01/2026", "03/15/2026"]],
        );
        let rows = normalize(&t, &ColumnMap::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].group, "Mktg");
        assert_eq!(rows[0].title, "Launch");
        assert_eq!(rows[0].start, "03/01/2026");
        assert_eq!(rows[0].deliverables, None);
    }

    #[test]
    fn missing_required_column_is_schema_error() {
        let t = table(&["Bagian", "Program Kerja", "Mulai"], &[&["Mktg", "Launch", "x"]]);
        let err = normalize(&t, &ColumnMap::default()).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumn("Selesai".into()));
    }

    #[test]
    fn group_and_title_are_forward_filled() {
        let t = table(
            &["Bagian", "Program Kerja", "Mulai", "Selesai", "Output / Deliverables"],
            &[
                &["Mktg", "Launch", "a", "b", "Deck"],
                &["", "", "c", "d", ""],
                &["", "Survey", "e", "f", "  "],
                &["Ops", "", "g", "h", "Report"],
            ],
        );
        let rows = normalize(&t, &ColumnMap::default()).unwrap();

        let groups: Vec<&str> = rows.iter().map(|r| r.group.as_str()).collect();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(groups, vec!["Mktg", "Mktg", "Mktg", "Ops"]);
        assert_eq!(titles, vec!["Launch", "Launch", "Survey", "Survey"]);
        assert_eq!(rows[0].deliverables.as_deref(), Some("Deck"));
        assert_eq!(rows[1].deliverables, None);
        assert_eq!(rows[2].deliverables, None);
        assert_eq!(rows[3].index, 3);
    }

    #[test]
    fn custom_column_names() {
        let columns = ColumnMap {
            group: "Dept".into(),
            title: "Initiative".into(),
            start: "Start".into(),
            end: "End".into(),
            deliverables: "Notes".into(),
        };
        let t = table(
            &["Dept", "Initiative", "Start", "End", "Notes"],
            &[&["R&D", "Prototype", "2026-01-05", "2026-02-01", "Demo"]],
        );
        let rows = normalize(&t, &columns).unwrap();
        assert_eq!(rows[0].group, "R&D");
        assert_eq!(rows[0].deliverables.as_deref(), Some("Demo"));
    }
}
