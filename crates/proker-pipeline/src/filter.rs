//! View filter
//!
//! Applies the caller's group and time-bucket selections to an ordered record
//! set. Filtering keeps relative order, so the output stays ordered and the
//! boundary list can be recomputed on it directly.

use chrono::Month;
use proker_core::{
    recommended_height, Granularity, InitiativeRecord, Quarter, TimelineView, ViewConfig,
    ViewStatus, MONTHS,
};

use crate::ordering::{group_boundaries, group_sections};

/// Whether a record passes every active predicate of the view
pub fn matches(record: &InitiativeRecord, view: &ViewConfig) -> bool {
    if !view.groups.allows(&record.group) {
        return false;
    }
    match view.granularity {
        Granularity::Annual => true,
        Granularity::Quarterly => view.quarters.allows(&record.quarter),
        Granularity::Monthly => view.months.allows(&record.month()),
    }
}

/// Records passing the view, in their original relative order
pub fn filter_records(records: &[InitiativeRecord], view: &ViewConfig) -> Vec<InitiativeRecord> {
    records
        .iter()
        .filter(|record| matches(record, view))
        .cloned()
        .collect()
}

/// Filter an ordered record set and package it for a renderer.
///
/// `records` must already be ordered. An empty input yields
/// [`ViewStatus::NoData`]; a non-empty input that filters down to nothing
/// yields [`ViewStatus::NoMatches`].
pub fn build_view(
    records: &[InitiativeRecord],
    view: &ViewConfig,
    reference_year: i32,
) -> TimelineView {
    let filtered = filter_records(records, view);
    let status = if records.is_empty() {
        ViewStatus::NoData
    } else if filtered.is_empty() {
        ViewStatus::NoMatches
    } else {
        ViewStatus::Ready
    };

    TimelineView {
        status,
        granularity: view.granularity,
        reference_year,
        boundaries: group_boundaries(&filtered),
        sections: group_sections(&filtered),
        display_height: recommended_height(filtered.len()),
        records: filtered,
    }
}

/// Distinct groups in order of first appearance
pub fn available_groups(records: &[InitiativeRecord]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for record in records {
        if !groups.contains(&record.group) {
            groups.push(record.group.clone());
        }
    }
    groups
}

/// Quarters that occur in the records, in calendar order
pub fn available_quarters(records: &[InitiativeRecord]) -> Vec<Quarter> {
    Quarter::ALL
        .into_iter()
        .filter(|q| records.iter().any(|r| r.quarter == *q))
        .collect()
}

/// Months that occur in the records, in calendar order
pub fn available_months(records: &[InitiativeRecord]) -> Vec<Month> {
    MONTHS
        .into_iter()
        .filter(|m| records.iter().any(|r| r.month() == *m))
        .collect()
}
