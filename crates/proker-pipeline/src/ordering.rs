//! Ordering & partition engine
//!
//! Records are sorted by `(group, start)` with a stable sort, so equal keys
//! keep their ingestion order. Boundaries and sections are positions inside
//! whatever slice they are computed from; callers recompute them for every
//! filtered subset.

use proker_core::{GroupSection, InitiativeRecord};

/// Stable sort by `(group, start)`
pub fn order_records(mut records: Vec<InitiativeRecord>) -> Vec<InitiativeRecord> {
    records.sort_by(|a, b| a.group.cmp(&b.group).then(a.start.cmp(&b.start)));
    records
}

/// Positions `i` where `records[i].group != records[i + 1].group`
pub fn group_boundaries(records: &[InitiativeRecord]) -> Vec<usize> {
    records
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].group != pair[1].group)
        .map(|(i, _)| i)
        .collect()
}

/// Contiguous runs of records sharing a group
pub fn group_sections(records: &[InitiativeRecord]) -> Vec<GroupSection> {
    let mut sections: Vec<GroupSection> = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(section) = sections.last_mut().filter(|s| s.group == record.group) {
            section.end = i + 1;
            continue;
        }
        sections.push(GroupSection {
            group: record.group.clone(),
            start: i,
            end: i + 1,
        });
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proker_core::Quarter;

    fn rec(group: &str, title: &str, day: u32, row: usize) -> InitiativeRecord {
        let start = NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        InitiativeRecord {
            group: group.into(),
            title: title.into(),
            start,
            end: start,
            deliverables: None,
            quarter: Quarter::Q1,
            month_name: "March".into(),
            source_row: row,
        }
    }

    #[test]
    fn orders_by_group_then_start() {
        let ordered = order_records(vec![
            rec("Ops", "o2", 20, 0),
            rec("Mktg", "m2", 15, 1),
            rec("Ops", "o1", 2, 2),
            rec("Mktg", "m1", 1, 3),
        ]);
        let titles: Vec<&str> = ordered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["m1", "m2", "o1", "o2"]);
    }

    #[test]
    fn equal_keys_keep_ingestion_order() {
        let ordered = order_records(vec![
            rec("X", "second-key-first", 5, 0),
            rec("A", "a", 9, 1),
            rec("X", "second-key-second", 5, 2),
            rec("X", "second-key-third", 5, 3),
        ]);
        let rows: Vec<usize> = ordered.iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![1, 0, 2, 3]);
    }

    #[test]
    fn boundaries_after_each_group_run() {
        let records: Vec<_> = ["X", "X", "Y", "Y", "Y", "Z"]
            .iter()
            .enumerate()
            .map(|(i, g)| rec(g, "t", 1, i))
            .collect();
        assert_eq!(group_boundaries(&records), vec![1, 4]);
    }

    #[test]
    fn boundaries_of_trivial_inputs() {
        assert!(group_boundaries(&[]).is_empty());
        assert!(group_boundaries(&[rec("X", "t", 1, 0)]).is_empty());
        assert!(group_boundaries(&[rec("X", "t", 1, 0), rec("X", "u", 2, 1)]).is_empty());
    }

    #[test]
    fn sections_cover_every_record() {
        let records: Vec<_> = ["X", "X", "Y", "Z", "Z"]
            .iter()
            .enumerate()
            .map(|(i, g)| rec(g, "t", 1, i))
            .collect();
        let sections = group_sections(&records);

        assert_eq!(
            sections,
            vec![
                GroupSection { group: "X".into(), start: 0, end: 2 },
                GroupSection { group: "Y".into(), start: 2, end: 3 },
                GroupSection { group: "Z".into(), start: 3, end: 5 },
            ]
        );
        assert_eq!(sections.iter().map(GroupSection::len).sum::<usize>(), records.len());
    }
}
