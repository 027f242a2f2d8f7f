//! Ingestion feeding the normalization pipeline

use std::io::Write;
use std::time::Duration;

use pretty_assertions::assert_eq;
use proker_core::{PipelineConfig, ViewConfig, ViewStatus};
use proker_ingest::{CachedSource, FileSource, IngestError, SheetSource};
use proker_pipeline::Pipeline;

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const SHEET: &str = "\u{feff}Bagian ,Program Kerja, Mulai ,Selesai,Output / Deliverables
Marketing,Brand refresh,02/01/2026,03/15/2026,New logo
,Campaign Q2,04/01/2026,06/30/2026,
,,,,
Finance,Budget review,01/05/2026,01/20/2026,\"Report, slides\"
,Audit,TBD,02/28/2026,
";

#[test]
fn file_export_runs_through_pipeline() {
    let file = write_csv(SHEET);
    let table = FileSource::new(file.path()).load_table().unwrap();
    assert_eq!(table.len(), 4);

    let dataset = Pipeline::new(PipelineConfig::new().day_first(false))
        .run(&table)
        .unwrap();

    let rows: Vec<(&str, &str, String)> = dataset
        .records
        .iter()
        .map(|r| (r.group.as_str(), r.title.as_str(), r.start.to_string()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Finance", "Budget review", "2026-01-05".to_string()),
            ("Marketing", "Brand refresh", "2026-02-01".to_string()),
            ("Marketing", "Campaign Q2", "2026-04-01".to_string()),
        ]
    );
    assert_eq!(dataset.records[0].deliverables.as_deref(), Some("Report, slides"));
    assert_eq!(dataset.report.parse_failures(), 1);
    // Audit is the fifth data row once the padding row is counted
    assert_eq!(dataset.report.dropped[0].row, 4);

    let view = dataset.view(&ViewConfig::new());
    assert_eq!(view.status, ViewStatus::Ready);
    assert_eq!(view.boundaries, vec![0]);
    assert_eq!(view.display_height, 450);
}

#[test]
fn cached_file_source_survives_file_changes_within_ttl() {
    let file = write_csv(SHEET);
    let source = CachedSource::new(FileSource::new(file.path()), Duration::from_secs(600));
    let before = source.load_table().unwrap();

    std::fs::write(file.path(), "Bagian,Program Kerja,Mulai,Selesai\n").unwrap();
    assert_eq!(source.load_table().unwrap(), before);

    source.invalidate();
    assert!(source.load_table().unwrap().is_empty());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = FileSource::new(&path).load_table().unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
