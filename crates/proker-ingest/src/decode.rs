//! CSV decoding of spreadsheet exports

use csv::ReaderBuilder;
use proker_core::RawTable;
use tracing::debug;

use crate::IngestError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode a CSV export into a raw table.
///
/// The first record is the header. Ragged rows are accepted: short rows read
/// as empty trailing cells. Rows whose cells are all blank are skipped, as
/// spreadsheet exports pad the sheet with them. Kept rows retain their
/// zero-based data row position as `RawRow::index`.
pub fn read_table(bytes: &[u8]) -> Result<RawTable, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestError::MissingHeader);
    }

    let mut table = RawTable::new(headers.iter());
    let mut blank = 0usize;
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            blank += 1;
            continue;
        }
        table.push_record_at(index, record.iter());
    }

    debug!(
        columns = table.headers.len(),
        rows = table.len(),
        blank_rows = blank,
        "decoded CSV export"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_header_and_rows() {
        let csv = "Bagian,Program Kerja,Mulai,Selesai\nMktg,Launch,2026-03-01,2026-03-15\n,Survey,2026-03-20,2026-03-25\n";
        let table = read_table(csv.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Bagian", "Program Kerja", "Mulai", "Selesai"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].cell("Bagian"), "");
        assert_eq!(table.rows[1].cell("Program Kerja"), "Survey");
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let csv = "Bagian,Program Kerja,Output / Deliverables\nOps,\"Audit, internal\",\"Report\nand slides\"\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].cell("Program Kerja"), "Audit, internal");
        assert_eq!(table.rows[0].cell("Output / Deliverables"), "Report\nand slides");
    }

    #[test]
    fn strips_bom_and_keeps_header_whitespace() {
        let csv = "\u{feff}Bagian , Mulai\nHR,2026-01-01\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Bagian ", " Mulai"]);
        assert_eq!(table.rows[0].cell("Bagian "), "HR");
    }

    #[test]
    fn ragged_rows_are_padded() {
        let csv = "a,b,c\n1\n1,2,3,4\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].cell("c"), "");
        assert_eq!(table.rows[1].cell("c"), "3");
    }

    #[test]
    fn blank_rows_are_skipped() {
        let csv = "a,b\n1,2\n,\n , \n3,4\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].cell("a"), "3");
        assert_eq!(table.rows[1].index, 3);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(read_table(b""), Err(IngestError::MissingHeader)));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let bytes = b"a,b\n\xff\xfe,1\n";
        assert!(matches!(read_table(bytes), Err(IngestError::Csv(_))));
    }
}
