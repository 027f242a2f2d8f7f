//! Suppliers of raw spreadsheet exports
//!
//! A [`SheetSource`] only hands back bytes. Decoding is shared through
//! [`SheetSource::load_table`], and caching is layered on top with
//! [`crate::CachedSource`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use proker_core::RawTable;
use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{info, warn};

use crate::decode::read_table;
use crate::IngestError;

/// Request timeout for HTTP sources
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("proker/", env!("CARGO_PKG_VERSION"));

/// Supplier of raw tabular bytes
pub trait SheetSource {
    /// Fetch the raw export
    fn fetch(&self) -> Result<Vec<u8>, IngestError>;

    /// Short description for logs and messages
    fn describe(&self) -> String;

    /// Fetch and decode the export
    fn load_table(&self) -> Result<RawTable, IngestError> {
        read_table(&self.fetch()?)
    }
}

impl<S: SheetSource + ?Sized> SheetSource for Box<S> {
    fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// ============================================================================
// File
// ============================================================================

/// A CSV export on disk
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        std::fs::read(&self.path).map_err(|source| IngestError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Bytes already in memory (stdin, tests)
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    bytes: Vec<u8>,
}

impl StaticSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl SheetSource for StaticSource {
    fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.bytes.len())
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// A CSV export served over HTTP(S)
#[derive(Clone, Debug)]
pub struct HttpSource {
    url: Url,
    client: Client,
}

impl HttpSource {
    /// Create a source with the default timeout
    pub fn new(url: &str) -> Result<Self, IngestError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, IngestError> {
        let url = parse_http_url(url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

fn parse_http_url(url: &str) -> Result<Url, IngestError> {
    let parsed = Url::parse(url).map_err(|e| IngestError::InvalidSource(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(IngestError::InvalidSource(format!(
            "{url}: unsupported scheme '{other}'"
        ))),
    }
}

impl SheetSource for HttpSource {
    fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        info!(url = %self.url, "fetching sheet export");
        let response = self.client.get(self.url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "sheet export request failed");
            return Err(IngestError::Status {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

// ============================================================================
// Google Sheets
// ============================================================================

/// The CSV export of one tab of a Google Sheets document.
///
/// The document must be shared as "anyone with the link".
#[derive(Clone, Debug)]
pub struct GoogleSheetSource {
    sheet_id: String,
    sheet_name: String,
    http: HttpSource,
}

impl GoogleSheetSource {
    pub fn new(sheet_id: &str, sheet_name: &str) -> Result<Self, IngestError> {
        let url = export_url(sheet_id, sheet_name)?;
        Ok(Self {
            sheet_id: sheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
            http: HttpSource::new(url.as_str())?,
        })
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn url(&self) -> &str {
        self.http.url()
    }
}

/// Build the `gviz` CSV export URL for a sheet tab.
///
/// The tab name is percent-encoded into the query string.
pub fn export_url(sheet_id: &str, sheet_name: &str) -> Result<Url, IngestError> {
    let valid_id = !sheet_id.is_empty()
        && sheet_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_id {
        return Err(IngestError::InvalidSource(format!(
            "invalid spreadsheet id '{sheet_id}'"
        )));
    }
    if sheet_name.trim().is_empty() {
        return Err(IngestError::InvalidSource("empty sheet name".into()));
    }

    let mut url = Url::parse(&format!(
        "https://docs.google.com/spreadsheets/d/{sheet_id}/gviz/tq"
    ))
    .map_err(|e| IngestError::InvalidSource(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("tqx", "out:csv")
        .append_pair("sheet", sheet_name);
    Ok(url)
}

impl SheetSource for GoogleSheetSource {
    fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        self.http.fetch()
    }

    fn describe(&self) -> String {
        format!("Google Sheet {} / {}", self.sheet_id, self.sheet_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn export_url_encodes_sheet_name() {
        let url = export_url("17PUXVz1fWFAQlAnNt02BkFPuQFbiBI5uFAOEtZUMluU", "Master Card 6").unwrap();
        assert_eq!(url.host_str(), Some("docs.google.com"));
        assert_eq!(
            url.path(),
            "/spreadsheets/d/17PUXVz1fWFAQlAnNt02BkFPuQFbiBI5uFAOEtZUMluU/gviz/tq"
        );
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("tqx".to_string(), "out:csv".to_string()),
                ("sheet".to_string(), "Master Card 6".to_string()),
            ]
        );
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn export_url_rejects_bad_ids() {
        assert!(export_url("", "Master").is_err());
        assert!(export_url("abc/../def", "Master").is_err());
        assert!(export_url("abc", "  ").is_err());
    }

    #[test]
    fn http_source_rejects_other_schemes() {
        assert!(matches!(
            HttpSource::new("ftp://example.com/data.csv"),
            Err(IngestError::InvalidSource(_))
        ));
        assert!(matches!(
            HttpSource::new("not a url"),
            Err(IngestError::InvalidSource(_))
        ));
        let source = HttpSource::new("https://example.com/data.csv").unwrap();
        assert_eq!(source.url(), "https://example.com/data.csv");
    }

    #[test]
    fn file_source_reads_export() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Bagian,Program Kerja,Mulai,Selesai").unwrap();
        writeln!(file, "HR,Hiring,2026-01-01,2026-02-01").unwrap();

        let source = FileSource::new(file.path());
        let table = source.load_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].cell("Program Kerja"), "Hiring");
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/path/schedule.csv");
        assert!(matches!(source.fetch(), Err(IngestError::Io { .. })));
    }

    #[test]
    fn boxed_sources_delegate() {
        let source: Box<dyn SheetSource> = Box::new(StaticSource::new("a\n1\n"));
        assert_eq!(source.fetch().unwrap(), b"a\n1\n".to_vec());
        assert!(source.describe().contains("4 bytes"));
        assert_eq!(source.load_table().unwrap().len(), 1);
    }
}
