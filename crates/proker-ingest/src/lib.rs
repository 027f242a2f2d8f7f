//! # proker-ingest
//!
//! Raw record ingestion for proker.
//!
//! This crate provides:
//! - CSV decoding of spreadsheet exports into a [`RawTable`]
//! - The [`SheetSource`] trait with file, HTTP and Google Sheets sources
//! - [`CachedSource`], a time-bounded cache around any source
//!
//! ## Example
//!
//! ```rust
//! use proker_ingest::{read_table, SheetSource, StaticSource};
//!
//! let csv = "Bagian,Program Kerja,Mulai,Selesai\nMktg,Launch,2026-03-01,2026-03-15\n";
//! let table = read_table(csv.as_bytes()).unwrap();
//! assert_eq!(table.headers.len(), 4);
//!
//! let source = StaticSource::new(csv);
//! assert_eq!(source.load_table().unwrap(), table);
//! ```

pub mod cache;
pub mod decode;
pub mod source;

pub use cache::{CachedSource, Clock, SystemClock, DEFAULT_TTL};
pub use decode::read_table;
pub use proker_core::RawTable;
pub use source::{FileSource, GoogleSheetSource, HttpSource, SheetSource, StaticSource};

use std::path::PathBuf;
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("Export has no header row")]
    MissingHeader,
}
