//! Calendar classifier: quarter and month buckets of a start date.

use chrono::{Datelike, NaiveDate};
use proker_core::{month_name, Quarter, MONTHS};

/// Calendar buckets of one date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Buckets {
    pub quarter: Quarter,
    /// Full English month name
    pub month_name: &'static str,
}

/// Classify a date into its quarter and month buckets
pub fn classify(date: NaiveDate) -> Buckets {
    Buckets {
        quarter: Quarter::of(date),
        month_name: month_name(MONTHS[date.month0() as usize]),
    }
}
