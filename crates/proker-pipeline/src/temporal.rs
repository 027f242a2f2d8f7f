//! Temporal parser
//!
//! Turns start/end cells into calendar dates under one parse policy per run.
//!
//! Two encodings are supported:
//! - **Explicit**: the cell is a date. Ambiguous numeric dates (`06/01/2026`)
//!   are resolved by the configured [`DateOrder`], never guessed per cell.
//! - **Named month**: the cell is a full month name. The start is day 1 and
//!   the end day 28 of that month in the reference year.
//!
//! Failures come back as [`ParseFailure`] values; nothing here panics.

use chrono::NaiveDate;
use proker_core::{
    DateEncoding, DateOrder, MonthLocale, ParseFailure, ParseFailureKind, PipelineConfig,
};

/// Day of month used as the synthetic end of a named month
pub const NAMED_MONTH_END_DAY: u32 = 28;

/// Textual layouts tried after the numeric ones. `%B` also accepts
/// abbreviated month names.
const TEXT_FORMATS: &[&str] = &["%d %B %Y", "%B %d, %Y", "%B %d %Y", "%d-%B-%Y"];

/// Date parser configured for one pipeline run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateParser {
    pub order: DateOrder,
    pub encoding: DateEncoding,
    pub reference_year: i32,
    pub locale: MonthLocale,
}

impl DateParser {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            order: config.date_order,
            encoding: config.date_encoding,
            reference_year: config.reference_year,
            locale: config.month_locale,
        }
    }

    /// Parse a start cell
    pub fn parse_start(&self, cell: &str) -> Result<NaiveDate, ParseFailure> {
        match self.encoding {
            DateEncoding::Explicit => parse_explicit(cell, self.order),
            DateEncoding::NamedMonth => {
                parse_named_month(cell, self.locale, self.reference_year).map(|(start, _)| start)
            }
        }
    }

    /// Parse an end cell
    pub fn parse_end(&self, cell: &str) -> Result<NaiveDate, ParseFailure> {
        match self.encoding {
            DateEncoding::Explicit => parse_explicit(cell, self.order),
            DateEncoding::NamedMonth => {
                parse_named_month(cell, self.locale, self.reference_year).map(|(_, end)| end)
            }
        }
    }
}

/// Parse a month name into its synthetic `(start, end)` pair
pub fn parse_named_month(
    cell: &str,
    locale: MonthLocale,
    year: i32,
) -> Result<(NaiveDate, NaiveDate), ParseFailure> {
    let text = cell.trim();
    if text.is_empty() {
        return Err(ParseFailure::new(cell, ParseFailureKind::Empty));
    }

    let month = locale
        .parse(text)
        .ok_or_else(|| ParseFailure::new(cell, ParseFailureKind::UnknownMonth))?
        .number_from_month();

    let start = NaiveDate::from_ymd_opt(year, month, 1);
    let end = NaiveDate::from_ymd_opt(year, month, NAMED_MONTH_END_DAY);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(ParseFailure::new(cell, ParseFailureKind::InvalidDate)),
    }
}

/// Parse an explicit date cell
pub fn parse_explicit(cell: &str, order: DateOrder) -> Result<NaiveDate, ParseFailure> {
    let text = cell.trim();
    if text.is_empty() {
        return Err(ParseFailure::new(cell, ParseFailureKind::Empty));
    }

    let date_part = strip_time(text);
    if let Some(fields) = numeric_fields(date_part) {
        return from_numeric_fields(fields, order)
            .ok_or_else(|| ParseFailure::new(cell, ParseFailureKind::InvalidDate));
    }

    TEXT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| ParseFailure::new(cell, ParseFailureKind::UnrecognizedFormat))
}

/// Drop a trailing time component such as ` 00:00:00` or `T08:30`
fn strip_time(text: &str) -> &str {
    match text.split_once([' ', 'T']) {
        Some((head, tail))
            if tail.contains(':')
                && !head.is_empty()
                && head.chars().all(|c| c.is_ascii_digit() || is_separator(c)) =>
        {
            head
        }
        _ => text,
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '/' | '-' | '.')
}

/// Split `a<sep>b<sep>c` into three digit runs sharing one separator
fn numeric_fields(text: &str) -> Option<[&str; 3]> {
    let sep = text.chars().find(|c| !c.is_ascii_digit())?;
    if !is_separator(sep) {
        return None;
    }

    let mut parts = text.split(sep);
    let fields = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    let all_digits = fields
        .iter()
        .all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()));
    all_digits.then_some(fields)
}

fn from_numeric_fields([a, b, c]: [&str; 3], order: DateOrder) -> Option<NaiveDate> {
    // Year-first is unambiguous and ignores the day/month policy
    if a.len() == 4 {
        return NaiveDate::from_ymd_opt(a.parse().ok()?, b.parse().ok()?, c.parse().ok()?);
    }

    let year = match c.len() {
        4 => c.parse().ok()?,
        2 => 2000 + c.parse::<i32>().ok()?,
        _ => return None,
    };
    let (a, b): (u32, u32) = (a.parse().ok()?, b.parse().ok()?);
    let (day, month) = match order {
        DateOrder::DayFirst => (a, b),
        DateOrder::MonthFirst => (b, a),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn ambiguous_date_follows_policy() {
        assert_eq!(
            parse_explicit("06/01/2026", DateOrder::DayFirst).unwrap(),
            date(2026, 1, 6)
        );
        assert_eq!(
            parse_explicit("06/01/2026", DateOrder::MonthFirst).unwrap(),
            date(2026, 6, 1)
        );
    }

    #[test]
    fn policy_is_not_overridden_per_cell() {
        // 15 cannot be a month, but the parser does not swap fields to rescue it
        let err = parse_explicit("15/03/2026", DateOrder::MonthFirst).unwrap_err();
        assert_eq!(err.kind, ParseFailureKind::InvalidDate);
        assert_eq!(
            parse_explicit("15/03/2026", DateOrder::DayFirst).unwrap(),
            date(2026, 3, 15)
        );
    }

    #[test]
    fn iso_dates_ignore_policy() {
        for order in [DateOrder::DayFirst, DateOrder::MonthFirst] {
            assert_eq!(parse_explicit("2026-03-01", order).unwrap(), date(2026, 3, 1));
            assert_eq!(parse_explicit("2026/12/31", order).unwrap(), date(2026, 12, 31));
        }
    }

    #[test]
    fn separators_and_short_years() {
        assert_eq!(
            parse_explicit("01-03-2026", DateOrder::DayFirst).unwrap(),
            date(2026, 3, 1)
        );
        assert_eq!(
            parse_explicit("01.03.26", DateOrder::DayFirst).unwrap(),
            date(2026, 3, 1)
        );
        assert_eq!(
            parse_explicit("3/1/26", DateOrder::MonthFirst).unwrap(),
            date(2026, 3, 1)
        );
    }

    #[test]
    fn mixed_separators_are_rejected() {
        let err = parse_explicit("01/03-2026", DateOrder::DayFirst).unwrap_err();
        assert_eq!(err.kind, ParseFailureKind::UnrecognizedFormat);
    }

    #[test]
    fn trailing_time_is_ignored() {
        assert_eq!(
            parse_explicit("2026-03-01 00:00:00", DateOrder::MonthFirst).unwrap(),
            date(2026, 3, 1)
        );
        assert_eq!(
            parse_explicit("2026-03-01T08:30", DateOrder::MonthFirst).unwrap(),
            date(2026, 3, 1)
        );
        assert_eq!(
            parse_explicit("03/01/2026 10:00", DateOrder::MonthFirst).unwrap(),
            date(2026, 3, 1)
        );
    }

    #[test]
    fn textual_dates() {
        let order = DateOrder::MonthFirst;
        assert_eq!(parse_explicit("1 March 2026", order).unwrap(), date(2026, 3, 1));
        assert_eq!(parse_explicit("March 1, 2026", order).unwrap(), date(2026, 3, 1));
        assert_eq!(parse_explicit("1 Mar 2026", order).unwrap(), date(2026, 3, 1));
        assert_eq!(parse_explicit("OCTOBER 5, 2026", order).unwrap(), date(2026, 10, 5));
    }

    #[test]
    fn invalid_calendar_day() {
        let err = parse_explicit("31/02/2026", DateOrder::DayFirst).unwrap_err();
        assert_eq!(err.kind, ParseFailureKind::InvalidDate);
        assert_eq!(err.value, "31/02/2026");
    }

    #[test]
    fn empty_and_garbage_cells() {
        assert_eq!(
            parse_explicit("   ", DateOrder::DayFirst).unwrap_err().kind,
            ParseFailureKind::Empty
        );
        assert_eq!(
            parse_explicit("TBD", DateOrder::DayFirst).unwrap_err().kind,
            ParseFailureKind::UnrecognizedFormat
        );
        assert_eq!(
            parse_explicit("1/2/3/4", DateOrder::DayFirst).unwrap_err().kind,
            ParseFailureKind::UnrecognizedFormat
        );
        assert_eq!(
            parse_explicit("1/2/123", DateOrder::DayFirst).unwrap_err().kind,
            ParseFailureKind::InvalidDate
        );
    }

    #[test]
    fn named_month_maps_to_first_and_28th() {
        let (start, end) = parse_named_month("Juni", MonthLocale::Indonesian, 2026).unwrap();
        assert_eq!(start, date(2026, 6, 1));
        assert_eq!(end, date(2026, 6, 28));

        let (start, end) = parse_named_month("february", MonthLocale::English, 2027).unwrap();
        assert_eq!(start, date(2027, 2, 1));
        assert_eq!(end, date(2027, 2, 28));
    }

    #[test]
    fn named_month_rejects_other_locale_and_dates() {
        assert_eq!(
            parse_named_month("June", MonthLocale::Indonesian, 2026).unwrap_err().kind,
            ParseFailureKind::UnknownMonth
        );
        assert_eq!(
            parse_named_month("2026-06-01", MonthLocale::English, 2026).unwrap_err().kind,
            ParseFailureKind::UnknownMonth
        );
        assert_eq!(
            parse_named_month("", MonthLocale::English, 2026).unwrap_err().kind,
            ParseFailureKind::Empty
        );
    }

    #[test]
    fn parser_dispatches_on_encoding() {
        let config = PipelineConfig::new()
            .encoding(DateEncoding::NamedMonth)
            .locale(MonthLocale::Indonesian)
            .reference_year(2026);
        let parser = DateParser::new(&config);
        assert_eq!(parser.parse_start("Maret").unwrap(), date(2026, 3, 1));
        assert_eq!(parser.parse_end("Mei").unwrap(), date(2026, 5, 28));
        assert!(parser.parse_start("2026-03-01").is_err());

        let parser = DateParser::new(&PipelineConfig::new().day_first(true));
        assert_eq!(parser.parse_start("06/01/2026").unwrap(), date(2026, 1, 6));
        assert_eq!(parser.parse_end("Maret").unwrap_err().kind, ParseFailureKind::UnrecognizedFormat);
    }
}
