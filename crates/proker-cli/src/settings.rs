//! `proker.toml` settings
//!
//! Every key is optional. Command-line flags override file values, which
//! override the library defaults.
//!
//! ```toml
//! [source]
//! sheet_id = "17PUXVz1fWFAQlAnNt02BkFPuQFbiBI5uFAOEtZUMluU"
//! sheet_name = "Master"
//!
//! [pipeline]
//! date_order = "day-first"
//! date_encoding = "named-month"
//! month_locale = "indonesian"
//! reference_year = 2026
//!
//! [columns]
//! group = "Bagian"
//!
//! [view]
//! granularity = "quarterly"
//! quarters = ["Q1", "Q2"]
//! palette = "safe"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Month;
use proker_core::{
    month_from_number, ColumnMap, ConfigError, DateEncoding, DateOrder, Granularity,
    MonthLocale, PipelineConfig, Quarter, Selection, ViewConfig,
};
use serde::Deserialize;
use tracing::info;

/// File read when `--config` is not given and the file exists
pub const DEFAULT_SETTINGS_FILE: &str = "proker.toml";

/// Sheet tab used when only a sheet id is configured
pub const DEFAULT_SHEET_NAME: &str = "Master";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub source: SourceSettings,
    pub pipeline: PipelineSettings,
    pub columns: Option<ColumnMap>,
    pub view: ViewSettings,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSettings {
    /// CSV file path or http(s) URL
    pub location: Option<String>,
    pub sheet_id: Option<String>,
    pub sheet_name: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSettings {
    pub date_order: Option<DateOrder>,
    pub date_encoding: Option<DateEncoding>,
    pub reference_year: Option<i32>,
    pub month_locale: Option<MonthLocale>,
}

/// File form of [`ViewConfig`]
///
/// Months may be written in the configured locale, so selections are kept
/// as strings here and resolved once the locale is known.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSettings {
    pub groups: Option<Vec<String>>,
    pub granularity: Option<Granularity>,
    pub quarters: Option<Vec<String>>,
    pub months: Option<Vec<String>>,
    pub palette: Option<String>,
    pub title: Option<String>,
}

impl Settings {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid settings")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("in {}", path.display()))
    }

    /// Load an explicit settings file, or `proker.toml` when present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_SETTINGS_FILE).exists() => {
                info!("using settings from {}", DEFAULT_SETTINGS_FILE);
                Self::from_file(Path::new(DEFAULT_SETTINGS_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// Pipeline configuration from the file, before command-line overrides
    pub fn pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        let p = &self.pipeline;
        PipelineConfig {
            date_order: p.date_order.unwrap_or(defaults.date_order),
            date_encoding: p.date_encoding.unwrap_or(defaults.date_encoding),
            reference_year: p.reference_year.unwrap_or(defaults.reference_year),
            month_locale: p.month_locale.unwrap_or(defaults.month_locale),
            columns: self.columns.clone().unwrap_or(defaults.columns),
        }
    }
}

impl ViewSettings {
    /// View configuration from the file, before command-line overrides
    pub fn view_config(&self, locale: MonthLocale) -> Result<ViewConfig, ConfigError> {
        let quarters = match &self.quarters {
            Some(values) => Selection::Only(
                values
                    .iter()
                    .map(|q| q.parse::<Quarter>())
                    .collect::<Result<_, _>>()?,
            ),
            None => Selection::All,
        };
        let months = match &self.months {
            Some(values) => Selection::Only(
                values
                    .iter()
                    .map(|m| parse_month(m, locale))
                    .collect::<Result<_, _>>()?,
            ),
            None => Selection::All,
        };

        Ok(ViewConfig {
            groups: self
                .groups
                .clone()
                .map_or(Selection::All, Selection::Only),
            granularity: self.granularity.unwrap_or_default(),
            quarters,
            months,
        })
    }
}

/// Parse a month given as an English name, a name in `locale`, or a number
pub fn parse_month(value: &str, locale: MonthLocale) -> Result<Month, ConfigError> {
    MonthLocale::English
        .parse(value)
        .or_else(|| locale.parse(value))
        .or_else(|| value.trim().parse::<u32>().ok().and_then(month_from_number))
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "month",
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.pipeline_config(), PipelineConfig::default());
        assert_eq!(
            settings.view.view_config(MonthLocale::English).unwrap(),
            ViewConfig::default()
        );
    }

    #[test]
    fn full_file() {
        let settings = Settings::from_toml(
            r#"
            [source]
            sheet_id = "abc123"
            sheet_name = "Master Card 6"

            [pipeline]
            date_order = "day-first"
            date_encoding = "named-month"
            month_locale = "indonesian"
            reference_year = 2027

            [columns]
            group = "Divisi"

            [view]
            groups = ["Mktg"]
            granularity = "monthly"
            months = ["Maret", "april", "12"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.source.sheet_name.as_deref(), Some("Master Card 6"));

        let config = settings.pipeline_config();
        assert_eq!(config.date_order, DateOrder::DayFirst);
        assert_eq!(config.date_encoding, DateEncoding::NamedMonth);
        assert_eq!(config.reference_year, 2027);
        assert_eq!(config.columns.group, "Divisi");
        assert_eq!(config.columns.title, "Program Kerja");

        let view = settings.view.view_config(config.month_locale).unwrap();
        assert_eq!(view.granularity, Granularity::Monthly);
        assert_eq!(view.groups, Selection::Only(vec!["Mktg".to_string()]));
        assert_eq!(
            view.months,
            Selection::Only(vec![Month::March, Month::April, Month::December])
        );
        assert!(view.quarters.is_all());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("[pipeline]\nday_first = true\n").is_err());
    }

    #[test]
    fn bad_quarter_is_reported() {
        let settings = Settings::from_toml("[view]\nquarters = [\"Q5\"]\n").unwrap();
        let err = settings.view.view_config(MonthLocale::English).unwrap_err();
        assert!(err.to_string().contains("Q5"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = Settings::from_file(Path::new("/nonexistent/proker.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/proker.toml"));
    }
}
