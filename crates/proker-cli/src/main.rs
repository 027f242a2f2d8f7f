//! proker CLI - Program-of-Work Timeline Engine
//!
//! Command-line interface for checking, filtering, and rendering
//! spreadsheet schedules.

mod report;
mod settings;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use proker_core::{
    DateEncoding, DateOrder, Granularity, MonthLocale, PipelineConfig, Quarter, Selection,
    TimelineRenderer, TimelineView, ViewConfig,
};
use proker_ingest::{FileSource, GoogleSheetSource, HttpSource, SheetSource, StaticSource};
use proker_pipeline::{Dataset, Pipeline};
use proker_render::{
    HtmlTimelineRenderer, MermaidRenderer, Palette, SvgTimelineRenderer, TextRenderer,
    TimelineStyle,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::report::ExitCode;
use crate::settings::{parse_month, Settings, DEFAULT_SHEET_NAME};

#[derive(Parser)]
#[command(name = "proker")]
#[command(author, version, about = "Program-of-work timeline engine", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (defaults to ./proker.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a schedule and report dropped rows
    Check {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Exit with failure when any row is dropped
        #[arg(long)]
        strict: bool,
    },

    /// List the groups, quarters and months available for filtering
    Groups {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Render a filtered timeline
    Render {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Bar palette (safe, pastel)
        #[arg(long)]
        palette: Option<Palette>,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// CSV file, http(s) URL, or `-` for stdin
    #[arg(value_name = "SOURCE")]
    location: Option<String>,

    /// Google Sheets document id, used when no SOURCE is given
    #[arg(long, env = "PROKER_SHEET_ID")]
    sheet_id: Option<String>,

    /// Google Sheets tab name
    #[arg(long, value_name = "NAME")]
    sheet_name: Option<String>,
}

#[derive(Args, Debug)]
struct PipelineArgs {
    /// Read ambiguous dates as day/month/year
    #[arg(long, conflicts_with = "month_first")]
    day_first: bool,

    /// Read ambiguous dates as month/day/year
    #[arg(long)]
    month_first: bool,

    /// Date cell encoding (explicit, named-month)
    #[arg(long, value_name = "ENCODING")]
    encoding: Option<DateEncoding>,

    /// Year used for named-month dates
    #[arg(long, value_name = "YEAR")]
    reference_year: Option<i32>,

    /// Month name locale (english, indonesian)
    #[arg(long)]
    locale: Option<MonthLocale>,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Keep only these groups (repeatable)
    #[arg(short, long = "group", value_name = "GROUP")]
    groups: Vec<String>,

    /// Time granularity (annual, quarterly, monthly)
    #[arg(long)]
    view: Option<Granularity>,

    /// Keep only these quarters in the quarterly view (repeatable)
    #[arg(long = "quarter", value_name = "Q")]
    quarters: Vec<Quarter>,

    /// Keep only these months in the monthly view (repeatable)
    #[arg(long = "month", value_name = "MONTH")]
    months: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Html,
    Mermaid,
    Text,
    Json,
}

fn main() -> process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::for_error(&err).into()
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            source,
            pipeline,
            format,
            strict,
        } => {
            let source = open_source(&source, &settings)?;
            let dataset = load_dataset(source.as_ref(), pipeline.apply(settings.pipeline_config()))?;
            let name = source.describe();

            let stdout = io::stdout();
            match format {
                ReportFormat::Text => report::write_text(stdout.lock(), &name, &dataset.report)?,
                ReportFormat::Json => {
                    writeln!(stdout.lock(), "{}", report::to_json(&name, &dataset.report)?)?;
                }
            }
            Ok(ExitCode::for_report(&dataset.report, strict))
        }

        Commands::Groups { source, pipeline } => {
            let source = open_source(&source, &settings)?;
            let dataset = load_dataset(source.as_ref(), pipeline.apply(settings.pipeline_config()))?;
            report::write_options(io::stdout().lock(), &dataset)?;
            Ok(ExitCode::Success)
        }

        Commands::Render {
            source,
            pipeline,
            view,
            format,
            output,
            title,
            palette,
        } => {
            let config = pipeline.apply(settings.pipeline_config());
            let locale = config.month_locale;
            let source = open_source(&source, &settings)?;
            let dataset = load_dataset(source.as_ref(), config)?;

            let base = settings
                .view
                .view_config(locale)
                .context("invalid [view] settings")?;
            let view_config = view.apply(base, locale)?;
            let timeline = dataset.view(&view_config);
            info!(
                status = ?timeline.status,
                records = timeline.len(),
                height = timeline.display_height,
                "built view"
            );

            let palette = match palette {
                Some(p) => p,
                None => match &settings.view.palette {
                    Some(name) => name.parse().context("invalid [view] palette")?,
                    None => Palette::default(),
                },
            };
            let title = title
                .or_else(|| settings.view.title.clone())
                .unwrap_or_else(|| format!("Program Kerja {}", dataset.reference_year));
            let style = TimelineStyle::new().palette(palette);

            let rendered = render(&timeline, format, &title, style)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => io::stdout().lock().write_all(rendered.as_bytes())?,
            }
            Ok(ExitCode::Success)
        }
    }
}

fn render(view: &TimelineView, format: OutputFormat, title: &str, style: TimelineStyle) -> Result<String> {
    let rendered = match format {
        OutputFormat::Svg => SvgTimelineRenderer::new()
            .title(title)
            .style(style)
            .render(view)?,
        OutputFormat::Html => HtmlTimelineRenderer::new()
            .title(title)
            .style(style)
            .render(view)?,
        OutputFormat::Mermaid => MermaidRenderer::new().title(title).render(view)?,
        OutputFormat::Text => TextRenderer::new().with_summary().render(view)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(view)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

// ============================================================================
// Sources and configuration
// ============================================================================

fn open_source(args: &SourceArgs, settings: &Settings) -> Result<Box<dyn SheetSource>> {
    let location = args
        .location
        .clone()
        .or_else(|| settings.source.location.clone());
    let timeout = settings
        .source
        .timeout_secs
        .map_or(proker_ingest::source::DEFAULT_TIMEOUT, Duration::from_secs);

    let source: Box<dyn SheetSource> = match location.as_deref() {
        Some("-") => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("cannot read stdin")?;
            Box::new(StaticSource::new(bytes))
        }
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Box::new(HttpSource::with_timeout(url, timeout)?)
        }
        Some(path) => Box::new(FileSource::new(path)),
        None => {
            let Some(sheet_id) = args
                .sheet_id
                .clone()
                .or_else(|| settings.source.sheet_id.clone())
            else {
                bail!("no source given: pass a CSV file, a URL, or --sheet-id");
            };
            let sheet_name = args
                .sheet_name
                .clone()
                .or_else(|| settings.source.sheet_name.clone())
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
            Box::new(GoogleSheetSource::new(&sheet_id, &sheet_name)?)
        }
    };

    info!(source = %source.describe(), "opened source");
    Ok(source)
}

fn load_dataset(source: &dyn SheetSource, config: PipelineConfig) -> Result<Dataset> {
    let table = source
        .load_table()
        .with_context(|| format!("failed to load {}", source.describe()))?;
    let dataset = Pipeline::new(config)
        .run(&table)
        .with_context(|| format!("invalid schedule in {}", source.describe()))?;

    if dataset.report.dropped_count() > 0 {
        warn!(
            dropped = dataset.report.dropped_count(),
            "some rows were dropped; run `proker check` for details"
        );
    }
    Ok(dataset)
}

impl PipelineArgs {
    fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if self.day_first {
            config.date_order = DateOrder::DayFirst;
        } else if self.month_first {
            config.date_order = DateOrder::MonthFirst;
        }
        if let Some(encoding) = self.encoding {
            config.date_encoding = encoding;
        }
        if let Some(year) = self.reference_year {
            config.reference_year = year;
        }
        if let Some(locale) = self.locale {
            config.month_locale = locale;
        }
        config
    }
}

impl ViewArgs {
    fn apply(&self, mut config: ViewConfig, locale: MonthLocale) -> Result<ViewConfig> {
        if !self.groups.is_empty() {
            config.groups = Selection::only(self.groups.iter().cloned());
        }
        if let Some(granularity) = self.view {
            config.granularity = granularity;
        }
        if !self.quarters.is_empty() {
            config.quarters = Selection::only(self.quarters.iter().copied());
        }
        if !self.months.is_empty() {
            let months = self
                .months
                .iter()
                .map(|m| parse_month(m, locale))
                .collect::<Result<Vec<_>, _>>()?;
            config.months = Selection::only(months);
        }
        Ok(config)
    }
}
