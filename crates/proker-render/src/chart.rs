//! SVG timeline chart
//!
//! One row per initiative, bars colored by group, a date axis along the top
//! and separator lines wherever the group changes.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use proker_core::{Granularity, InitiativeRecord, Quarter, RenderError, TimelineRenderer, TimelineView};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

use crate::style::{LegendPosition, TimelineStyle};
use crate::truncate;

/// A labelled position on the date axis
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    pub date: NaiveDate,
    pub label: String,
}

/// SVG timeline renderer configuration
#[derive(Clone, Debug)]
pub struct SvgTimelineRenderer {
    /// Width of the bar area in pixels
    pub chart_width: u32,
    /// Width of the initiative label column in pixels
    pub label_width: u32,
    /// Height of the axis header in pixels
    pub header_height: u32,
    /// Height reserved for the legend in pixels
    pub legend_height: u32,
    pub padding: u32,
    /// Optional heading above the chart
    pub title: Option<String>,
    pub style: TimelineStyle,
}

impl Default for SvgTimelineRenderer {
    fn default() -> Self {
        Self {
            chart_width: 900,
            label_width: 220,
            header_height: 40,
            legend_height: 36,
            padding: 10,
            title: None,
            style: TimelineStyle::default(),
        }
    }
}

/// Pixel geometry of one render
struct Layout {
    domain_start: NaiveDate,
    px_per_day: f64,
    chart_left: f64,
    chart_top: f64,
    row_height: f64,
    plot_height: f64,
}

impl Layout {
    fn x(&self, date: NaiveDate) -> f64 {
        let days = (date - self.domain_start).num_days() as f64;
        self.chart_left + days * self.px_per_day
    }

    fn row_y(&self, row: usize) -> f64 {
        self.chart_top + row as f64 * self.row_height
    }
}

impl SvgTimelineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width.max(1);
        self
    }

    /// Configure label column width
    pub fn label_width(mut self, width: u32) -> Self {
        self.label_width = width;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn style(mut self, style: TimelineStyle) -> Self {
        self.style = style;
        self
    }

    fn title_height(&self) -> u32 {
        if self.title.is_some() {
            30
        } else {
            0
        }
    }

    fn legend_space(&self) -> u32 {
        match self.style.legend {
            LegendPosition::Bottom => self.legend_height,
            LegendPosition::Hidden => 0,
        }
    }

    /// Total width of the SVG
    pub fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    /// Total height of the SVG for a view
    pub fn total_height(&self, view: &TimelineView) -> u32 {
        self.padding * 2
            + self.title_height()
            + self.header_height
            + view.display_height
            + self.legend_space()
    }

    fn layout(&self, view: &TimelineView, domain: (NaiveDate, NaiveDate)) -> Layout {
        let days = (domain.1 - domain.0).num_days().max(1) as f64;
        let plot_height = f64::from(view.display_height);
        Layout {
            domain_start: domain.0,
            px_per_day: f64::from(self.chart_width) / days,
            chart_left: f64::from(self.padding + self.label_width),
            chart_top: f64::from(self.padding + self.title_height() + self.header_height),
            row_height: plot_height / view.len().max(1) as f64,
            plot_height,
        }
    }

    fn render_header(&self, layout: &Layout, ticks: &[Tick]) -> Group {
        let mut group = Group::new().set("class", "axis");
        let axis_y = layout.chart_top;

        for tick in ticks {
            let x = layout.x(tick.date);
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", axis_y - 6.0)
                    .set("x2", x)
                    .set("y2", axis_y)
                    .set("stroke", self.style.text_color.as_str())
                    .set("stroke-width", 1),
            );
            if tick.label.is_empty() {
                continue;
            }
            group = group.add(
                Text::new(tick.label.as_str())
                    .set("x", x)
                    .set("y", axis_y - 12.0)
                    .set("font-family", self.style.font_family.as_str())
                    .set("font-size", self.style.label_font_size)
                    .set("fill", self.style.text_color.as_str())
                    .set("text-anchor", "middle"),
            );
        }

        group
    }

    fn render_grid(&self, layout: &Layout, ticks: &[Tick], rows: usize) -> Group {
        let mut group = Group::new().set("class", "grid");
        let right = layout.chart_left + f64::from(self.chart_width);
        let bottom = layout.chart_top + layout.plot_height;

        for row in 0..=rows {
            let y = layout.row_y(row);
            group = group.add(
                Line::new()
                    .set("x1", f64::from(self.padding))
                    .set("y1", y)
                    .set("x2", right)
                    .set("y2", y)
                    .set("stroke", self.style.row_grid_color.as_str())
                    .set("stroke-width", 1),
            );
        }

        for tick in ticks {
            let x = layout.x(tick.date);
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", layout.chart_top)
                    .set("x2", x)
                    .set("y2", bottom)
                    .set("stroke", self.style.grid_color.as_str())
                    .set("stroke-width", 1),
            );
        }

        group
    }

    fn render_separators(&self, layout: &Layout, boundaries: &[usize]) -> Group {
        let mut group = Group::new().set("class", "separators");
        let right = layout.chart_left + f64::from(self.chart_width);

        for &i in boundaries {
            let y = layout.row_y(i + 1);
            group = group.add(
                Line::new()
                    .set("x1", f64::from(self.padding))
                    .set("y1", y)
                    .set("x2", right)
                    .set("y2", y)
                    .set("stroke", self.style.separator_color.as_str())
                    .set("stroke-width", self.style.separator_width),
            );
        }

        group
    }

    fn render_record(&self, layout: &Layout, record: &InitiativeRecord, row: usize, color: &str) -> Group {
        let mut group = Group::new()
            .set("class", "initiative")
            .set("data-title", record.title.as_str())
            .set("data-group", record.group.as_str())
            .set("data-start", record.start.to_string())
            .set("data-end", record.end.to_string());
        if let Some(deliverables) = &record.deliverables {
            group = group.set("data-deliverables", deliverables.as_str());
        }

        let y = layout.row_y(row);
        let center_y = y + layout.row_height / 2.0;

        let label_chars = (self.label_width as usize / 7).max(4);
        group = group.add(
            Text::new(truncate(&record.title, label_chars))
                .set("x", f64::from(self.padding + self.label_width) - 8.0)
                .set("y", center_y + 4.0)
                .set("font-family", self.style.font_family.as_str())
                .set("font-size", self.style.label_font_size)
                .set("fill", self.style.text_color.as_str())
                .set("text-anchor", "end"),
        );

        let bar_height = layout.row_height * self.style.bar_fill.clamp(0.1, 1.0);
        let x_start = layout.x(record.start);
        let bar_width = (layout.x(record.bar_end()) - x_start).max(4.0);
        let radius = self.style.corner_radius.min(bar_height / 2.0).min(bar_width / 2.0);

        group = group.add(
            Rectangle::new()
                .set("x", x_start)
                .set("y", center_y - bar_height / 2.0)
                .set("width", bar_width)
                .set("height", bar_height)
                .set("rx", radius)
                .set("ry", radius)
                .set("fill", color),
        );

        // Group name inside the bar, dropped when the bar is too narrow
        let fits = (bar_width / (f64::from(self.style.bar_font_size) * 0.6)) as usize;
        if fits >= 4 {
            group = group.add(
                Text::new(truncate(&record.group, fits.saturating_sub(1)))
                    .set("x", x_start + bar_width / 2.0)
                    .set("y", center_y + f64::from(self.style.bar_font_size) / 3.0)
                    .set("font-family", self.style.font_family.as_str())
                    .set("font-size", self.style.bar_font_size)
                    .set("fill", self.style.bar_text_color.as_str())
                    .set("text-anchor", "middle"),
            );
        }

        group
    }

    fn render_legend(&self, view: &TimelineView, colors: &HashMap<&str, &str>, y: f64) -> Group {
        let mut group = Group::new().set("class", "legend");
        let box_size = 12.0;
        let char_width = f64::from(self.style.label_font_size) * 0.6;

        let groups = view.groups();
        let item_width =
            |name: &str| box_size + 6.0 + name.chars().count() as f64 * char_width + 18.0;
        let total: f64 = groups.iter().map(|g| item_width(g)).sum();
        let mut x = ((f64::from(self.total_width()) - total) / 2.0).max(f64::from(self.padding));

        for name in groups {
            let color = colors.get(name).copied().unwrap_or_else(|| self.style.color(0));
            group = group.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y - box_size + 2.0)
                    .set("width", box_size)
                    .set("height", box_size)
                    .set("rx", 2)
                    .set("fill", color),
            );
            group = group.add(
                Text::new(name)
                    .set("x", x + box_size + 6.0)
                    .set("y", y)
                    .set("font-family", self.style.font_family.as_str())
                    .set("font-size", self.style.label_font_size)
                    .set("fill", self.style.text_color.as_str()),
            );
            x += item_width(name);
        }

        group
    }

    /// Build the SVG document for a non-empty view
    pub fn document(&self, view: &TimelineView) -> Result<Document, RenderError> {
        let span = view
            .date_span()
            .ok_or_else(|| RenderError::InvalidData("No initiatives to render".into()))?;
        let domain = axis_domain(view, span)?;
        let ticks = axis_ticks(view, domain);
        let layout = self.layout(view, domain);
        let colors = self.style.group_colors(view);

        let width = self.total_width();
        let height = self.total_height(view);

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        document = document.add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", self.style.background_color.as_str()),
        );

        if let Some(title) = &self.title {
            document = document.add(
                Text::new(title.as_str())
                    .set("x", self.padding)
                    .set("y", self.padding + 18)
                    .set("font-family", self.style.font_family.as_str())
                    .set("font-size", self.style.label_font_size + 5)
                    .set("font-weight", "bold")
                    .set("fill", self.style.text_color.as_str()),
            );
        }

        document = document.add(self.render_grid(&layout, &ticks, view.len()));
        document = document.add(self.render_separators(&layout, &view.boundaries));
        document = document.add(self.render_header(&layout, &ticks));

        for (row, record) in view.records.iter().enumerate() {
            let color = colors
                .get(record.group.as_str())
                .copied()
                .unwrap_or_else(|| self.style.color(0));
            document = document.add(self.render_record(&layout, record, row, color));
        }

        if self.style.legend == LegendPosition::Bottom {
            let legend_y = layout.chart_top + layout.plot_height + f64::from(self.legend_height) / 2.0 + 6.0;
            document = document.add(self.render_legend(view, &colors, legend_y));
        }

        Ok(document)
    }
}

impl TimelineRenderer for SvgTimelineRenderer {
    type Output = String;

    fn render(&self, view: &TimelineView) -> Result<String, RenderError> {
        let document = self.document(view)?;

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

// ============================================================================
// Axis
// ============================================================================

fn month_floor(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_ceil(date: NaiveDate) -> Option<NaiveDate> {
    let floor = month_floor(date);
    if floor == date {
        Some(date)
    } else {
        floor.checked_add_months(Months::new(1))
    }
}

fn year_start(year: i32) -> Result<NaiveDate, RenderError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| RenderError::InvalidData(format!("Reference year {year} out of range")))
}

/// Date range covered by the axis.
///
/// Month-aligned around the records; the quarterly axis also always covers
/// the whole reference year.
pub fn axis_domain(
    view: &TimelineView,
    span: (NaiveDate, NaiveDate),
) -> Result<(NaiveDate, NaiveDate), RenderError> {
    let start = month_floor(span.0);
    let end = month_ceil(span.1)
        .ok_or_else(|| RenderError::InvalidData("Date range out of bounds".into()))?;

    match view.granularity {
        Granularity::Quarterly => {
            let year_begin = year_start(view.reference_year)?;
            let year_end = year_start(view.reference_year + 1)?;
            Ok((start.min(year_begin), end.max(year_end)))
        }
        Granularity::Annual | Granularity::Monthly => Ok((start, end)),
    }
}

/// Axis ticks for a view.
///
/// Quarterly views tick the quarter starts of the reference year (`Q1`..`Q4`)
/// plus an unlabelled tick closing the year. Other views tick every month
/// as `Mon YYYY`.
pub fn axis_ticks(view: &TimelineView, domain: (NaiveDate, NaiveDate)) -> Vec<Tick> {
    match view.granularity {
        Granularity::Quarterly => {
            let mut ticks: Vec<Tick> = Quarter::ALL
                .iter()
                .filter_map(|q| {
                    q.start_date(view.reference_year).map(|date| Tick {
                        date,
                        label: q.to_string(),
                    })
                })
                .collect();
            if let Ok(date) = year_start(view.reference_year + 1) {
                ticks.push(Tick {
                    date,
                    label: String::new(),
                });
            }
            ticks.retain(|t| t.date >= domain.0 && t.date <= domain.1);
            ticks
        }
        Granularity::Annual | Granularity::Monthly => {
            let mut ticks = Vec::new();
            let mut current = Some(month_floor(domain.0));
            while let Some(date) = current.filter(|d| *d <= domain.1) {
                ticks.push(Tick {
                    date,
                    label: date.format("%b %Y").to_string(),
                });
                current = date.checked_add_months(Months::new(1));
            }
            ticks
        }
    }
}
