//! Presentation policy shared by the chart renderers

use std::collections::HashMap;
use std::str::FromStr;

use proker_core::{ConfigError, TimelineView};

/// Colorblind-safe qualitative palette
pub const SAFE_PALETTE: [&str; 11] = [
    "#88CCEE", "#CC6677", "#DDCC77", "#117733", "#332288", "#AA4499", "#44AA99", "#999933",
    "#882255", "#661100", "#888888",
];

/// Soft qualitative palette
pub const PASTEL_PALETTE: [&str; 11] = [
    "#66C5CC", "#F6CF71", "#F89C74", "#DCB0F2", "#87C55F", "#9EB9F3", "#FE88B1", "#C9DB74",
    "#8BE0A4", "#B497E7", "#B3B3B3",
];

const FALLBACK_COLOR: &str = "#888888";

/// Named color palette
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Safe,
    Pastel,
}

impl Palette {
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            Palette::Safe => &SAFE_PALETTE,
            Palette::Pastel => &PASTEL_PALETTE,
        }
    }
}

impl FromStr for Palette {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(Palette::Safe),
            "pastel" => Ok(Palette::Pastel),
            _ => Err(ConfigError::InvalidValue {
                field: "palette",
                value: s.to_string(),
            }),
        }
    }
}

/// Where the group legend goes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendPosition {
    #[default]
    Bottom,
    Hidden,
}

/// Colors, shapes and fonts of a rendered timeline
#[derive(Clone, Debug)]
pub struct TimelineStyle {
    /// Bar colors, assigned to groups in display order
    pub palette: Vec<String>,
    /// Bar corner radius in pixels, capped at half the bar height
    pub corner_radius: f64,
    /// Share of the row height covered by a bar
    pub bar_fill: f64,
    pub bar_text_color: String,
    pub bar_font_size: u32,
    pub label_font_size: u32,
    pub separator_color: String,
    pub separator_width: u32,
    pub grid_color: String,
    pub row_grid_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub legend: LegendPosition,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            palette: Palette::Safe.colors().iter().map(|c| (*c).to_string()).collect(),
            corner_radius: 15.0,
            bar_fill: 0.7,
            bar_text_color: "#ffffff".into(),
            bar_font_size: 10,
            label_font_size: 11,
            separator_color: "rgba(150, 150, 150, 0.5)".into(),
            separator_width: 2,
            grid_color: "rgba(230, 230, 230, 0.6)".into(),
            row_grid_color: "rgba(240, 240, 240, 0.5)".into(),
            background_color: "#ffffff".into(),
            text_color: "#2a3f5f".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            legend: LegendPosition::Bottom,
        }
    }
}

impl TimelineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette.colors().iter().map(|c| (*c).to_string()).collect();
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    /// Color of the `index`-th group, cycling through the palette
    pub fn color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return FALLBACK_COLOR;
        }
        &self.palette[index % self.palette.len()]
    }

    /// Color per group of the view, in display order
    pub fn group_colors<'a>(&'a self, view: &'a TimelineView) -> HashMap<&'a str, &'a str> {
        view.groups()
            .into_iter()
            .enumerate()
            .map(|(i, group)| (group, self.color(i)))
            .collect()
    }
}
