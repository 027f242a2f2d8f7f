//! Plain-text table for console output

use proker_core::{RenderError, TimelineRenderer, TimelineView, ViewStatus};

use crate::{NO_DATA_NOTICE, NO_MATCHES_NOTICE};

const HEADERS: [&str; 6] = ["Group", "Initiative", "Start", "End", "Quarter", "Month"];

/// Aligned table with a rule wherever the group changes
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    /// Append a summary line with the record count and display height
    pub show_summary: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(mut self) -> Self {
        self.show_summary = true;
        self
    }
}

impl TimelineRenderer for TextRenderer {
    type Output = String;

    fn render(&self, view: &TimelineView) -> Result<String, RenderError> {
        match view.status {
            ViewStatus::NoData => return Ok(format!("{NO_DATA_NOTICE}\n")),
            ViewStatus::NoMatches => return Ok(format!("{NO_MATCHES_NOTICE}\n")),
            ViewStatus::Ready => {}
        }

        let rows: Vec<[String; 6]> = view
            .records
            .iter()
            .map(|r| {
                [
                    r.group.clone(),
                    r.title.clone(),
                    r.start.to_string(),
                    r.end.to_string(),
                    r.quarter.to_string(),
                    r.month_name.clone(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_row = |cells: &[&str]| -> String {
            let line: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect();
            format!("{}\n", line.join("  ").trim_end())
        };
        let rule = format!("{}\n", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

        let mut output = format_row(&HEADERS);
        output.push_str(&rule);
        for (i, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            output.push_str(&format_row(&cells));
            if view.boundaries.contains(&i) {
                output.push_str(&rule);
            }
        }

        if self.show_summary {
            output.push_str(&format!(
                "\n{} initiatives in {} groups, {} view, height {}px\n",
                view.len(),
                view.groups().len(),
                view.granularity,
                view.display_height
            ));
        }

        Ok(output)
    }
}
