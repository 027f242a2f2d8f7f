//! MermaidJS Gantt chart renderer
//!
//! Generates text-based Gantt charts in MermaidJS format, suitable for
//! embedding in Markdown documentation, GitHub, wikis, and other platforms.
//!
//! ## Example Output
//!
//! ```text
//! gantt
//!     title Program Kerja
//!     dateFormat YYYY-MM-DD
//!     axisFormat %b %Y
//!
//!     section Mktg
//!     Launch           :t1, 2026-03-01, 15d
//!     Survey           :t2, 2026-03-20, 6d
//! ```

use proker_core::{InitiativeRecord, RenderError, TimelineRenderer, TimelineView};

/// MermaidJS Gantt chart renderer
#[derive(Clone, Debug)]
pub struct MermaidRenderer {
    pub title: String,
    /// Whether to emit one section per group
    pub show_sections: bool,
    /// Axis tick format (d3 time format string)
    pub axis_format: String,
}

impl Default for MermaidRenderer {
    fn default() -> Self {
        Self {
            title: "Program Kerja".into(),
            show_sections: true,
            axis_format: "%b %Y".into(),
        }
    }
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Disable sections grouping
    pub fn no_sections(mut self) -> Self {
        self.show_sections = false;
        self
    }

    pub fn axis_format(mut self, format: impl Into<String>) -> Self {
        self.axis_format = format.into();
        self
    }

    /// Sanitize a name for Mermaid (escape special characters)
    fn sanitize_name(name: &str) -> String {
        // Mermaid is sensitive to colons and special chars in task names
        name.replace(':', "-")
            .replace(';', "-")
            .replace('#', "")
            .replace('\n', " ")
            .replace('\r', "")
    }

    fn format_task_line(id: usize, record: &InitiativeRecord) -> String {
        format!(
            "{} :t{}, {}, {}d",
            Self::sanitize_name(&record.title),
            id,
            record.start.format("%Y-%m-%d"),
            record.duration_days()
        )
    }
}

impl TimelineRenderer for MermaidRenderer {
    type Output = String;

    fn render(&self, view: &TimelineView) -> Result<String, RenderError> {
        if view.is_empty() {
            return Err(RenderError::InvalidData("No initiatives to render".into()));
        }

        let mut output = String::new();

        // Header
        output.push_str("gantt\n");
        output.push_str(&format!("    title {}\n", Self::sanitize_name(&self.title)));
        output.push_str("    dateFormat YYYY-MM-DD\n");
        output.push_str(&format!("    axisFormat {}\n", self.axis_format));
        output.push('\n');

        if self.show_sections {
            for section in &view.sections {
                output.push_str(&format!("    section {}\n", Self::sanitize_name(&section.group)));
                for row in section.start..section.end {
                    let line = Self::format_task_line(row + 1, &view.records[row]);
                    output.push_str(&format!("    {}\n", line));
                }
                output.push('\n');
            }
        } else {
            for (row, record) in view.records.iter().enumerate() {
                output.push_str(&format!("    {}\n", Self::format_task_line(row + 1, record)));
            }
        }

        Ok(output)
    }
}
