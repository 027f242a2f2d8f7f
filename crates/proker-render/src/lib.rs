//! # proker-render
//!
//! Rendering backends for proker timelines.
//!
//! This crate provides:
//! - SVG timeline chart rendering
//! - Standalone HTML pages (chart, tooltips, detail table)
//! - MermaidJS Gantt chart rendering (for Markdown/docs)
//! - Plain text tables
//!
//! Every renderer implements [`TimelineRenderer`] over a filtered
//! [`TimelineView`](proker_core::TimelineView). Colors, corner radius,
//! separators and legend placement come from a [`TimelineStyle`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use proker_core::{TimelineRenderer, ViewConfig};
//! use proker_render::{HtmlTimelineRenderer, MermaidRenderer, SvgTimelineRenderer};
//!
//! let view = dataset.view(&ViewConfig::new());
//!
//! // Pure SVG output
//! let svg = SvgTimelineRenderer::new().render(&view)?;
//!
//! // Interactive HTML page
//! let html = HtmlTimelineRenderer::new().title("Program Kerja 2026").render(&view)?;
//!
//! // MermaidJS for Markdown/documentation
//! let mermaid = MermaidRenderer::new().render(&view)?;
//! ```

pub mod chart;
pub mod html;
pub mod mermaid;
pub mod style;
pub mod text;

pub use chart::{axis_domain, axis_ticks, SvgTimelineRenderer, Tick};
pub use html::HtmlTimelineRenderer;
pub use mermaid::MermaidRenderer;
pub use proker_core::TimelineRenderer;
pub use style::{LegendPosition, Palette, TimelineStyle, PASTEL_PALETTE, SAFE_PALETTE};
pub use text::TextRenderer;

/// Notice shown when the filter leaves nothing to draw
pub const NO_MATCHES_NOTICE: &str = "No initiatives match the selected filters.";

/// Notice shown when nothing was loaded
pub const NO_DATA_NOTICE: &str = "No data loaded.";

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate a string to `max` characters with an ellipsis
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_works() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & \"b\""), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Short", 20), "Short");
        assert_eq!(truncate("Rekrutmen karyawan baru", 10), "Rekrutmen…");
        assert_eq!(truncate("Évaluation", 10), "Évaluation");
    }
}
