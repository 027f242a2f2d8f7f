//! Standalone HTML timeline page
//!
//! Wraps the SVG chart with a heading, hover tooltips showing deliverables
//! and a detail table. Unlike the bare chart, an empty view still renders:
//! the page shows a notice in place of the chart.

use proker_core::{RenderError, TimelineRenderer, TimelineView, ViewStatus};

use crate::chart::SvgTimelineRenderer;
use crate::style::TimelineStyle;
use crate::{html_escape, NO_DATA_NOTICE, NO_MATCHES_NOTICE};

/// Interactive HTML timeline renderer
#[derive(Clone, Debug)]
pub struct HtmlTimelineRenderer {
    pub title: String,
    /// Include the detail table under the chart
    pub show_table: bool,
    pub chart: SvgTimelineRenderer,
}

impl Default for HtmlTimelineRenderer {
    fn default() -> Self {
        Self {
            title: "Program Kerja Timeline".into(),
            show_table: true,
            chart: SvgTimelineRenderer::default(),
        }
    }
}

impl HtmlTimelineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn hide_table(mut self) -> Self {
        self.show_table = false;
        self
    }

    pub fn style(mut self, style: TimelineStyle) -> Self {
        self.chart.style = style;
        self
    }

    fn generate_table(&self, view: &TimelineView) -> String {
        let mut rows = String::new();
        for (i, record) in view.records.iter().enumerate() {
            let class = if view.boundaries.contains(&i) {
                r#" class="group-end""#
            } else {
                ""
            };
            rows.push_str(&format!(
                "                <tr{class}><td>{title}</td><td>{group}</td><td>{start}</td><td>{end}</td></tr>\n",
                class = class,
                title = html_escape(&record.title),
                group = html_escape(&record.group),
                start = record.start,
                end = record.end,
            ));
        }

        format!(
            r#"        <details class="detail-table" open>
            <summary>Detail</summary>
            <table>
                <thead><tr><th>Program Kerja</th><th>Bagian</th><th>Mulai</th><th>Selesai</th></tr></thead>
                <tbody>
{rows}                </tbody>
            </table>
        </details>
"#
        )
    }

    fn generate_css(&self) -> String {
        let style = &self.chart.style;
        format!(
            r#"        :root {{
            --bg-color: {bg};
            --text-color: {text};
            --separator-color: {separator};
        }}
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: {font};
            background: var(--bg-color);
            color: var(--text-color);
            padding: 20px;
        }}
        h1 {{
            font-size: 1.5rem;
            font-weight: 600;
            margin-bottom: 16px;
        }}
        .timeline-wrapper {{
            overflow-x: auto;
        }}
        .initiative {{
            cursor: default;
            transition: opacity 0.2s;
        }}
        .initiative:hover {{
            opacity: 0.8;
        }}
        .notice {{
            padding: 12px 16px;
            border-radius: 6px;
            background: #fff4e5;
            color: #8a5300;
        }}
        .detail-table {{
            margin-top: 16px;
            font-size: 13px;
        }}
        .detail-table summary {{
            cursor: pointer;
            font-weight: 600;
            margin-bottom: 8px;
        }}
        .detail-table table {{
            border-collapse: collapse;
            width: 100%;
        }}
        .detail-table th, .detail-table td {{
            text-align: left;
            padding: 4px 8px;
            border-bottom: 1px solid rgba(128,128,128,0.2);
        }}
        .detail-table tr.group-end td {{
            border-bottom: 2px solid var(--separator-color);
        }}
        .tooltip {{
            position: fixed;
            background: rgba(0,0,0,0.9);
            color: white;
            padding: 12px;
            border-radius: 6px;
            font-size: 13px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.2s;
            z-index: 1000;
            max-width: 320px;
        }}
        .tooltip.visible {{
            opacity: 1;
        }}
        .tooltip .name {{
            font-weight: 600;
            margin-bottom: 6px;
        }}
        .tooltip .dates {{
            color: #aaa;
        }}"#,
            bg = style.background_color,
            text = style.text_color,
            separator = style.separator_color,
            font = style.font_family,
        )
    }

    fn generate_js(&self) -> &'static str {
        r#"        const tooltip = document.getElementById('tooltip');

        function line(cls, text) {
            const div = document.createElement('div');
            div.className = cls;
            div.textContent = text;
            return div;
        }

        document.querySelectorAll('.initiative').forEach(bar => {
            bar.addEventListener('mouseenter', () => {
                tooltip.replaceChildren(
                    line('name', bar.dataset.title),
                    line('group', bar.dataset.group),
                    line('dates', bar.dataset.start + ' → ' + bar.dataset.end)
                );
                if (bar.dataset.deliverables) {
                    tooltip.appendChild(line('deliverables', bar.dataset.deliverables));
                }
                tooltip.classList.add('visible');
            });

            bar.addEventListener('mousemove', (e) => {
                tooltip.style.left = (e.clientX + 15) + 'px';
                tooltip.style.top = (e.clientY + 15) + 'px';
            });

            bar.addEventListener('mouseleave', () => {
                tooltip.classList.remove('visible');
            });
        });"#
    }

    fn generate_html(&self, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="timeline-container">
        <h1>{title}</h1>
{body}        <div id="tooltip" class="tooltip"></div>
    </div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(&self.title),
            css = self.generate_css(),
            body = body,
            js = self.generate_js(),
        )
    }
}

impl TimelineRenderer for HtmlTimelineRenderer {
    type Output = String;

    fn render(&self, view: &TimelineView) -> Result<String, RenderError> {
        let body = match view.status {
            ViewStatus::NoData => format!("        <p class=\"notice\">{NO_DATA_NOTICE}</p>\n"),
            ViewStatus::NoMatches => format!("        <p class=\"notice\">{NO_MATCHES_NOTICE}</p>\n"),
            ViewStatus::Ready => {
                let svg = self.chart.render(view)?;
                let mut body = format!("        <div class=\"timeline-wrapper\">\n{svg}\n        </div>\n");
                if self.show_table {
                    body.push_str(&self.generate_table(view));
                }
                body
            }
        };

        Ok(self.generate_html(&body))
    }
}
