use colored::Colorize;
use ros_script_core::RouterConfig;
use serde::Serialize;

use crate::section::section_group;

/// Per-section line counts of a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub key: String,
    pub group: &'static str,
    pub lines: usize,
    pub comments: usize,
}

pub fn summarize_sections(doc: &RouterConfig) -> Vec<SectionSummary> {
    doc.iter()
        .map(|section| SectionSummary {
            key: section.key.clone(),
            group: section_group(&section.key),
            lines: section.lines.len(),
            comments: section
                .lines
                .iter()
                .filter(|l| l.trim_start().starts_with('#'))
                .count(),
        })
        .collect()
}

/// Render section summaries for terminal output.
pub fn render_section_summary(summaries: &[SectionSummary]) -> String {
    let mut out = Vec::new();
    for summary in summaries {
        let key = if summary.key.is_empty() {
            "(comments)".dimmed().to_string()
        } else if summary.key.starts_with('#') {
            summary.key.magenta().to_string()
        } else {
            summary.key.cyan().to_string()
        };
        let commands = summary.lines - summary.comments;
        out.push(format!(
            "{key} [{}] {} commands, {} comments",
            summary.group, commands, summary.comments
        ));
    }
    let total: usize = summaries.iter().map(|s| s.lines).sum();
    out.push(
        format!("{} sections, {} lines", summaries.len(), total)
            .bold()
            .to_string(),
    );
    out.join("\n")
}
