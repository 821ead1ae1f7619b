use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::document::{RouterConfig, COMMENT_SECTION};

/// Errors that can occur while writing a rendered document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize the document as JSON.
    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to write output file.
    #[error("failed to write script file: {0}")]
    Io(#[from] std::io::Error),
}

/// Flatten a document into RouterOS script text.
///
/// Each non-empty section prints its key followed by its lines; the
/// comment section prints its lines only. Sections are separated by a
/// blank line.
pub fn render_script(doc: &RouterConfig) -> String {
    let mut blocks = Vec::with_capacity(doc.len());
    for section in doc {
        if section.lines.is_empty() {
            continue;
        }
        let mut block = Vec::with_capacity(section.lines.len() + 1);
        if section.key != COMMENT_SECTION {
            block.push(section.key.as_str());
        }
        block.extend(section.lines.iter().map(String::as_str));
        blocks.push(block.join("\n"));
    }
    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Serialize a document as a pretty JSON object keyed by section.
pub fn render_json(doc: &RouterConfig) -> Result<String, WriteError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Render `doc` as script text and write it to `path`.
pub fn write_file(doc: &RouterConfig, path: &Path) -> Result<(), WriteError> {
    fs::write(path, render_script(doc))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::render_script;
    use crate::document::RouterConfig;

    #[test]
    fn comment_section_has_no_header_line() {
        let doc = RouterConfig::from_sections([
            ("", vec!["# generated"]),
            ("/ip pool", vec!["add name=p ranges=10.0.0.2-10.0.0.254"]),
            ("/ip route", vec![]),
        ]);

        assert_eq!(
            render_script(&doc),
            "# generated\n\n/ip pool\nadd name=p ranges=10.0.0.2-10.0.0.254\n"
        );
    }

    #[test]
    fn empty_document_renders_empty() {
        assert_eq!(render_script(&RouterConfig::new()), "");
    }
}
