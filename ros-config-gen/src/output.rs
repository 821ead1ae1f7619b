//! Writing generated documents to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ros_script_core::{render_json, write_file, RouterConfig};

use crate::cli::ScriptFormat;

/// Check `output` against the input file and the chosen format, then write.
pub fn write_output(
    doc: &RouterConfig,
    format: ScriptFormat,
    output: &Path,
    input: &Path,
) -> Result<()> {
    check_output_target(output, input, format)?;
    match format {
        ScriptFormat::Script => write_file(doc, output)
            .with_context(|| format!("failed to write {}", output.display()))?,
        ScriptFormat::Json => {
            let json = render_json(doc).context("failed to serialize document")?;
            fs::write(output, json)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
    }
    Ok(())
}

/// Refuse targets that would clobber the router description or that
/// carry an extension belonging to the other output format.
pub fn check_output_target(output: &Path, input: &Path, format: ScriptFormat) -> Result<()> {
    let target = resolve_target(output)?;
    let source = input
        .canonicalize()
        .with_context(|| format!("canonicalize {}", input.display()))?;
    if target == source {
        bail!(
            "refusing to overwrite input file {} with generated output",
            input.display()
        );
    }

    let extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match (format, extension.as_deref()) {
        (ScriptFormat::Script, Some(ext @ ("toml" | "json"))) => bail!(
            "refusing to write a RouterOS script to {}: .{ext} is an input format, use --format json or an .rsc file",
            output.display()
        ),
        (ScriptFormat::Json, Some("rsc")) => bail!(
            "refusing to write JSON to script file {}",
            output.display()
        ),
        _ => Ok(()),
    }
}

/// Absolute form of `output`. A file that does not exist yet is resolved
/// through its parent directory, which must exist.
fn resolve_target(output: &Path) -> Result<PathBuf> {
    if output.exists() {
        return output
            .canonicalize()
            .with_context(|| format!("canonicalize {}", output.display()));
    }
    let name = output
        .file_name()
        .with_context(|| format!("output path {} has no file name", output.display()))?;
    let parent = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let dir = parent
        .canonicalize()
        .with_context(|| format!("output directory {} does not exist", parent.display()))?;
    Ok(dir.join(name))
}
