use anyhow::{Context, Result};
use ros_config_gen::report::{render_section_summary, summarize_sections};
use ros_config_gen::{generate, load_input, Scope};

use crate::cli::{OutputFormat, SectionsArgs};

pub fn run_sections(args: SectionsArgs) -> Result<()> {
    let input = load_input(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let doc = generate(&input, Scope::All, true);
    let summaries = summarize_sections(&doc);

    match args.format {
        OutputFormat::Text => println!("{}", render_section_summary(&summaries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }

    Ok(())
}
