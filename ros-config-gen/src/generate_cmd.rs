use anyhow::{Context, Result};
use ros_config_gen::{generate, load_input};
use ros_script_core::{render_json, render_script};
use tracing::info;

use crate::cli::{GenerateArgs, ScriptFormat};
use crate::output::write_output;

pub fn run_generate(args: GenerateArgs) -> Result<()> {
    let input = load_input(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let doc = generate(&input, args.only.into(), !args.no_shorten);

    match &args.output {
        Some(output) => {
            write_output(&doc, args.format, output, &args.input)?;
            info!(
                path = %output.display(),
                sections = doc.len(),
                "wrote generated configuration"
            );
        }
        None => match args.format {
            ScriptFormat::Script => print!("{}", render_script(&doc)),
            ScriptFormat::Json => {
                print!("{}", render_json(&doc).context("failed to serialize document")?)
            }
        },
    }

    Ok(())
}
