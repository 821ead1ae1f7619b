use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ros_config_gen::Scope;

#[derive(Parser, Debug)]
#[command(name = "ros-config-gen")]
#[command(about = "Generate MikroTik RouterOS scripts from a router description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Generate a RouterOS script from a TOML or JSON input file.
    Generate(GenerateArgs),
    /// List the sections a generation run would produce.
    Sections(SectionsArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    pub input: PathBuf,
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ScriptFormat::Script)]
    pub format: ScriptFormat,
    #[arg(long, value_enum, default_value_t = OnlyScope::All)]
    pub only: OnlyScope,
    /// Keep blank and repeated command lines.
    #[arg(long)]
    pub no_shorten: bool,
}

#[derive(Parser, Debug)]
pub struct SectionsArgs {
    pub input: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptFormat {
    Script,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnlyScope {
    All,
    Vpn,
    Users,
    Networks,
    Tunnels,
}

impl From<OnlyScope> for Scope {
    fn from(only: OnlyScope) -> Self {
        match only {
            OnlyScope::All => Scope::All,
            OnlyScope::Vpn => Scope::Vpn,
            OnlyScope::Users => Scope::Users,
            OnlyScope::Networks => Scope::Networks,
            OnlyScope::Tunnels => Scope::Tunnels,
        }
    }
}
