//! CLI argument parsing for the DITA factory.
//!
//! The CLI stays thin: it collects overrides and hands them to the workflow
//! and dashboard modules.
use crate::config::GeneratorBackend;
use crate::document::DocumentKind;
use crate::validator::ValidationStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "dfac",
    version,
    about = "Generate, validate and report on DITA topics for product data",
    after_help = "Commands:\n  run                      Generate topics, validate them and write the quality report\n  validate --file <path>   Validate a single topic with DITA-OT\n  dashboard                Browse the quality report\n  config                   Print the effective configuration\n\nExamples:\n  GEMINI_API_KEY=... dfac run --input product_specs.csv\n  dfac run --generator command --lm 'ollama run llama3'\n  dfac dashboard --status fail\n  dfac config --stub > dita-factory.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Run(RunArgs),
    Validate(ValidateArgs),
    Dashboard(DashboardArgs),
    Config(ConfigArgs),
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Run(args) => args.verbose,
            Command::Validate(args) => args.verbose,
            Command::Dashboard(_) | Command::Config(_) => false,
        }
    }
}

/// Run command inputs; every flag overrides the config file.
#[derive(Parser, Debug)]
#[command(about = "Generate topics, validate them and write the quality report")]
pub struct RunArgs {
    /// Config file (defaults to ./dita-factory.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Input product table (CSV)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory for generated topics
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Quality report output path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// DITA-OT installation directory
    #[arg(long, value_name = "DIR")]
    pub dita_ot_dir: Option<PathBuf>,

    /// Validator launcher, overriding the DITA-OT directory
    #[arg(long, value_name = "PATH")]
    pub validator: Option<PathBuf>,

    /// Text generation backend
    #[arg(long, value_enum)]
    pub generator: Option<GeneratorBackend>,

    /// LM command for the command backend (prompt on stdin)
    #[arg(long, value_name = "CMD")]
    pub lm: Option<String>,

    /// Model name for the Gemini backend
    #[arg(long)]
    pub model: Option<String>,

    /// Pause between the reference and concept step of each product
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Emit debug logging
    #[arg(long)]
    pub verbose: bool,
}

/// Validate command inputs for checking one topic.
#[derive(Parser, Debug)]
#[command(about = "Validate a single topic with DITA-OT")]
pub struct ValidateArgs {
    /// Topic to validate
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Config file (defaults to ./dita-factory.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// DITA-OT installation directory
    #[arg(long, value_name = "DIR")]
    pub dita_ot_dir: Option<PathBuf>,

    /// Validator launcher, overriding the DITA-OT directory
    #[arg(long, value_name = "PATH")]
    pub validator: Option<PathBuf>,

    /// Emit debug logging
    #[arg(long)]
    pub verbose: bool,
}

/// Dashboard inputs; filters seed the interactive view.
#[derive(Parser, Debug)]
#[command(about = "Browse the quality report")]
pub struct DashboardArgs {
    /// Config file (defaults to ./dita-factory.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quality report to read (defaults to the configured report path)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Only show rows with this status (pass or fail)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<ValidationStatus>,

    /// Only show rows of this document type (reference or concept)
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<DocumentKind>,

    /// Only show these product IDs (repeatable)
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// Print a text summary instead of the interactive view
    #[arg(long)]
    pub plain: bool,
}

/// Config command inputs.
#[derive(Parser, Debug)]
#[command(about = "Print the effective configuration as JSON")]
pub struct ConfigArgs {
    /// Config file (defaults to ./dita-factory.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the default config instead of the effective one
    #[arg(long)]
    pub stub: bool,
}

fn parse_status(raw: &str) -> Result<ValidationStatus, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}

fn parse_kind(raw: &str) -> Result<DocumentKind, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}
