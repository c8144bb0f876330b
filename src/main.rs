//! DITA factory: product table in, validated DITA topics and a quality
//! report out.
use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod dashboard;
mod document;
mod lm;
mod pipeline;
mod records;
mod report;
mod util;
mod validator;
mod workflow;

fn main() -> Result<()> {
    let args = cli::RootArgs::parse();
    init_tracing(args.command.verbose());
    match args.command {
        cli::Command::Run(args) => workflow::run_factory(&args),
        cli::Command::Validate(args) => workflow::run_validate(&args),
        cli::Command::Dashboard(args) => dashboard::run(&args),
        cli::Command::Config(args) => workflow::run_config(&args),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
