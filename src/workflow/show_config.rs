use crate::cli::ConfigArgs;
use crate::config::{config_stub, load_config, validate_config};
use anyhow::{Context, Result};

/// Print the effective (or default) configuration as JSON.
pub fn run_config(args: &ConfigArgs) -> Result<()> {
    if args.stub {
        println!("{}", config_stub()?);
        return Ok(());
    }
    let config = load_config(args.config.as_deref())?;
    validate_config(&config)?;
    let text = serde_json::to_string_pretty(&config).context("serialize config")?;
    println!("{text}");
    Ok(())
}
