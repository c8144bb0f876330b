use crate::cli::ValidateArgs;
use crate::config::{load_config, validate_config};
use crate::validator::{DitaOtValidator, DocumentValidator, ValidationStatus};
use anyhow::{anyhow, Result};

/// Validate a single topic and print the outcome.
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dita_ot_dir) = &args.dita_ot_dir {
        config.dita_ot_dir = dita_ot_dir.clone();
    }
    if let Some(validator) = &args.validator {
        config.validator = Some(validator.clone());
    }
    validate_config(&config)?;

    let validator = DitaOtValidator::resolve(config.validator.as_deref(), &config.dita_ot_dir);
    let outcome = validator.validate(&args.file);
    println!("{}: {}", outcome.status, args.file.display());
    if !outcome.message.is_empty() {
        println!("{}", outcome.message);
    }

    match outcome.status {
        ValidationStatus::Pass => Ok(()),
        ValidationStatus::Fail => Err(anyhow!(
            "validation failed for {}",
            args.file.display()
        )),
    }
}
