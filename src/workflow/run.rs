//! The `dfac run` command: generate, validate and report.
//!
//! Configuration problems abort before any document is written.
use crate::cli::RunArgs;
use crate::config::{
    api_key_from_env, load_config, resolve_lm_command, validate_config, FactoryConfig,
    GeneratorBackend,
};
use crate::lm::build_generator;
use crate::pipeline::{Pipeline, PipelineOptions};
use crate::records::load_records;
use crate::report::write_report;
use crate::util::display_path;
use crate::validator::{DitaOtValidator, ValidationStatus};
use anyhow::{anyhow, Result};

/// Run the full generation and validation pipeline.
pub fn run_factory(args: &RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    validate_config(&config)?;

    println!("--- Starting DITA factory ---");

    let api_key = match config.generator.backend {
        GeneratorBackend::Gemini => Some(api_key_from_env()?),
        GeneratorBackend::Command => None,
    };
    if !config.input.is_file() {
        return Err(anyhow!(
            "input table not found: {}",
            config.input.display()
        ));
    }
    let records = load_records(&config.input)?;
    let generator = build_generator(&config.generator, api_key.as_deref())?;
    let validator = DitaOtValidator::resolve(config.validator.as_deref(), &config.dita_ot_dir);
    if !validator.executable().exists() {
        tracing::warn!(
            path = %validator.executable().display(),
            "validator not found; every document will be reported as FAIL"
        );
    }

    println!(
        "Found {} products. Starting generation and validation...",
        records.len()
    );

    let options = PipelineOptions {
        output_dir: config.output_dir.clone(),
        schemas: config.schemas(),
        call_delay: config.call_delay(),
    };
    let rows = Pipeline::new(&options, generator.as_ref(), &validator).run(&records)?;
    write_report(&config.report, &rows)?;

    let passed = rows
        .iter()
        .filter(|row| row.status == ValidationStatus::Pass)
        .count();
    let report = display_path(&config.report, std::env::current_dir().ok().as_deref());
    println!(
        "Wrote quality report to {report} ({} documents: {passed} passed, {} failed)",
        rows.len(),
        rows.len() - passed
    );
    println!("Next: dfac dashboard --report {report}");
    Ok(())
}

fn apply_overrides(config: &mut FactoryConfig, args: &RunArgs) {
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(report) = &args.report {
        config.report = report.clone();
    }
    if let Some(dita_ot_dir) = &args.dita_ot_dir {
        config.dita_ot_dir = dita_ot_dir.clone();
    }
    if let Some(validator) = &args.validator {
        config.validator = Some(validator.clone());
    }
    if let Some(backend) = args.generator {
        config.generator.backend = backend;
    }
    if let Some(model) = &args.model {
        config.generator.model = model.clone();
    }
    if let Some(delay_ms) = args.delay_ms {
        config.call_delay_ms = delay_ms;
    }
    config.generator.command =
        resolve_lm_command(args.lm.as_deref(), config.generator.command.as_deref());
}
