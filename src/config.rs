//! Factory configuration: defaults, optional config file and validation.
//!
//! Resolution order is built-in defaults, then a JSON config file, then CLI
//! flags; credentials only ever come from the environment.
use crate::document::SchemaPaths;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Config file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "dita-factory.json";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const LM_COMMAND_ENV: &str = "DITA_FACTORY_LM_COMMAND";

const API_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorBackend {
    /// Gemini REST API (needs GEMINI_API_KEY)
    Gemini,
    /// Local command reading the prompt on stdin
    Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub backend: GeneratorBackend,
    pub model: String,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: GeneratorBackend::Gemini,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            command: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    pub schema_version: u32,
    /// Input product table.
    pub input: PathBuf,
    /// Directory receiving generated topics.
    pub output_dir: PathBuf,
    /// Quality report path.
    pub report: PathBuf,
    pub reference_dtd: String,
    pub concept_dtd: String,
    pub dita_ot_dir: PathBuf,
    /// Explicit validator launcher, overriding `dita_ot_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator: Option<PathBuf>,
    /// Pause between the reference and concept step of each product.
    pub call_delay_ms: u64,
    pub generator: GeneratorConfig,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        default_config()
    }
}

impl FactoryConfig {
    pub fn schemas(&self) -> SchemaPaths {
        SchemaPaths {
            reference_dtd: self.reference_dtd.clone(),
            concept_dtd: self.concept_dtd.clone(),
        }
    }

    pub fn call_delay(&self) -> Duration {
        Duration::from_millis(self.call_delay_ms)
    }
}

/// Build the default config matching the conventional project layout.
pub fn default_config() -> FactoryConfig {
    FactoryConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        input: PathBuf::from("product_specs.csv"),
        output_dir: PathBuf::from("dita_output"),
        report: PathBuf::from("report").join("quality_report.csv"),
        reference_dtd: "dtds/dtd/technicalContent/dtd/reference.dtd".to_string(),
        concept_dtd: "dtds/dtd/technicalContent/dtd/concept.dtd".to_string(),
        dita_ot_dir: PathBuf::from("dita-ot-4.3.2"),
        validator: None,
        call_delay_ms: 1000,
        generator: GeneratorConfig::default(),
    }
}

/// Render a pretty JSON config stub for new projects.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&default_config()).context("serialize config stub")
}

/// Locate the config file: explicit path, then the working directory, then
/// the user config dir. `None` means defaults apply.
pub fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(anyhow!("config file not found: {}", path.display()));
        }
        return Ok(Some(path.to_path_buf()));
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }
    let user = dirs::config_dir().map(|dir| dir.join("dita-factory").join("config.json"));
    Ok(user.filter(|path| path.is_file()))
}

/// Load the config file, or defaults when none is found.
///
/// Callers apply CLI overrides and then run [`validate_config`].
pub fn load_config(explicit: Option<&Path>) -> Result<FactoryConfig> {
    match find_config_file(explicit)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            read_config(&path)
        }
        None => Ok(default_config()),
    }
}

pub fn read_config(path: &Path) -> Result<FactoryConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse config {}", path.display()))
}

/// Validate schema version and required settings.
pub fn validate_config(config: &FactoryConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    for (label, path) in [
        ("input", &config.input),
        ("output_dir", &config.output_dir),
        ("report", &config.report),
        ("dita_ot_dir", &config.dita_ot_dir),
    ] {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("{label} must be non-empty"));
        }
    }
    if config.reference_dtd.trim().is_empty() || config.concept_dtd.trim().is_empty() {
        return Err(anyhow!("reference_dtd and concept_dtd must be non-empty"));
    }
    match config.generator.backend {
        GeneratorBackend::Gemini => {
            if config.generator.model.trim().is_empty() {
                return Err(anyhow!("generator.model must be non-empty"));
            }
            if config.generator.endpoint.trim().is_empty() {
                return Err(anyhow!("generator.endpoint must be non-empty"));
            }
        }
        GeneratorBackend::Command => {
            let has_command = config
                .generator
                .command
                .as_deref()
                .is_some_and(|command| !command.trim().is_empty());
            if !has_command {
                return Err(anyhow!(
                    "generator.command must be set for the command backend (or set {LM_COMMAND_ENV})"
                ));
            }
        }
    }
    Ok(())
}

/// Resolve LM command with fallback: explicit arg > config > env var.
/// A blank layer falls through to the next one.
pub fn resolve_lm_command(explicit: Option<&str>, configured: Option<&str>) -> Option<String> {
    let present = |s: &&str| !s.trim().is_empty();
    explicit
        .filter(present)
        .or(configured.filter(present))
        .map(|s| s.to_string())
        .or_else(|| {
            std::env::var(LM_COMMAND_ENV)
                .ok()
                .filter(|s| !s.trim().is_empty())
        })
}

/// Read the generator credential from the environment.
pub fn api_key_from_env() -> Result<String> {
    check_api_key(std::env::var(API_KEY_ENV).ok())
}

/// Reject missing, blank or placeholder credentials.
pub fn check_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() && !key.contains(API_KEY_PLACEHOLDER) => Ok(key),
        _ => Err(anyhow!(
            "Gemini API key is not set; export {API_KEY_ENV} (or use --generator command)"
        )),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
