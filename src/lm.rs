//! Text generation backends for narrative summaries.
//!
//! The pipeline only sees [`TextGenerator`]; the backend is chosen from the
//! resolved configuration.
mod command;
mod gemini;

pub use command::CommandGenerator;
pub use gemini::GeminiClient;

use crate::config::{GeneratorBackend, GeneratorConfig};
use anyhow::{anyhow, Result};

/// Submit a prompt, receive free-form text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the configured generator.
///
/// `api_key` is required for the Gemini backend and ignored otherwise.
pub fn build_generator(
    config: &GeneratorConfig,
    api_key: Option<&str>,
) -> Result<Box<dyn TextGenerator>> {
    match config.backend {
        GeneratorBackend::Gemini => {
            let api_key =
                api_key.ok_or_else(|| anyhow!("gemini backend requires an API key"))?;
            Ok(Box::new(GeminiClient::new(
                &config.endpoint,
                &config.model,
                api_key,
            )))
        }
        GeneratorBackend::Command => {
            let command = config
                .command
                .as_deref()
                .ok_or_else(|| anyhow!("command backend requires an LM command"))?;
            Ok(Box::new(CommandGenerator::new(command)?))
        }
    }
}
