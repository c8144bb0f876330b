//! Local LM command backend.
//!
//! Invokes a user-configured command with the prompt on stdin and takes
//! stdout as the response (e.g. `llm`, `ollama run`, custom scripts).
use super::TextGenerator;
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct CommandGenerator {
    argv: Vec<String>,
}

impl CommandGenerator {
    /// Parse `command` with shell quoting rules.
    pub fn new(command: &str) -> Result<Self> {
        let argv =
            shell_words::split(command).with_context(|| format!("parse LM command: {command}"))?;
        if argv.is_empty() {
            return Err(anyhow!("LM command is empty"));
        }
        Ok(Self { argv })
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        let mut child = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn LM command: {}", self.argv[0]))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .context("write prompt to LM stdin")?;
        }

        let output = child.wait_with_output().context("wait for LM command")?;

        tracing::info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            prompt_bytes = prompt.len(),
            response_bytes = output.stdout.len(),
            "lm invoke complete"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "LM command failed with status {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        String::from_utf8(output.stdout).context("decode LM stdout as UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        assert!(CommandGenerator::new("   ").is_err());
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(CommandGenerator::new("llm \"unterminated").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn prompt_round_trips_through_cat() {
        let generator = CommandGenerator::new("cat").unwrap();
        assert_eq!(generator.generate("<p>echo</p>").unwrap(), "<p>echo</p>");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_stderr() {
        let generator = CommandGenerator::new("sh -c 'cat >/dev/null; echo boom >&2; exit 3'").unwrap();
        let err = generator.generate("prompt").unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let generator = CommandGenerator::new("definitely-not-a-real-lm-binary").unwrap();
        let err = generator.generate("prompt").unwrap_err();
        assert!(err.to_string().contains("spawn LM command"));
    }
}
