//! External DITA-OT validation adapter.
//!
//! Classifies `dita validate -i <file>` by exit code only; the tool's own
//! diagnostics are passed through as the message.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl ValidationStatus {
    pub const ALL: [ValidationStatus; 2] = [ValidationStatus::Pass, ValidationStatus::Fail];

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Pass => "PASS",
            ValidationStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PASS" => Ok(ValidationStatus::Pass),
            "FAIL" => Ok(ValidationStatus::Fail),
            _ => Err(anyhow::anyhow!(
                "unknown validation status {s:?} (expected PASS or FAIL)"
            )),
        }
    }
}

/// Status plus the captured diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub status: ValidationStatus,
    pub message: String,
}

impl ValidationOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Pass,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Fail,
            message: message.into(),
        }
    }
}

/// Validate one document file. Never errors; failures become FAIL outcomes.
pub trait DocumentValidator {
    fn validate(&self, document: &Path) -> ValidationOutcome;
}

/// Runs the DITA-OT `dita` launcher.
#[derive(Debug, Clone)]
pub struct DitaOtValidator {
    executable: PathBuf,
}

impl DitaOtValidator {
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    /// Resolve the launcher: an explicit path wins, then `<dita_ot_dir>/bin/dita`,
    /// then `dita` on `PATH`. Falls back to the DITA-OT path so a missing tool
    /// is reported against the configured location.
    ///
    /// An explicit bare command name (no path separator) is looked up on
    /// `PATH` first.
    pub fn resolve(explicit: Option<&Path>, dita_ot_dir: &Path) -> Self {
        if let Some(path) = explicit {
            if is_bare_command(path) {
                if let Ok(found) = which::which(path) {
                    return Self::new(found);
                }
            }
            return Self::new(path.to_path_buf());
        }
        let bundled = dita_ot_dir.join("bin").join("dita");
        if bundled.exists() {
            return Self::new(bundled);
        }
        match which::which("dita") {
            Ok(found) => Self::new(found),
            Err(_) => Self::new(bundled),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

fn is_bare_command(path: &Path) -> bool {
    path.components().count() == 1 && path.parent() == Some(Path::new(""))
}

impl DocumentValidator for DitaOtValidator {
    fn validate(&self, document: &Path) -> ValidationOutcome {
        if !self.executable.exists() {
            return ValidationOutcome::fail(format!(
                "DITA-OT executable not found at {}",
                self.executable.display()
            ));
        }
        if !document.exists() {
            return ValidationOutcome::fail(format!(
                "DITA file not found: {}",
                document.display()
            ));
        }

        let output = match Command::new(&self.executable)
            .arg("validate")
            .arg("-i")
            .arg(document)
            .output()
        {
            Ok(output) => output,
            Err(err) => return ValidationOutcome::fail(err.to_string()),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::debug!(
            document = %document.display(),
            code = ?output.status.code(),
            "dita validate finished"
        );

        if output.status.success() {
            ValidationOutcome::pass(stdout)
        } else if stderr.is_empty() {
            ValidationOutcome::fail(stdout)
        } else {
            ValidationOutcome::fail(stderr)
        }
    }
}
