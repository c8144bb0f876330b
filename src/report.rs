//! Quality report rows and their CSV persistence.
//!
//! The report is rewritten in full on every run; rows are never appended to a
//! previous report.
use crate::document::DocumentKind;
use crate::validator::{ValidationOutcome, ValidationStatus};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// Validation outcome for one (product, document kind) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRow {
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "DITAType")]
    pub kind: DocumentKind,
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "ValidationStatus")]
    pub status: ValidationStatus,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: String,
}

impl AuditRow {
    pub fn new(
        product_id: &str,
        kind: DocumentKind,
        file_path: &Path,
        outcome: ValidationOutcome,
    ) -> Self {
        Self {
            product_id: product_id.to_string(),
            kind,
            file_path: file_path.display().to_string(),
            status: outcome.status,
            error_message: outcome.message,
        }
    }
}

/// Write all rows to `path`, replacing any existing report.
pub fn write_report(path: &Path, rows: &[AuditRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report dir {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create report {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    if rows.is_empty() {
        writer
            .write_record(REPORT_COLUMNS)
            .context("write report header")?;
    }
    for row in rows {
        writer.serialize(row).context("write report row")?;
    }
    writer
        .flush()
        .with_context(|| format!("flush report {}", path.display()))?;
    Ok(())
}

/// Read a report written by [`write_report`].
pub fn read_report(path: &Path) -> Result<Vec<AuditRow>> {
    let file = File::open(path).with_context(|| format!("open report {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for (row_idx, result) in reader.deserialize().enumerate() {
        let row: AuditRow =
            result.with_context(|| format!("parse report row {}", row_idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

const REPORT_COLUMNS: [&str; 5] = [
    "ProductID",
    "DITAType",
    "FilePath",
    "ValidationStatus",
    "ErrorMessage",
];
