//! Per-record generation and validation loop.
//!
//! Every record produces a reference and a concept topic, each validated and
//! recorded as one audit row. Only I/O errors abort the run.
use crate::document::{build_concept, build_reference, write_document, Document, SchemaPaths};
use crate::lm::TextGenerator;
use crate::records::ProductRecord;
use crate::report::AuditRow;
use crate::validator::DocumentValidator;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

pub struct PipelineOptions {
    pub output_dir: PathBuf,
    pub schemas: SchemaPaths,
    /// Pause before each generator call.
    pub call_delay: Duration,
}

pub struct Pipeline<'a> {
    options: &'a PipelineOptions,
    generator: &'a dyn TextGenerator,
    validator: &'a dyn DocumentValidator,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        options: &'a PipelineOptions,
        generator: &'a dyn TextGenerator,
        validator: &'a dyn DocumentValidator,
    ) -> Self {
        Self {
            options,
            generator,
            validator,
        }
    }

    /// Process records in input order, returning two rows per record.
    pub fn run(&self, records: &[ProductRecord]) -> Result<Vec<AuditRow>> {
        fs::create_dir_all(&self.options.output_dir).with_context(|| {
            format!(
                "create output dir {}",
                self.options.output_dir.display()
            )
        })?;

        let mut rows = Vec::with_capacity(records.len() * 2);
        for record in records {
            tracing::info!(product = record.id(), "processing product");
            rows.push(self.process(record, build_reference)?);

            if !self.options.call_delay.is_zero() {
                thread::sleep(self.options.call_delay);
            }

            rows.push(self.process(record, |record| {
                build_concept(record, self.generator)
            })?);
        }
        Ok(rows)
    }

    /// Build, persist, validate and record one document.
    fn process<F>(&self, record: &ProductRecord, build: F) -> Result<AuditRow>
    where
        F: FnOnce(&ProductRecord) -> Document,
    {
        let document = build(record);
        let path = write_document(
            &self.options.output_dir,
            record.id(),
            &document,
            &self.options.schemas,
        )?;
        let outcome = self.validator.validate(&path);
        tracing::info!(
            product = record.id(),
            kind = %document.kind,
            status = %outcome.status,
            path = %path.display(),
            "validated document"
        );
        Ok(AuditRow::new(record.id(), document.kind, &path, outcome))
    }
}
