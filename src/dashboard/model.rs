//! Filter and summary computations over report rows.
//!
//! Everything here is a pure function of (rows, filter); both the text output
//! and the interactive view render a [`DashboardView`].
use crate::document::DocumentKind;
use crate::report::AuditRow;
use crate::validator::ValidationStatus;

pub(crate) const NO_MESSAGE_PLACEHOLDER: &str = "No error message recorded.";

/// Row selection; an empty `ids` list matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ReportFilter {
    pub(crate) status: Option<ValidationStatus>,
    pub(crate) kind: Option<DocumentKind>,
    pub(crate) ids: Vec<String>,
}

impl ReportFilter {
    pub(crate) fn matches(&self, row: &AuditRow) -> bool {
        self.status.is_none_or(|status| row.status == status)
            && self.kind.is_none_or(|kind| row.kind == kind)
            && (self.ids.is_empty() || self.ids.iter().any(|id| *id == row.product_id))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.status.is_none() && self.kind.is_none() && self.ids.is_empty()
    }

    /// Short label such as `status=FAIL kind=Concept`.
    pub(crate) fn describe(&self) -> String {
        if self.is_empty() {
            return "none".to_string();
        }
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("status={status}"));
        }
        if let Some(kind) = self.kind {
            parts.push(format!("kind={kind}"));
        }
        if !self.ids.is_empty() {
            parts.push(format!("id={}", self.ids.join(",")));
        }
        parts.join(" ")
    }
}

pub(crate) fn filter_rows<'a>(rows: &'a [AuditRow], filter: &ReportFilter) -> Vec<&'a AuditRow> {
    rows.iter().filter(|row| filter.matches(row)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ReportSummary {
    pub(crate) total: usize,
    pub(crate) passed: usize,
    pub(crate) failed: usize,
}

impl ReportSummary {
    pub(crate) fn from_rows(rows: &[&AuditRow]) -> Self {
        let passed = rows
            .iter()
            .filter(|row| row.status == ValidationStatus::Pass)
            .count();
        Self {
            total: rows.len(),
            passed,
            failed: rows.len() - passed,
        }
    }

    /// Percentage of passing rows; zero for an empty selection.
    pub(crate) fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 * 100.0 / self.total as f64
    }

    pub(crate) fn pass_rate_label(&self) -> String {
        format!("{:.2}%", self.pass_rate())
    }
}

/// Row count per status, in `ValidationStatus::ALL` order.
pub(crate) fn status_distribution(rows: &[&AuditRow]) -> Vec<(ValidationStatus, usize)> {
    ValidationStatus::ALL
        .iter()
        .map(|status| {
            let count = rows.iter().filter(|row| row.status == *status).count();
            (*status, count)
        })
        .collect()
}

/// Failing row count per document kind, in `DocumentKind::ALL` order.
pub(crate) fn failures_by_kind(rows: &[&AuditRow]) -> Vec<(DocumentKind, usize)> {
    DocumentKind::ALL
        .iter()
        .map(|kind| {
            let count = rows
                .iter()
                .filter(|row| row.kind == *kind && row.status == ValidationStatus::Fail)
                .count();
            (*kind, count)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FailureDetail {
    pub(crate) product_id: String,
    pub(crate) kind: DocumentKind,
    pub(crate) file_path: String,
    pub(crate) message: String,
}

impl FailureDetail {
    fn from_row(row: &AuditRow) -> Self {
        Self {
            product_id: row.product_id.clone(),
            kind: row.kind,
            file_path: row.file_path.clone(),
            message: row.error_message.clone(),
        }
    }

    pub(crate) fn title(&self) -> String {
        format!("{} - {}", self.product_id, self.kind)
    }

    pub(crate) fn message_or_placeholder(&self) -> &str {
        if self.message.trim().is_empty() {
            NO_MESSAGE_PLACEHOLDER
        } else {
            &self.message
        }
    }
}

/// Everything the dashboard shows for one filter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DashboardView {
    pub(crate) rows: Vec<AuditRow>,
    pub(crate) summary: ReportSummary,
    pub(crate) status_counts: Vec<(ValidationStatus, usize)>,
    pub(crate) failure_counts: Vec<(DocumentKind, usize)>,
    pub(crate) failures: Vec<FailureDetail>,
}

impl DashboardView {
    pub(crate) fn compute(rows: &[AuditRow], filter: &ReportFilter) -> Self {
        let selected = filter_rows(rows, filter);
        let failures = selected
            .iter()
            .filter(|row| row.status == ValidationStatus::Fail)
            .map(|row| FailureDetail::from_row(row))
            .collect();
        Self {
            summary: ReportSummary::from_rows(&selected),
            status_counts: status_distribution(&selected),
            failure_counts: failures_by_kind(&selected),
            failures,
            rows: selected.into_iter().cloned().collect(),
        }
    }
}

/// Distinct product identifiers in first-seen order.
pub(crate) fn product_ids(rows: &[AuditRow]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for row in rows {
        if !ids.contains(&row.product_id) {
            ids.push(row.product_id.clone());
        }
    }
    ids
}
