use super::model::{DashboardView, ReportFilter};
use super::MESSAGE_PREVIEW_CHARS;
use crate::report::AuditRow;
use crate::util::{single_line, truncate_string};
use std::fmt::Write as _;
use std::path::Path;

/// Plain-text rendering of the dashboard for pipes and `--plain`.
pub(super) fn render_text(report: &Path, rows: &[AuditRow], filter: &ReportFilter) -> String {
    let view = DashboardView::compute(rows, filter);
    let mut out = String::new();
    let _ = writeln!(out, "report: {}", report.display());
    let _ = writeln!(out, "filter: {}", filter.describe());
    let _ = writeln!(
        out,
        "total: {} | pass rate: {} | passed: {} | failed: {}",
        view.summary.total,
        view.summary.pass_rate_label(),
        view.summary.passed,
        view.summary.failed
    );
    out.push('\n');

    let id_width = view
        .rows
        .iter()
        .map(|row| row.product_id.len())
        .chain(std::iter::once("ProductID".len()))
        .max()
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<9}  {:<6}  {}",
        "ProductID", "DITAType", "Status", "FilePath"
    );
    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<9}  {:<6}  {}",
            row.product_id,
            row.kind.as_str(),
            row.status.as_str(),
            row.file_path
        );
    }
    out.push('\n');

    out.push_str("status distribution:\n");
    for (status, count) in &view.status_counts {
        let _ = writeln!(out, "  {:<4} {count}", status.as_str());
    }
    out.push_str("failures by type:\n");
    for (kind, count) in &view.failure_counts {
        let _ = writeln!(out, "  {:<9} {count}", kind.as_str());
    }
    out.push('\n');

    if view.failures.is_empty() {
        out.push_str("failures: none\n");
        return out;
    }
    out.push_str("failures:\n");
    for failure in &view.failures {
        let message = single_line(failure.message_or_placeholder());
        let _ = writeln!(
            out,
            "  {}: {}",
            failure.title(),
            truncate_string(&message, MESSAGE_PREVIEW_CHARS * 2)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::model::tests::{row, sample_rows};
    use crate::document::DocumentKind;
    use crate::validator::ValidationStatus;

    #[test]
    fn text_summary_lists_counts_and_failures() {
        let text = render_text(
            Path::new("report/quality_report.csv"),
            &sample_rows(),
            &ReportFilter::default(),
        );
        assert!(text.contains("filter: none"));
        assert!(text.contains("total: 2 | pass rate: 50.00% | passed: 1 | failed: 1"));
        assert!(text.contains("  P2 - Concept: unclosed tag"));
        assert!(!text.contains("P1 - Reference:"));
    }

    #[test]
    fn text_summary_reports_no_failures() {
        let rows = vec![row("P1", DocumentKind::Reference, ValidationStatus::Pass, "")];
        let text = render_text(Path::new("r.csv"), &rows, &ReportFilter::default());
        assert!(text.contains("pass rate: 100.00%"));
        assert!(text.ends_with("failures: none\n"));
    }
}
