//! Dashboard state: selection, expanded failures and the active filter.

use super::model::{product_ids, DashboardView, ReportFilter};
use super::Tab;
use crate::document::DocumentKind;
use crate::report::{read_report, AuditRow};
use crate::validator::ValidationStatus;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub(super) struct App {
    pub(super) report: PathBuf,
    rows: Vec<AuditRow>,
    pub(super) filter: ReportFilter,
    pub(super) view: DashboardView,
    pub(super) tab: Tab,
    pub(super) selection: [usize; 3],
    /// Indices into `view.failures` whose detail is shown.
    pub(super) expanded: BTreeSet<usize>,
    pub(super) show_help: bool,
    pub(super) message: Option<String>,
}

impl App {
    pub(super) fn new(report: PathBuf, rows: Vec<AuditRow>, filter: ReportFilter) -> Self {
        let view = DashboardView::compute(&rows, &filter);
        Self {
            report,
            rows,
            filter,
            view,
            tab: Tab::Table,
            selection: [0; 3],
            expanded: BTreeSet::new(),
            show_help: false,
            message: None,
        }
    }

    pub(super) fn reload(&mut self) -> Result<()> {
        self.rows = read_report(&self.report)?;
        self.apply_filter();
        Ok(())
    }

    pub(super) fn next_tab(&mut self) {
        let idx = (self.tab.index() + 1) % Tab::ALL.len();
        self.tab = Tab::ALL[idx];
    }

    pub(super) fn prev_tab(&mut self) {
        let idx = if self.tab.index() == 0 {
            Tab::ALL.len() - 1
        } else {
            self.tab.index() - 1
        };
        self.tab = Tab::ALL[idx];
    }

    pub(super) fn visible_len(&self, tab: Tab) -> usize {
        match tab {
            Tab::Table => self.view.rows.len(),
            Tab::Charts => 0,
            Tab::Failures => self.view.failures.len(),
        }
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let idx = self.tab.index();
        let max = self.visible_len(self.tab);
        if max == 0 {
            self.selection[idx] = 0;
            return;
        }
        let next = self.selection[idx] as isize + delta;
        self.selection[idx] = next.clamp(0, max as isize - 1) as usize;
    }

    /// Expand or collapse the selected failure detail.
    pub(super) fn toggle_expanded(&mut self) {
        if self.tab != Tab::Failures || self.view.failures.is_empty() {
            return;
        }
        let selected = self.selection[Tab::Failures.index()];
        if !self.expanded.remove(&selected) {
            self.expanded.insert(selected);
        }
    }

    pub(super) fn cycle_status_filter(&mut self) {
        self.filter.status = cycle(self.filter.status, &ValidationStatus::ALL);
        self.apply_filter();
    }

    pub(super) fn cycle_kind_filter(&mut self) {
        self.filter.kind = cycle(self.filter.kind, &DocumentKind::ALL);
        self.apply_filter();
    }

    /// Step through single product ids; a multi-id filter is cleared.
    pub(super) fn cycle_id_filter(&mut self) {
        let ids = product_ids(&self.rows);
        let next = match self.filter.ids.as_slice() {
            [] => ids.first().cloned(),
            [current] => ids
                .iter()
                .position(|id| id == current)
                .and_then(|pos| ids.get(pos + 1))
                .cloned(),
            _ => None,
        };
        self.filter.ids = next.into_iter().collect();
        self.apply_filter();
    }

    pub(super) fn clear_filters(&mut self) {
        self.filter = ReportFilter::default();
        self.apply_filter();
    }

    pub(super) fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub(super) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    fn apply_filter(&mut self) {
        self.view = DashboardView::compute(&self.rows, &self.filter);
        self.expanded.clear();
        for tab in Tab::ALL {
            let max = self.visible_len(tab);
            let selected = &mut self.selection[tab.index()];
            *selected = (*selected).min(max.saturating_sub(1));
        }
        self.message = Some(format!("filter: {}", self.filter.describe()));
    }
}

fn cycle<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|candidate| *candidate == value)
            .and_then(|pos| all.get(pos + 1))
            .copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::model::tests::sample_rows;

    fn app() -> App {
        App::new(
            PathBuf::from("report.csv"),
            sample_rows(),
            ReportFilter::default(),
        )
    }

    #[test]
    fn status_filter_cycles_back_to_all() {
        let mut app = app();
        app.cycle_status_filter();
        assert_eq!(app.filter.status, Some(ValidationStatus::Pass));
        assert_eq!(app.view.rows.len(), 1);
        app.cycle_status_filter();
        assert_eq!(app.filter.status, Some(ValidationStatus::Fail));
        app.cycle_status_filter();
        assert_eq!(app.filter.status, None);
        assert_eq!(app.view.rows.len(), 2);
    }

    #[test]
    fn id_filter_steps_through_products() {
        let mut app = app();
        app.cycle_id_filter();
        assert_eq!(app.filter.ids, vec!["P1".to_string()]);
        app.cycle_id_filter();
        assert_eq!(app.filter.ids, vec!["P2".to_string()]);
        app.cycle_id_filter();
        assert!(app.filter.ids.is_empty());
    }

    #[test]
    fn enter_toggles_failure_detail() {
        let mut app = app();
        app.toggle_expanded();
        assert!(app.expanded.is_empty(), "only the failures tab expands");

        app.next_tab();
        app.next_tab();
        assert_eq!(app.tab, Tab::Failures);
        app.toggle_expanded();
        assert!(app.expanded.contains(&0));
        app.toggle_expanded();
        assert!(app.expanded.is_empty());
    }

    #[test]
    fn selection_is_clamped_after_filtering() {
        let mut app = app();
        app.move_selection(5);
        assert_eq!(app.selection[Tab::Table.index()], 1);
        app.cycle_kind_filter();
        assert_eq!(app.filter.kind, Some(DocumentKind::Reference));
        assert_eq!(app.selection[Tab::Table.index()], 0);
        app.clear_filters();
        assert!(app.filter.is_empty());
    }
}
