//! Read-only quality report dashboard.
//!
//! | Tab | Content |
//! |-----|---------|
//! | Table | Filtered report rows |
//! | Charts | Status distribution and failures per document type |
//! | Failures | Expandable detail for each failing row |
//!
//! Falls back to a plain-text summary when stdout or stdin is not a terminal.
mod app;
mod model;
mod terminal;
mod text;
mod ui;
mod view;

use crate::cli::DashboardArgs;
use crate::config::load_config;
use crate::report::read_report;
use anyhow::{anyhow, Result};
use model::ReportFilter;
use std::io::{self, IsTerminal};

const EVENT_POLL_MS: u64 = 200;
const MESSAGE_PREVIEW_CHARS: usize = 80;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tab {
    Table,
    Charts,
    Failures,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Table, Tab::Charts, Tab::Failures];

    fn index(self) -> usize {
        match self {
            Tab::Table => 0,
            Tab::Charts => 1,
            Tab::Failures => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Table => "Table",
            Tab::Charts => "Charts",
            Tab::Failures => "Failures",
        }
    }
}

/// Show the report at `--report`, or at the configured report path.
pub fn run(args: &DashboardArgs) -> Result<()> {
    let report = match &args.report {
        Some(report) => report.clone(),
        None => load_config(args.config.as_deref())?.report,
    };
    if !report.is_file() {
        return Err(anyhow!(
            "report not found at {}; run `dfac run` first",
            report.display()
        ));
    }
    let rows = read_report(&report)?;
    let filter = ReportFilter {
        status: args.status,
        kind: args.kind,
        ids: args.ids.clone(),
    };
    if args.plain || !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        print!("{}", text::render_text(&report, &rows, &filter));
        return Ok(());
    }
    ui::run_tui(report, rows, filter)
}
