use super::app::App;
use super::{Tab, MESSAGE_PREVIEW_CHARS};
use crate::document::DocumentKind;
use crate::util::{display_path, single_line, truncate_string};
use crate::validator::ValidationStatus;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph,
    Row, Table, TableState, Tabs, Wrap,
};
use ratatui::Frame;

impl App {
    pub(super) fn draw(&self, frame: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.draw_header(frame, layout[0]);
        self.draw_tabs(frame, layout[1]);
        match self.tab {
            Tab::Table => self.draw_table(frame, layout[2]),
            Tab::Charts => self.draw_charts(frame, layout[2]),
            Tab::Failures => self.draw_failures(frame, layout[2]),
        }
        self.draw_footer(frame, layout[3]);

        if self.show_help {
            self.draw_help(frame);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let summary = self.view.summary;
        let report = display_path(&self.report, std::env::current_dir().ok().as_deref());
        let line1 = Line::from(vec![
            Span::raw("DITA quality report: "),
            Span::styled(report, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" | Filter: "),
            Span::raw(self.filter.describe()),
        ]);
        let line2 = Line::from(vec![
            Span::raw(format!("Total: {} | Pass rate: ", summary.total)),
            Span::styled(
                summary.pass_rate_label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | Passed: "),
            Span::styled(
                summary.passed.to_string(),
                status_style(ValidationStatus::Pass),
            ),
            Span::raw(" | Failed: "),
            Span::styled(
                summary.failed.to_string(),
                status_style(ValidationStatus::Fail),
            ),
        ]);
        frame.render_widget(Paragraph::new(vec![line1, line2]), area);
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = Tab::ALL.iter().map(|tab| {
            let label = match tab {
                Tab::Failures => format!("{} ({})", tab.label(), self.view.failures.len()),
                _ => tab.label().to_string(),
            };
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
        });
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(tabs, area);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(["ProductID", "DITAType", "Status", "FilePath", "ErrorMessage"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.view.rows.iter().map(|row| {
            let message = single_line(&row.error_message);
            Row::new(vec![
                Cell::from(row.product_id.clone()),
                Cell::from(row.kind.as_str()),
                Cell::from(row.status.as_str()).style(status_style(row.status)),
                Cell::from(row.file_path.clone()),
                Cell::from(truncate_string(&message, MESSAGE_PREVIEW_CHARS)),
            ])
        });
        let widths = [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Percentage(35),
            Constraint::Min(10),
        ];
        let title = format!("Rows ({})", self.view.rows.len());
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = TableState::default();
        if !self.view.rows.is_empty() {
            state.select(Some(self.selection[Tab::Table.index()]));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_charts(&self, frame: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let status_bars = self
            .view
            .status_counts
            .iter()
            .map(|(status, count)| {
                Bar::default()
                    .value(*count as u64)
                    .label(Line::from(status.as_str()))
                    .style(status_style(*status))
            })
            .collect::<Vec<_>>();
        let status_chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Status distribution"),
            )
            .data(BarGroup::default().bars(&status_bars))
            .bar_width(9)
            .bar_gap(3);
        frame.render_widget(status_chart, halves[0]);

        let failure_bars = self
            .view
            .failure_counts
            .iter()
            .map(|(kind, count)| {
                Bar::default()
                    .value(*count as u64)
                    .label(Line::from(kind.as_str()))
                    .style(kind_style(*kind))
            })
            .collect::<Vec<_>>();
        let failure_chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Failures by type"),
            )
            .data(BarGroup::default().bars(&failure_bars))
            .bar_width(9)
            .bar_gap(3);
        frame.render_widget(failure_chart, halves[1]);
    }

    fn draw_failures(&self, frame: &mut Frame, area: Rect) {
        let items = self
            .view
            .failures
            .iter()
            .enumerate()
            .map(|(idx, failure)| {
                let expanded = self.expanded.contains(&idx);
                let marker = if expanded { "v" } else { ">" };
                let mut lines = vec![Line::from(vec![
                    Span::raw(format!("{marker} ")),
                    Span::styled(
                        failure.title(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ])];
                if expanded {
                    lines.push(Line::from(format!("    Product ID: {}", failure.product_id)));
                    lines.push(Line::from(format!("    DITA type: {}", failure.kind)));
                    lines.push(Line::from(format!("    File: {}", failure.file_path)));
                    lines.push(Line::from("    Error:"));
                    for message_line in failure.message_or_placeholder().lines() {
                        lines.push(Line::from(format!("      {message_line}")));
                    }
                }
                ListItem::new(Text::from(lines))
            })
            .collect::<Vec<_>>();
        let title = if items.is_empty() {
            "Failures (none)".to_string()
        } else {
            format!("Failures ({})", items.len())
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if !self.view.failures.is_empty() {
            state.select(Some(self.selection[Tab::Failures.index()]));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let message = self.message.clone().unwrap_or_else(|| {
            "q quit | tab switch | enter expand | s status | t type | i id | c clear | r reload | ? help"
                .to_string()
        });
        let message = truncate_string(&message, area.width as usize);
        let paragraph =
            Paragraph::new(message).style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(paragraph, area);
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = centered_rect(60, 60, frame.area());
        let lines = vec![
            Line::from("Keys:"),
            Line::from("  q / Esc: quit"),
            Line::from("  Tab / Shift+Tab: switch tab"),
            Line::from("  Up/Down, PageUp/PageDown: move selection"),
            Line::from("  Enter: expand or collapse failure detail"),
            Line::from("  s: cycle status filter"),
            Line::from("  t: cycle document type filter"),
            Line::from("  i: cycle product filter"),
            Line::from("  c: clear filters"),
            Line::from("  r: reload report"),
            Line::from("  ?: toggle help"),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

fn status_style(status: ValidationStatus) -> Style {
    match status {
        ValidationStatus::Pass => Style::default().fg(Color::Green),
        ValidationStatus::Fail => Style::default().fg(Color::Red),
    }
}

fn kind_style(kind: DocumentKind) -> Style {
    match kind {
        DocumentKind::Reference => Style::default().fg(Color::Cyan),
        DocumentKind::Concept => Style::default().fg(Color::Magenta),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
