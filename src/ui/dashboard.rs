//! Full-frame dashboard rendering.
//!
//! The whole frame is redrawn every tick: header, the three graphs, the
//! Thunderbolt status block, the current values and the footer hint.

use std::time::SystemTime;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::graph::GraphWidget;
use crate::app::{App, RunState};
use crate::data::Metric;
use crate::error::RenderError;

/// Narrowest terminal the dashboard draws into.
pub const MIN_WIDTH: u16 = 40;

/// Rows of the Thunderbolt status block.
const STATUS_HEIGHT: u16 = 3;
/// Rows of the current values block.
const CURRENT_HEIGHT: u16 = 2;

/// Regions of one dashboard frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    /// TX, RX and latency graphs, in [`Metric::ALL`] order.
    pub graphs: [Rect; 3],
    pub status: Rect,
    pub current: Rect,
    pub footer: Rect,
}

impl DashboardLayout {
    /// Rows needed for graphs of `graph_height` drawing rows.
    pub fn min_height(graph_height: u16) -> u16 {
        // header + 3 * (title + bars) + status + spacer + current + footer
        1 + 3 * (graph_height + 1) + STATUS_HEIGHT + 1 + CURRENT_HEIGHT + 1
    }

    /// Split `area` into dashboard regions.
    pub fn compute(area: Rect, graph_height: u16) -> Result<Self, RenderError> {
        let min_height = Self::min_height(graph_height);
        if area.width < MIN_WIDTH || area.height < min_height {
            return Err(RenderError::TooSmall {
                width: area.width,
                height: area.height,
                min_width: MIN_WIDTH,
                min_height,
            });
        }

        let graph = Constraint::Length(graph_height + 1);
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            graph,                 // TX
            graph,                 // RX
            graph,                 // Latency
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(1), // Spacer
            Constraint::Length(CURRENT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1), // Footer
        ])
        .split(area);

        Ok(Self {
            header: chunks[0],
            graphs: [chunks[1], chunks[2], chunks[3]],
            status: chunks[4],
            current: chunks[6],
            footer: chunks[8],
        })
    }
}

/// Render one dashboard frame.
///
/// A terminal too small for the layout gets a warning in place of the frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = match DashboardLayout::compute(area, app.graph_height) {
        Ok(layout) => layout,
        Err(err) => {
            render_layout_error(frame, app, area, &err);
            return;
        }
    };

    render_header(frame, app, layout.header);

    for (metric, region) in Metric::ALL.into_iter().zip(layout.graphs) {
        let values = app.store.window(metric);
        let widget = GraphWidget::new(metric.title(), values, app.scale.ceiling(metric))
            .bar_style(app.theme.bar_style());
        frame.render_widget(widget, region);
    }

    render_status(frame, app, layout.status);
    render_current_values(frame, app, layout.current);
    render_footer(frame, app, layout.footer);
}

/// Render the header line: source and sample age, or the current read error.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.state {
        RunState::Paused { reason, retry_at } => {
            let retry_in = retry_at.saturating_duration_since(std::time::Instant::now());
            Line::from(vec![
                Span::styled(format!(" Error: {}", reason), app.theme.error_style()),
                Span::raw(format!(" │ retrying in {:.1}s", retry_in.as_secs_f64())),
            ])
        }
        _ => {
            let age = match app.store.sample_age(SystemTime::now()) {
                Some(age) => format!("Updated {:.1}s ago", age.as_secs_f64()),
                None => "Waiting for data...".to_string(),
            };
            Line::from(vec![
                Span::styled(
                    " eGPU PERFORMANCE MONITOR ",
                    Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("│ {} │ ", app.source_description())),
                Span::raw(format!(
                    "{}/{} samples │ {}",
                    app.store.samples(),
                    app.store.timestamps().capacity(),
                    age
                )),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Thunderbolt Status:", app.theme.label)),
        Line::from(format!("  Connections: {}", app.store.connections)),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("Errors: {}", app.store.errors),
                app.theme.error_count_style(app.store.errors),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_current_values(frame: &mut Frame, app: &App, area: Rect) {
    let store = &app.store;
    let values = match (
        store.latest(Metric::Tx),
        store.latest(Metric::Rx),
        store.latest(Metric::Latency),
    ) {
        (Some(tx), Some(rx), Some(latency)) => format!(
            "  TX: {:.2} MB/s  RX: {:.2} MB/s  Latency: {:.0} ns",
            tx, rx, latency
        ),
        _ => "  Waiting for first sample...".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled("Current Values:", app.theme.label)),
        Line::from(values),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(Span::styled(
        "Press 'q' to quit, 'r' to reset scaling",
        app.theme.footer,
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Shown instead of the frame when it cannot be laid out.
fn render_layout_error(frame: &mut Frame, app: &App, area: Rect, err: &RenderError) {
    let msg = format!("{}\n\nResize to continue, q to quit", err);
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.critical));
    let height = 3u16.min(area.height);
    let y = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, y, area.width, height);
    frame.render_widget(paragraph, centered);
}
