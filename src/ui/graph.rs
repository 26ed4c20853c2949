//! ASCII bar graphs.
//!
//! [`render`] turns a window of samples into the set of cells to mark;
//! [`GraphWidget`] writes those cells into a ratatui buffer under a title
//! line.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::data::RollingWindow;

/// Glyph used for every bar cell.
pub const BAR_GLYPH: char = '|';

/// Cells of a rendered bar graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarGraph {
    /// Marked cells as `(row, col)` within the drawing region. Row 0 is the
    /// top; the baseline is row `height - 1`.
    pub cells: Vec<(u16, u16)>,
    /// Largest sample in the input, for the title line.
    pub peak: Option<f64>,
    /// Number of columns drawn.
    pub columns: u16,
}

/// An indexable run of samples, oldest first.
///
/// Lets the graph read a [`RollingWindow`] in place instead of copying it
/// out every frame.
pub trait Series {
    fn len(&self) -> usize;

    /// Sample at `idx`; only called with `idx < len()`.
    fn sample(&self, idx: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest sample, if any.
    fn peak(&self) -> Option<f64> {
        (0..self.len()).map(|idx| self.sample(idx)).reduce(f64::max)
    }
}

impl Series for [f64] {
    fn len(&self) -> usize {
        <[f64]>::len(self)
    }

    fn sample(&self, idx: usize) -> f64 {
        self[idx]
    }
}

impl<const N: usize> Series for [f64; N] {
    fn len(&self) -> usize {
        N
    }

    fn sample(&self, idx: usize) -> f64 {
        self[idx]
    }
}

impl Series for RollingWindow<f64> {
    fn len(&self) -> usize {
        RollingWindow::len(self)
    }

    fn sample(&self, idx: usize) -> f64 {
        self.get(idx).copied().unwrap_or_default()
    }
}

/// Render `values` as vertical bars scaled against `ceiling`.
///
/// When there are more samples than columns the series is sub-sampled by
/// nearest index (`idx = x * len / width`), not averaged, so a short spike
/// can fall between columns. Every bar includes its baseline cell.
pub fn render<S>(values: &S, ceiling: f64, width: u16, height: u16) -> BarGraph
where
    S: Series + ?Sized,
{
    let peak = values.peak();
    if values.is_empty() || width == 0 || height == 0 {
        return BarGraph {
            peak,
            ..Default::default()
        };
    }

    let columns = values.len().min(usize::from(width));
    let mut cells = Vec::new();

    for x in 0..columns {
        let idx = x * values.len() / columns;
        let bar = bar_height(values.sample(idx), ceiling, height);
        // x < columns <= width, so it fits in u16
        let col = x as u16;
        for h in 0..=bar {
            cells.push((height - 1 - h, col));
        }
    }

    BarGraph {
        cells,
        peak,
        columns: columns as u16,
    }
}

/// Height of a bar above the baseline, in `[0, height - 1]`.
///
/// The ceiling normally covers the peak, but one computed before a late
/// spike would not, so the result is clamped.
fn bar_height(value: f64, ceiling: f64, height: u16) -> u16 {
    let top = height.saturating_sub(1);
    if value.is_nan() || value <= 0.0 || !ceiling.is_finite() || ceiling <= 0.0 {
        return 0;
    }
    (value / ceiling * f64::from(top)).floor().clamp(0.0, f64::from(top)) as u16
}

/// A titled bar graph widget.
///
/// The first row of the area holds `"<title> (max: <peak>)"`; the rest is the
/// drawing region, indented by one column.
#[derive(Debug)]
pub struct GraphWidget<'a, S: ?Sized = [f64]> {
    title: &'a str,
    values: &'a S,
    ceiling: f64,
    title_style: Style,
    bar_style: Style,
}

impl<'a, S: Series + ?Sized> GraphWidget<'a, S> {
    pub fn new(title: &'a str, values: &'a S, ceiling: f64) -> Self {
        Self {
            title,
            values,
            ceiling,
            title_style: Style::default(),
            bar_style: Style::default(),
        }
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn bar_style(mut self, style: Style) -> Self {
        self.bar_style = style;
        self
    }
}

impl<S: Series + ?Sized> Widget for GraphWidget<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let graph = render(
            self.values,
            self.ceiling,
            area.width.saturating_sub(2),
            area.height - 1,
        );

        let title = match graph.peak {
            Some(peak) => format!("{} (max: {:.2})", self.title, peak),
            None => self.title.to_string(),
        };
        buf.set_stringn(area.x, area.y, title, usize::from(area.width), self.title_style);

        for (row, col) in graph.cells {
            let position = (area.x + 1 + col, area.y + 1 + row);
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(BAR_GLYPH).set_style(self.bar_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf[(x, y)].symbol()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| symbol(buf, x, y)).collect()
    }

    fn column_heights(graph: &BarGraph) -> Vec<usize> {
        (0..graph.columns)
            .map(|c| graph.cells.iter().filter(|(_, col)| *col == c).count())
            .collect()
    }

    #[test]
    fn test_empty_values_mark_nothing() {
        let empty: [f64; 0] = [];
        let graph = render(&empty, 100.0, 40, 8);
        assert!(graph.cells.is_empty());
        assert_eq!(graph.peak, None);
        assert_eq!(graph.columns, 0);
    }

    #[test]
    fn test_zero_region_marks_nothing() {
        assert!(render(&[1.0, 2.0], 10.0, 0, 8).cells.is_empty());
        assert!(render(&[1.0, 2.0], 10.0, 8, 0).cells.is_empty());
        assert_eq!(render(&[1.0, 2.0], 10.0, 0, 0).peak, Some(2.0));
    }

    #[test]
    fn test_bars_are_filled_from_baseline() {
        // height 8 => top = 7; 50/100*7 = 3.5 -> 3
        let graph = render(&[50.0], 100.0, 10, 8);
        assert_eq!(graph.columns, 1);
        assert_eq!(graph.cells, vec![(7, 0), (6, 0), (5, 0), (4, 0)]);
    }

    #[test]
    fn test_zero_value_marks_baseline_only() {
        let graph = render(&[0.0, 100.0], 100.0, 10, 8);
        assert_eq!(column_heights(&graph), vec![1, 8]);
        assert!(graph.cells.contains(&(0, 1)));
    }

    #[test]
    fn test_overflowing_value_is_clamped() {
        // Ceiling stale relative to the spike
        let graph = render(&[1000.0], 100.0, 4, 8);
        assert_eq!(column_heights(&graph), vec![8]);
        assert!(graph.cells.iter().all(|(row, _)| *row < 8));
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let graph = render(&[f64::NAN, -5.0, f64::INFINITY], 0.0, 10, 4);
        assert_eq!(column_heights(&graph), vec![1, 1, 1]);

        let graph = render(&[f64::INFINITY], 10.0, 10, 4);
        assert_eq!(column_heights(&graph), vec![4]);
    }

    #[test]
    fn test_never_wider_than_region() {
        let values: Vec<f64> = (0..60).map(f64::from).collect();
        let graph = render(values.as_slice(), 100.0, 20, 8);
        assert_eq!(graph.columns, 20);
        assert!(graph.cells.iter().all(|(_, col)| *col < 20));
        assert_eq!(graph.peak, Some(59.0));
    }

    #[test]
    fn test_downsampling_picks_nearest_index() {
        // 6 values into 3 columns => indices 0, 2, 4
        let values = [25.0, 90.0, 50.0, 90.0, 75.0, 90.0];
        let graph = render(&values, 10.0, 3, 5);
        // Every picked value exceeds the ceiling and clamps to the top
        assert_eq!(column_heights(&graph), vec![5, 5, 5]);

        let graph = render(&values, 100.0, 3, 5);
        // top = 4: 25 -> 1, 50 -> 2, 75 -> 3 (plus baseline); the 90s are skipped
        assert_eq!(column_heights(&graph), vec![2, 3, 4]);
    }

    #[test]
    fn test_short_series_uses_one_column_per_sample() {
        let graph = render(&[1.0, 2.0, 3.0], 3.0, 80, 4);
        assert_eq!(graph.columns, 3);
    }

    #[test]
    fn test_widget_draws_title_and_bars() {
        let area = Rect::new(0, 0, 12, 5);
        let mut buf = Buffer::empty(area);
        GraphWidget::new("TX", &[0.0, 100.0], 100.0).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "TX (max: 100");

        // Drawing rows 1..=4, indented by one column
        assert_eq!(symbol(&buf, 1, 4), "|");
        assert_eq!(symbol(&buf, 1, 3), " ");
        for y in 1..=4 {
            assert_eq!(symbol(&buf, 2, y), "|");
        }
        assert_eq!(symbol(&buf, 0, 4), " ");
    }

    #[test]
    fn test_widget_without_samples_shows_bare_title() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let empty: RollingWindow<f64> = RollingWindow::new(4);
        GraphWidget::new("DMA Latency (ns)", &empty, 1000.0).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0).trim_end(), "DMA Latency (ns)");
        assert!(row_text(&buf, 2).trim().is_empty());
    }

    #[test]
    fn test_rolling_window_renders_like_slice() {
        let mut window: RollingWindow<f64> = RollingWindow::new(3);
        for value in [10.0, 25.0, 50.0, 75.0] {
            window.push(value);
        }
        let copied = window.to_vec();

        assert_eq!(window.peak(), Some(75.0));
        assert_eq!(
            render(&window, 100.0, 10, 5),
            render(copied.as_slice(), 100.0, 10, 5)
        );
        // 10.0 was evicted: top = 4 gives 25 -> 1, 50 -> 2, 75 -> 3
        assert_eq!(column_heights(&render(&window, 100.0, 10, 5)), vec![2, 3, 4]);
    }
}
