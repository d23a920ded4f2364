//! Terminal rendering of a [`Diagram`].
//!
//! Lines and traces are drawn on a braille [`Canvas`], which gives 2x4 dots
//! per cell and keeps the data ramps smooth. Shaded spans are applied
//! afterwards as cell background colors, so they never hide a trace.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Widget};

use crate::scene::{Align, Diagram, ShadeKind};
use crate::style::DiagramStyle;

/// Draws a [`Diagram`] with a [`DiagramStyle`].
///
/// Only the bottom border is drawn; it doubles as the time axis and carries
/// the tick labels.
pub struct DiagramWidget<'a> {
    diagram: &'a Diagram,
    style: &'a DiagramStyle,
}

impl<'a> DiagramWidget<'a> {
    /// Creates a widget borrowing the diagram and its style.
    pub fn new(diagram: &'a Diagram, style: &'a DiagramStyle) -> Self {
        Self { diagram, style }
    }

    fn shade_color(&self, kind: ShadeKind) -> Color {
        match kind {
            ShadeKind::SetupHold => self.style.setup_hold_color,
            ShadeKind::SourceMargin => self.style.source_margin_color,
        }
    }

    fn paint(&self, ctx: &mut Context) {
        let d = self.diagram;
        let [y_min, y_max] = d.y_bounds;
        let trace_color = self.style.trace_color;

        for &x in &d.markers {
            ctx.draw(&CanvasLine {
                x1: x,
                y1: y_min,
                x2: x,
                y2: y_max,
                color: self.style.marker_color,
            });
        }
        ctx.layer();

        for trace in &d.traces {
            for pair in trace.points.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].0,
                    y1: pair[0].1,
                    x2: pair[1].0,
                    y2: pair[1].1,
                    color: trace_color,
                });
            }
        }

        for arrow in &d.arrows {
            ctx.draw(&CanvasLine {
                x1: arrow.from,
                y1: arrow.y,
                x2: arrow.to,
                y2: arrow.y,
                color: trace_color,
            });
            for (tip, barb) in
                arrow.head_strokes(d.arrow_head_length, self.style.arrow_head_height)
            {
                ctx.draw(&CanvasLine {
                    x1: tip.0,
                    y1: tip.1,
                    x2: barb.0,
                    y2: barb.1,
                    color: trace_color,
                });
            }
        }
    }

    fn render_shading(&self, plot: &PlotArea, buf: &mut Buffer) {
        let inner = plot.area;
        for col in 0..inner.width {
            let Some(kind) = self.diagram.shade_at(plot.time_at(col)) else {
                continue;
            };
            let color = self.shade_color(kind);
            for y in inner.top()..inner.bottom() {
                buf.get_mut(inner.x + col, y).set_bg(color);
            }
        }
    }

    fn render_labels(&self, plot: &PlotArea, buf: &mut Buffer) {
        let d = self.diagram;
        let style = Style::default().fg(self.style.trace_color);

        for arrow in &d.arrows {
            let (anchor, align) = arrow.label_anchor(d.label_padding);
            if let Some(row) = plot.row(arrow.y) {
                plot.write(buf, anchor, row, align, &arrow.label, style);
            }
        }

        let caption_style = style.add_modifier(Modifier::BOLD);
        for text in &d.texts {
            let Some(center) = plot.row(text.y) else {
                continue;
            };
            let first = center.saturating_sub(text.lines.len() as u16 / 2);
            for (i, line) in text.lines.iter().enumerate() {
                let row = first + i as u16;
                if row < plot.area.bottom() {
                    plot.write(buf, text.x, row, text.align, line, caption_style);
                }
            }
        }
    }

    fn render_legend(&self, inner: Rect, buf: &mut Buffer) {
        let legend = self.diagram.legend();
        let label_width = legend.iter().map(|k| k.label().len()).max().unwrap_or(0) as u16;
        let width = label_width + 3;
        if inner.width < width || inner.height < legend.len() as u16 {
            return;
        }
        let x = inner.right() - width;
        for (i, kind) in legend.iter().enumerate() {
            let line = Line::from(vec![
                Span::styled("  ", Style::default().bg(self.shade_color(*kind))),
                Span::raw(" "),
                Span::styled(kind.label(), Style::default().fg(self.style.trace_color)),
            ]);
            buf.set_line(x, inner.y + i as u16, &line, width);
        }
    }

    fn render_ticks(&self, plot: &PlotArea, axis_row: u16, buf: &mut Buffer) {
        let style = Style::default().fg(self.style.marker_color);
        for (t, label) in &self.diagram.ticks {
            if !(plot.x_bounds[0] <= *t && *t <= plot.x_bounds[1]) {
                continue;
            }
            plot.write(buf, *t, axis_row, Align::Left, label, style);
        }
    }
}

/// Maps plot coordinates onto the cells of the inner drawing area, using
/// the same scaling as ratatui's canvas.
struct PlotArea {
    area: Rect,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl PlotArea {
    /// Returns `None` unless both ranges are finite and non-empty.
    fn new(area: Rect, x_bounds: [f64; 2], y_bounds: [f64; 2]) -> Option<Self> {
        let usable = |[lo, hi]: [f64; 2]| lo.is_finite() && hi.is_finite() && lo < hi;
        (usable(x_bounds) && usable(y_bounds)).then_some(Self {
            area,
            x_bounds,
            y_bounds,
        })
    }

    /// Time at the center of column `col`.
    fn time_at(&self, col: u16) -> f64 {
        let [lo, hi] = self.x_bounds;
        lo + (f64::from(col) + 0.5) * (hi - lo) / f64::from(self.area.width)
    }

    /// Column of time `x`, clamped into the area. `None` for NaN.
    fn col(&self, x: f64) -> Option<u16> {
        if x.is_nan() {
            return None;
        }
        let [lo, hi] = self.x_bounds;
        let x = x.max(lo).min(hi);
        let scale = f64::from(self.area.width - 1) / (hi - lo);
        Some(self.area.x + ((x - lo) * scale) as u16)
    }

    /// Row of height `y`, or `None` outside the vertical range.
    fn row(&self, y: f64) -> Option<u16> {
        let [lo, hi] = self.y_bounds;
        if !(lo <= y && y <= hi) {
            return None;
        }
        let scale = f64::from(self.area.height - 1) / (hi - lo);
        Some(self.area.y + ((hi - y) * scale) as u16)
    }

    /// Writes `text` on `row`, starting at (`Left`) or ending at (`Right`)
    /// the column of `anchor`, shifted to stay inside the area.
    fn write(
        &self,
        buf: &mut Buffer,
        anchor: f64,
        row: u16,
        align: Align,
        text: &str,
        style: Style,
    ) {
        let Some(col) = self.col(anchor) else {
            return;
        };
        let len = text.chars().count() as u16;
        let start = match align {
            Align::Left => col,
            Align::Right => col.saturating_sub(len),
        };
        let start = start
            .max(self.area.left())
            .min(self.area.right().saturating_sub(len).max(self.area.left()));
        let width = self.area.right().saturating_sub(start) as usize;
        buf.set_stringn(start, row, text, width, style);
    }
}

impl Widget for DiagramWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(self.style.marker_color));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        if inner.width < 2 || inner.height < 2 {
            return;
        }
        let d = self.diagram;
        let Some(plot) = PlotArea::new(inner, d.x_bounds, d.y_bounds) else {
            return;
        };

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(d.x_bounds)
            .y_bounds(d.y_bounds)
            .paint(|ctx| self.paint(ctx));
        canvas.render(inner, buf);

        self.render_shading(&plot, buf);
        self.render_labels(&plot, buf);
        self.render_legend(inner, buf);

        if area.bottom() > inner.bottom() {
            self.render_ticks(&plot, inner.bottom(), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssync_timing::{TimingModel, TimingParameters};

    fn render(params: TimingParameters, area: Rect) -> Buffer {
        let style = DiagramStyle::default();
        let diagram = Diagram::from_model(&TimingModel::new(params), &style);
        let mut buf = Buffer::empty(area);
        DiagramWidget::new(&diagram, &style).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf.get(x, y).symbol())
            .collect()
    }

    fn all_text(buf: &Buffer) -> String {
        (buf.area.top()..buf.area.bottom())
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn example() -> TimingParameters {
        TimingParameters::new(10.0, 1.0, 0.5, 0.2, 0.1, 0.3, 0.1)
    }

    #[test]
    fn labels_and_legend_are_drawn() {
        let buf = render(example(), Rect::new(0, 0, 140, 50));
        let text = all_text(&buf);
        for needle in [
            "margin_HO=0.2",
            "margin_SU=0.5",
            "out_min=-0.6",
            "in_max=9.3",
            "Source",
            "New Data",
            "Setup/Hold Area",
            "Source Margin",
        ] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn setup_hold_window_is_shaded() {
        let style = DiagramStyle::default();
        let buf = render(example(), Rect::new(0, 0, 140, 50));
        // t = 0 lies inside the [-setup, hold] window.
        let diagram = Diagram::from_model(&TimingModel::new(example()), &style);
        let cell_w = (diagram.x_bounds[1] - diagram.x_bounds[0]) / 140.0;
        let col = ((0.0 - diagram.x_bounds[0]) / cell_w) as u16;
        assert_eq!(buf.get(col, 20).bg, style.setup_hold_color);
        // Mid-period is clear.
        let col = ((5.0 - diagram.x_bounds[0]) / cell_w) as u16;
        assert_eq!(buf.get(col, 20).bg, Color::Reset);
    }

    #[test]
    fn time_axis_has_ticks() {
        let buf = render(example(), Rect::new(0, 0, 140, 50));
        let axis = row_text(&buf, 49);
        assert!(axis.contains('─'));
        assert!(axis.contains("10"));
    }

    #[test]
    fn infeasible_budget_renders() {
        let params = TimingParameters::new(10.0, 1.0, 0.5, -2.0, -2.0, 1.0, 1.0);
        let buf = render(params, Rect::new(0, 0, 140, 50));
        assert!(all_text(&buf).contains("margin_SU=-1"));
    }

    #[test]
    fn tiny_and_empty_areas_do_not_panic() {
        render(example(), Rect::new(0, 0, 3, 2));
        render(example(), Rect::new(0, 0, 1, 1));
        render(example(), Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn degenerate_period_does_not_panic() {
        let params = TimingParameters::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        render(params, Rect::new(0, 0, 80, 24));
        let params = TimingParameters::new(f64::NAN, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0);
        render(params, Rect::new(0, 0, 80, 24));
    }
}
