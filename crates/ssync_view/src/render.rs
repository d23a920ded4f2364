//! Screen layout: a one-line status bar above the diagram.
//!
//! ```text
//! WARNING: overall setup margin <0            q/Esc/Enter to close
//!  diagram
//! ─0───────────────5────────────────10──────────────────────────────
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use ratatui::Frame;

use crate::scene::Diagram;
use crate::style::DiagramStyle;
use crate::widget::DiagramWidget;

const CLOSE_HINT: &str = "q/Esc/Enter to close";

/// Draws the full screen into a frame.
pub fn render(diagram: &Diagram, style: &DiagramStyle, frame: &mut Frame) {
    let area = frame.size();
    render_into(diagram, style, area, frame.buffer_mut());
}

/// Draws the full screen into `area` of a buffer.
pub fn render_into(diagram: &Diagram, style: &DiagramStyle, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_status_bar(diagram, style, rows[0], buf);
    DiagramWidget::new(diagram, style).render(rows[1], buf);
}

/// Advisories on the left in red, the close hint on the right.
fn render_status_bar(diagram: &Diagram, style: &DiagramStyle, area: Rect, buf: &mut Buffer) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let warning_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (i, warning) in diagram.warnings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(warning.as_str(), warning_style));
    }
    buf.set_line(area.x, area.y, &Line::from(spans), area.width);

    let hint_len = CLOSE_HINT.len() as u16;
    let used = diagram
        .warnings
        .iter()
        .map(|w| w.chars().count() + 2)
        .sum::<usize>() as u16;
    if area.width >= hint_len && used + hint_len <= area.width {
        buf.set_string(
            area.right() - hint_len,
            area.y,
            CLOSE_HINT,
            Style::default().fg(style.marker_color),
        );
    }
}
