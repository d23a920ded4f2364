//! Terminal timing diagram for a source-synchronous setup/hold budget.
//!
//! Draws one clock period with the clock, the source's launched data and the
//! sink's captured data, annotated with the delay windows, the setup/hold
//! requirements and the overall margins.
//!
//! # Usage
//!
//! ```no_run
//! use ssync_timing::{TimingModel, TimingParameters};
//! use ssync_view::RenderDiagram;
//!
//! let model = TimingModel::new(TimingParameters::new(10.0, 1.0, 0.5, 0.2, 0.1, 0.3, 0.1));
//! model.render_diagram()?;
//! # Ok::<(), ssync_view::ViewError>(())
//! ```
//!
//! Headless callers use [`render_to_buffer`] or [`render_to_text`] and keep
//! the result themselves.
//!
//! # Layout
//!
//! - [`scene`]: diagram geometry in time/lane units
//! - [`widget`]: ratatui widget drawing a scene
//! - [`render`]: status bar plus diagram screen layout
//! - [`style`]: lane heights, sampling and colors
//! - [`terminal`], [`event`]: the blocking show loop

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod render;
pub mod scene;
pub mod style;
pub mod terminal;
pub mod widget;

pub use error::{StyleError, ViewError};
pub use scene::Diagram;
pub use style::DiagramStyle;
pub use widget::DiagramWidget;

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ssync_timing::TimingModel;

use event::{is_close_key, poll_event, ViewEvent};
use terminal::{init_terminal, install_panic_hook, restore_terminal, Tui};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Shows the diagram of `model` full screen and blocks until the user
/// closes it with `q`, `Esc` or `Enter`.
///
/// The terminal is restored on return and on panic.
///
/// # Errors
///
/// [`ViewError::Style`] if `style` fails validation, [`ViewError::Io`] if
/// the terminal cannot be set up or drawn.
pub fn show(model: &TimingModel, style: &DiagramStyle) -> Result<(), ViewError> {
    style.validate()?;
    let diagram = Diagram::from_model(model, style);

    install_panic_hook();
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, &diagram, style);
    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Tui,
    diagram: &Diagram,
    style: &DiagramStyle,
) -> Result<(), ViewError> {
    loop {
        terminal.draw(|frame| render::render(diagram, style, frame))?;
        match poll_event(POLL_INTERVAL)? {
            ViewEvent::Key(key) if is_close_key(&key) => return Ok(()),
            ViewEvent::Resize(..) => terminal.autoresize()?,
            _ => {}
        }
    }
}

/// Renders the full screen for `model` into a fresh buffer covering `area`.
pub fn render_to_buffer(model: &TimingModel, style: &DiagramStyle, area: Rect) -> Buffer {
    let diagram = Diagram::from_model(model, style);
    let mut buf = Buffer::empty(area);
    render::render_into(&diagram, style, area, &mut buf);
    buf
}

/// Renders `model` at the style's `width` x `height` and returns the cell
/// symbols as text, one line per row with trailing blanks removed.
pub fn render_to_text(model: &TimingModel, style: &DiagramStyle) -> String {
    let area = Rect::new(0, 0, style.width, style.height);
    let buf = render_to_buffer(model, style, area);
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buf.get(x, y).symbol())
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

/// Adds [`render_diagram`](RenderDiagram::render_diagram) to
/// [`TimingModel`].
pub trait RenderDiagram {
    /// Shows the diagram with the default style. See [`show`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the terminal cannot be used.
    fn render_diagram(&self) -> Result<(), ViewError>;
}

impl RenderDiagram for TimingModel {
    fn render_diagram(&self) -> Result<(), ViewError> {
        show(self, &DiagramStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssync_timing::TimingParameters;

    fn example() -> TimingModel {
        TimingModel::new(TimingParameters::new(10.0, 1.0, 0.5, 0.2, 0.1, 0.3, 0.1))
    }

    #[test]
    fn text_has_one_line_per_row() {
        let style = DiagramStyle::default();
        let text = render_to_text(&example(), &style);
        assert_eq!(text.lines().count(), usize::from(style.height));
        assert!(text.lines().all(|l| l.chars().count() <= usize::from(style.width)));
        assert!(text.lines().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn text_carries_annotations() {
        let text = render_to_text(&example(), &DiagramStyle::default());
        assert!(text.contains("margin_SU=0.5"));
        assert!(text.contains("q/Esc/Enter to close"));
    }

    #[test]
    fn buffer_respects_area_offset() {
        let area = Rect::new(5, 3, 100, 30);
        let buf = render_to_buffer(&example(), &DiagramStyle::default(), area);
        assert_eq!(buf.area, area);
    }

    #[test]
    fn smaller_style_renders_smaller_text() {
        let style = DiagramStyle::from_toml_str("width = 60\nheight = 20").unwrap();
        let text = render_to_text(&example(), &style);
        assert_eq!(text.lines().count(), 20);
    }

    #[test]
    fn show_rejects_invalid_style_before_touching_the_terminal() {
        let style = DiagramStyle {
            samples_per_period: 0,
            ..DiagramStyle::default()
        };
        let err = show(&example(), &style).unwrap_err();
        assert!(matches!(err, ViewError::Style(_)));
    }
}
