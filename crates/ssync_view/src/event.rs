//! Keyboard and resize events for the show loop.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};

/// Events seen by the show loop.
#[derive(Clone, Debug)]
pub enum ViewEvent {
    /// A key was pressed or released.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The poll timed out, or an event the loop ignores arrived.
    Tick,
}

/// Waits up to `timeout` for the next event.
///
/// Returns [`ViewEvent::Tick`] when nothing arrived in time.
pub fn poll_event(timeout: Duration) -> std::io::Result<ViewEvent> {
    if !event::poll(timeout)? {
        return Ok(ViewEvent::Tick);
    }
    Ok(match event::read()? {
        CrosstermEvent::Key(key) => ViewEvent::Key(key),
        CrosstermEvent::Resize(w, h) => ViewEvent::Resize(w, h),
        _ => ViewEvent::Tick,
    })
}

/// Whether `key` closes the diagram: `q`, `Esc`, `Enter` or `Ctrl-C`,
/// on press only.
pub fn is_close_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
