//! Terminal setup and teardown.
//!
//! The diagram is drawn on the alternate screen in raw mode; both are undone
//! by [`restore_terminal`], also from the panic hook.

use std::io::{self, Stdout};

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// A ratatui terminal backed by crossterm on stdout.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enables raw mode, enters the alternate screen and returns a terminal
/// ready for drawing. Pair with [`restore_terminal`].
pub fn init_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

/// Leaves the alternate screen and disables raw mode. Safe to call more
/// than once.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before the panic
/// message is printed.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_hook_installs() {
        install_panic_hook();
    }

    #[test]
    fn restore_terminal_twice_does_not_panic() {
        // No tty under test; errors are fine, panics are not.
        let _ = restore_terminal();
        let _ = restore_terminal();
    }
}
