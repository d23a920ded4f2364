//! Diagnostic rendering backends.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders every diagnostic in order, one block after another.
    fn render_all(&self, diags: &[Diagnostic]) -> String {
        diags.iter().map(|d| self.render(d)).collect()
    }
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// warning[T001]: overall setup margin <0
///    = note: overall setup margin is -0.3
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = if self.color {
            format!(
                "\x1b[1;{}m{}[{}]\x1b[0m\x1b[1m: {}\x1b[0m\n",
                diag.severity.ansi_color(),
                diag.severity,
                diag.code,
                diag.message
            )
        } else {
            format!("{}[{}]: {}\n", diag.severity, diag.code, diag.message)
        };

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    fn make_warning() -> Diagnostic {
        Diagnostic::warning(
            DiagnosticCode::new(Category::Timing, 1),
            "overall setup margin <0",
        )
        .with_note("overall setup margin is -0.3")
        .with_help("lower the sink setup margin")
    }

    #[test]
    fn render_plain() {
        let output = TerminalRenderer::new(false).render(&make_warning());
        assert_eq!(
            output,
            "warning[T001]: overall setup margin <0\n\
             \x20  = note: overall setup margin is -0.3\n\
             \x20  = help: lower the sink setup margin\n"
        );
    }

    #[test]
    fn render_colored_wraps_header() {
        let output = TerminalRenderer::new(true).render(&make_warning());
        assert!(output.starts_with("\x1b[1;33mwarning[T001]"));
        assert!(output.contains("overall setup margin <0"));
        assert!(output.contains("= note: overall setup margin is -0.3"));
    }

    #[test]
    fn render_all_concatenates() {
        let renderer = TerminalRenderer::new(false);
        let diags = vec![make_warning(), make_warning()];
        let output = renderer.render_all(&diags);
        assert_eq!(output.matches("warning[T001]").count(), 2);
    }
}
