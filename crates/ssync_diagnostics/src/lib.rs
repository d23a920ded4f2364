//! Structured diagnostics for timing budget analysis.
//!
//! Invalid inputs and advisory conditions found while deriving a timing
//! budget are reported as [`Diagnostic`] values with a [`Severity`] and a
//! [`DiagnosticCode`]. The thread-safe [`DiagnosticSink`] accumulates them,
//! and [`DiagnosticRenderer`] implementations format them for the terminal.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
