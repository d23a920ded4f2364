//! Setup/hold timing budgets for a source-synchronous data transfer.
//!
//! Given a clock period, a device's nominal setup/hold times and the safety
//! margins claimed by each side, this crate derives the output delay window
//! the source must meet, the input delay window the sink can accept, and the
//! overall margins between the two. It also writes the matching
//! `set_output_delay` / `set_input_delay` constraints.
//!
//! # Usage
//!
//! ```
//! use ssync_diagnostics::DiagnosticSink;
//! use ssync_timing::{analyze, TimingParameters};
//!
//! let sink = DiagnosticSink::new();
//! let params = TimingParameters::new(10.0, 1.0, 0.5, 0.2, 0.1, 0.3, 0.1);
//! let model = analyze(params, &sink);
//! assert!(model.is_feasible());
//! print!("{}", model.emit_source_constraints());
//! ```
//!
//! # Architecture
//!
//! - [`params`]: caller-supplied inputs
//! - [`model`]: derived budget and the [`TimingModel`] wrapper
//! - [`advisory`]: non-fatal infeasibility tags and their diagnostics
//! - [`report`]: constraint report formatters
//! - [`error`]: checked construction errors

#![warn(missing_docs)]

pub mod advisory;
pub mod error;
pub mod model;
pub mod params;
pub mod report;

pub use advisory::Advisory;
pub use error::TimingError;
pub use model::{DerivedTiming, TimingModel};
pub use params::TimingParameters;
pub use report::{
    ConstraintPorts, ConstraintReportFormatter, LiteralDelayFormatter, TclVariableFormatter,
};

use ssync_diagnostics::DiagnosticSink;

/// Builds a [`TimingModel`] and reports its advisories to `sink`.
///
/// Parameters that fail [`TimingParameters::validate`] are reported as an
/// `E001` error; the model is still built from them as given.
pub fn analyze(params: TimingParameters, sink: &DiagnosticSink) -> TimingModel {
    if let Err(err) = params.validate() {
        sink.emit(err.to_diagnostic());
    }
    let model = TimingModel::new(params);
    model.report_advisories(sink);
    model
}
