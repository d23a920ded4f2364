//! The closed-form setup/hold budget model.
//!
//! Source margins are added to the device's nominal setup/hold, sink margins
//! are subtracted from it. The output delay window of the source and the
//! input delay window of the sink follow directly, and the difference between
//! the two sides is the overall margin of the transfer.

use crate::advisory::Advisory;
use crate::error::TimingError;
use crate::params::TimingParameters;
use crate::report::{ConstraintReportFormatter, TclVariableFormatter};
use serde::{Deserialize, Serialize};
use ssync_diagnostics::DiagnosticSink;

/// Every quantity derived from a [`TimingParameters`] value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedTiming {
    /// `setup + source_setup_margin`.
    pub source_setup: f64,
    /// `hold + source_hold_margin`.
    pub source_hold: f64,
    /// `setup - sink_setup_margin`.
    pub sink_setup: f64,
    /// `hold - sink_hold_margin`.
    pub sink_hold: f64,
    /// `-source_hold`.
    pub source_min_output_delay: f64,
    /// `source_setup`.
    pub source_max_output_delay: f64,
    /// `sink_hold`.
    pub sink_min_input_delay: f64,
    /// `period - sink_setup`.
    pub sink_max_input_delay: f64,
    /// `source_setup - sink_setup`.
    pub overall_setup_margin: f64,
    /// `source_hold - sink_hold`.
    pub overall_hold_margin: f64,
}

impl DerivedTiming {
    /// Computes the derived budget. Pure arithmetic, accepts any input.
    pub fn from_parameters(p: &TimingParameters) -> Self {
        let source_setup = p.setup + p.source_setup_margin;
        let source_hold = p.hold + p.source_hold_margin;
        let sink_setup = p.setup - p.sink_setup_margin;
        let sink_hold = p.hold - p.sink_hold_margin;

        Self {
            source_setup,
            source_hold,
            sink_setup,
            sink_hold,
            source_min_output_delay: -source_hold,
            source_max_output_delay: source_setup,
            sink_min_input_delay: sink_hold,
            sink_max_input_delay: p.period - sink_setup,
            overall_setup_margin: source_setup - sink_setup,
            overall_hold_margin: source_hold - sink_hold,
        }
    }
}

/// One source-to-sink timing budget analysis.
///
/// The derived record and its advisories are computed once at construction
/// and never change afterwards.
///
/// Only the single register-to-register path is modeled. Timing of signals
/// travelling back from sink to source is not.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingModel {
    params: TimingParameters,
    derived: DerivedTiming,
    advisories: Vec<Advisory>,
}

impl TimingModel {
    /// Derives the budget for `params`, accepting every value as given.
    pub fn new(params: TimingParameters) -> Self {
        let derived = DerivedTiming::from_parameters(&params);
        let advisories = Advisory::detect(&derived);
        Self {
            params,
            derived,
            advisories,
        }
    }

    /// Like [`new`](Self::new), but rejects non-finite values and a
    /// non-positive period first.
    ///
    /// # Errors
    ///
    /// Returns the [`TimingError`] reported by [`TimingParameters::validate`].
    pub fn try_new(params: TimingParameters) -> Result<Self, TimingError> {
        params.validate()?;
        Ok(Self::new(params))
    }

    /// The inputs this model was built from.
    pub fn parameters(&self) -> &TimingParameters {
        &self.params
    }

    /// The derived budget.
    pub fn derived(&self) -> &DerivedTiming {
        &self.derived
    }

    /// Advisory conditions, setup before hold. Empty for a closable budget.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Returns `true` if `advisory` applies to this budget.
    pub fn has_advisory(&self, advisory: Advisory) -> bool {
        self.advisories.contains(&advisory)
    }

    /// Returns `true` when both overall margins are non-negative.
    pub fn is_feasible(&self) -> bool {
        self.advisories.is_empty()
    }

    /// Emits one warning diagnostic per advisory into `sink`.
    pub fn report_advisories(&self, sink: &DiagnosticSink) {
        for advisory in &self.advisories {
            sink.emit(advisory.to_diagnostic(&self.derived));
        }
    }

    /// The source-side output delay constraints with placeholder port names.
    pub fn emit_source_constraints(&self) -> String {
        TclVariableFormatter::default().source_constraints(self)
    }

    /// The sink-side input delay constraints with placeholder port names.
    pub fn emit_sink_constraints(&self) -> String {
        TclVariableFormatter::default().sink_constraints(self)
    }
}
