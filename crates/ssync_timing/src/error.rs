//! Error types for checked timing model construction.

use ssync_common::Frequency;
use ssync_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Errors returned by [`TimingModel::try_new`](crate::TimingModel::try_new)
/// and [`TimingParameters::from_frequency`](crate::TimingParameters::from_frequency).
///
/// Unchecked construction never fails; these only describe inputs that no
/// timing budget can be derived from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimingError {
    /// A parameter is NaN or infinite.
    #[error("parameter `{field}` is not a finite number ({value})")]
    NonFinite {
        /// Name of the offending parameter.
        field: &'static str,
        /// The value that was supplied.
        value: f64,
    },

    /// The clock period is zero or negative.
    #[error("clock period must be positive, got {period}")]
    NonPositivePeriod {
        /// The period that was supplied.
        period: f64,
    },

    /// A clock frequency that does not correspond to a positive period.
    #[error("clock frequency {0} does not define a period")]
    InvalidFrequency(Frequency),
}

impl TimingError {
    /// Code of the error diagnostic built by [`to_diagnostic`](Self::to_diagnostic).
    pub const CODE: DiagnosticCode = DiagnosticCode::new(Category::Error, 1);

    /// Builds an error diagnostic carrying this error as its note.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(Self::CODE, "invalid timing parameters")
            .with_note(self.to_string())
            .with_help("the budget is still derived, but its values do not describe a real clock")
    }
}
