//! Advisory conditions of a derived timing budget.
//!
//! A negative overall margin means the source cannot meet what the sink
//! reserves. The budget is still fully computed, so these are tags a caller
//! may log, escalate or ignore rather than errors.

use crate::model::DerivedTiming;
use serde::{Deserialize, Serialize};
use ssync_common::format_g;
use ssync_diagnostics::{Category, Diagnostic, DiagnosticCode};
use std::fmt;

/// A non-fatal condition detected while deriving a timing budget.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Advisory {
    /// `overall_setup_margin < 0`: the source's setup budget is smaller than
    /// the setup window the sink requires.
    SetupMarginNegative,
    /// `overall_hold_margin < 0`: the source's hold budget is smaller than
    /// the hold window the sink requires.
    HoldMarginNegative,
}

impl Advisory {
    /// Returns the advisories that apply to `derived`, setup before hold.
    pub fn detect(derived: &DerivedTiming) -> Vec<Advisory> {
        let mut found = Vec::new();
        if derived.overall_setup_margin < 0.0 {
            found.push(Advisory::SetupMarginNegative);
        }
        if derived.overall_hold_margin < 0.0 {
            found.push(Advisory::HoldMarginNegative);
        }
        found
    }

    /// The diagnostic code reported for this advisory.
    pub fn code(self) -> DiagnosticCode {
        match self {
            Advisory::SetupMarginNegative => DiagnosticCode::new(Category::Timing, 1),
            Advisory::HoldMarginNegative => DiagnosticCode::new(Category::Timing, 2),
        }
    }

    /// The short message reported for this advisory.
    pub fn message(self) -> &'static str {
        match self {
            Advisory::SetupMarginNegative => "overall setup margin <0",
            Advisory::HoldMarginNegative => "overall hold margin <0",
        }
    }

    /// Builds a warning diagnostic carrying the offending margin value.
    pub fn to_diagnostic(self, derived: &DerivedTiming) -> Diagnostic {
        let (name, margin, help) = match self {
            Advisory::SetupMarginNegative => (
                "setup",
                derived.overall_setup_margin,
                "increase the source setup margin or reduce the sink setup margin",
            ),
            Advisory::HoldMarginNegative => (
                "hold",
                derived.overall_hold_margin,
                "increase the source hold margin or reduce the sink hold margin",
            ),
        };
        Diagnostic::warning(self.code(), self.message())
            .with_note(format!("overall {name} margin is {}", format_g(margin)))
            .with_help(help)
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TimingParameters;
    use ssync_diagnostics::Severity;

    fn derive(params: TimingParameters) -> DerivedTiming {
        DerivedTiming::from_parameters(&params)
    }

    #[test]
    fn feasible_budget_has_no_advisories() {
        let derived = derive(TimingParameters::new(10.0, 1.0, 0.5, 0.2, 0.1, 0.3, 0.1));
        assert!(Advisory::detect(&derived).is_empty());
    }

    #[test]
    fn both_margins_negative() {
        // Sink reserves negative margins, so it requires more than the source offers.
        let derived = derive(TimingParameters::new(10.0, 1.0, 0.5, 0.0, 0.0, -0.2, -0.1));
        assert_eq!(
            Advisory::detect(&derived),
            vec![Advisory::SetupMarginNegative, Advisory::HoldMarginNegative]
        );
    }

    #[test]
    fn zero_margin_is_not_negative() {
        let derived = derive(TimingParameters::new(10.0, 0.0, 0.5, 0.0, 0.0, 0.0, -0.1));
        assert_eq!(derived.overall_setup_margin, 0.0);
        assert_eq!(Advisory::detect(&derived), vec![Advisory::HoldMarginNegative]);
    }

    #[test]
    fn diagnostic_contents() {
        let derived = derive(TimingParameters::new(10.0, 1.0, 0.5, 0.0, 0.0, -0.25, 0.0));
        let diag = Advisory::SetupMarginNegative.to_diagnostic(&derived);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.code.to_string(), "T001");
        assert_eq!(diag.message, "overall setup margin <0");
        assert_eq!(diag.notes, vec!["overall setup margin is -0.25"]);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn display_matches_message() {
        assert_eq!(Advisory::HoldMarginNegative.to_string(), "overall hold margin <0");
        assert_eq!(Advisory::HoldMarginNegative.code().to_string(), "T002");
    }
}
