//! Caller-supplied inputs of a timing budget analysis.

use crate::error::TimingError;
use serde::{Deserialize, Serialize};
use ssync_common::Frequency;

/// Clock period, nominal device setup/hold and the four safety margins.
///
/// All values share one time unit (nanoseconds by convention). Setup, hold
/// and the margins may be zero or negative when the device datasheet defines
/// them with that sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingParameters {
    /// Clock period. Assumed positive.
    pub period: f64,
    /// Nominal device setup time.
    pub setup: f64,
    /// Nominal device hold time.
    pub hold: f64,
    /// Extra setup margin the source adds on top of the nominal setup time.
    pub source_setup_margin: f64,
    /// Extra hold margin the source adds on top of the nominal hold time.
    pub source_hold_margin: f64,
    /// Setup margin the sink reserves out of the nominal setup time.
    pub sink_setup_margin: f64,
    /// Hold margin the sink reserves out of the nominal hold time.
    pub sink_hold_margin: f64,
}

impl TimingParameters {
    /// Creates a parameter set. No value is checked.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        period: f64,
        setup: f64,
        hold: f64,
        source_setup_margin: f64,
        source_hold_margin: f64,
        sink_setup_margin: f64,
        sink_hold_margin: f64,
    ) -> Self {
        Self {
            period,
            setup,
            hold,
            source_setup_margin,
            source_hold_margin,
            sink_setup_margin,
            sink_hold_margin,
        }
    }

    /// Creates a parameter set whose period (in ns) is derived from a clock
    /// frequency.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::InvalidFrequency`] for a non-positive frequency.
    #[allow(clippy::too_many_arguments)]
    pub fn from_frequency(
        frequency: Frequency,
        setup: f64,
        hold: f64,
        source_setup_margin: f64,
        source_hold_margin: f64,
        sink_setup_margin: f64,
        sink_hold_margin: f64,
    ) -> Result<Self, TimingError> {
        let period = frequency
            .period_ns()
            .ok_or(TimingError::InvalidFrequency(frequency))?;
        Ok(Self::new(
            period,
            setup,
            hold,
            source_setup_margin,
            source_hold_margin,
            sink_setup_margin,
            sink_hold_margin,
        ))
    }

    /// Returns every parameter with its field name, in declaration order.
    pub fn named_values(&self) -> [(&'static str, f64); 7] {
        [
            ("period", self.period),
            ("setup", self.setup),
            ("hold", self.hold),
            ("source_setup_margin", self.source_setup_margin),
            ("source_hold_margin", self.source_hold_margin),
            ("sink_setup_margin", self.sink_setup_margin),
            ("sink_hold_margin", self.sink_hold_margin),
        ]
    }

    /// Checks that every value is finite and the period is positive.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in field order.
    pub fn validate(&self) -> Result<(), TimingError> {
        if let Some(&(field, value)) = self.named_values().iter().find(|(_, v)| !v.is_finite()) {
            return Err(TimingError::NonFinite { field, value });
        }
        if self.period <= 0.0 {
            return Err(TimingError::NonPositivePeriod {
                period: self.period,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> TimingParameters {
        TimingParameters::new(10.0, 1.0, 0.5, 0.2, 0.1, 0.3, 0.1)
    }

    #[test]
    fn named_values_in_order() {
        let names: Vec<_> = example().named_values().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "period",
                "setup",
                "hold",
                "source_setup_margin",
                "source_hold_margin",
                "sink_setup_margin",
                "sink_hold_margin"
            ]
        );
    }

    #[test]
    fn validate_accepts_negative_margins() {
        let params = TimingParameters::new(8.0, -0.5, -0.2, -0.1, 0.0, 1.5, -0.3);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite() {
        let mut params = example();
        params.sink_hold_margin = f64::INFINITY;
        assert!(matches!(
            params.validate(),
            Err(TimingError::NonFinite {
                field: "sink_hold_margin",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_zero_period() {
        let mut params = example();
        params.period = 0.0;
        assert_eq!(
            params.validate(),
            Err(TimingError::NonPositivePeriod { period: 0.0 })
        );
    }

    #[test]
    fn from_frequency_derives_period() {
        let params =
            TimingParameters::from_frequency(Frequency::from_mhz(125.0), 1.0, 0.5, 0.0, 0.0, 0.0, 0.0)
                .unwrap();
        assert!((params.period - 8.0).abs() < 1e-12);
        assert_eq!(params.setup, 1.0);
    }

    #[test]
    fn from_frequency_rejects_zero() {
        let err =
            TimingParameters::from_frequency(Frequency::new(0.0), 1.0, 0.5, 0.0, 0.0, 0.0, 0.0)
                .unwrap_err();
        assert!(matches!(err, TimingError::InvalidFrequency(_)));
    }
}
