//! Clock frequencies with unit parsing and period conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit suffixes accepted by [`Frequency::from_str`], longest first so that
/// `"mhz"` is tried before the bare `"hz"`.
const UNITS: [(&str, f64); 4] = [
    ("ghz", 1_000_000_000.0),
    ("mhz", 1_000_000.0),
    ("khz", 1_000.0),
    ("hz", 1.0),
];

/// A clock frequency stored in Hertz.
///
/// Parses from strings like `"100MHz"`, `"1.5GHz"`, `"48000Hz"` or a bare
/// number of Hertz. The main use is [`period_ns`](Self::period_ns), which
/// turns a board clock into the period the timing model works with.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency(f64);

impl Frequency {
    /// Creates a frequency from a value in Hertz.
    pub fn new(hz: f64) -> Self {
        Self(hz)
    }

    /// Creates a frequency from a value in megahertz.
    pub fn from_mhz(mhz: f64) -> Self {
        Self(mhz * 1_000_000.0)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> f64 {
        self.0
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> f64 {
        self.0 / 1_000_000.0
    }

    /// Returns the clock period in nanoseconds, or `None` for a
    /// non-positive frequency.
    pub fn period_ns(&self) -> Option<f64> {
        (self.0 > 0.0).then(|| 1_000_000_000.0 / self.0)
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        if hz >= 1_000_000_000.0 {
            write!(f, "{}GHz", hz / 1_000_000_000.0)
        } else if hz >= 1_000_000.0 {
            write!(f, "{}MHz", hz / 1_000_000.0)
        } else if hz >= 1_000.0 {
            write!(f, "{}KHz", hz / 1_000.0)
        } else {
            write!(f, "{hz}Hz")
        }
    }
}

/// Error returned when a frequency string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (number, scale) = UNITS
            .iter()
            .find_map(|&(suffix, scale)| lower.strip_suffix(suffix).map(|n| (n, scale)))
            .unwrap_or((lower.as_str(), 1.0));

        let value: f64 = number.trim().parse().map_err(|_| err())?;
        Ok(Frequency(value * scale))
    }
}
