//! Layout and color configuration of the timing diagram.
//!
//! All geometry is expressed in plot units: the x axis is time (same unit as
//! the clock period), the y axis stacks the three lanes. Fractions are
//! relative to the clock period so one style fits any clock.

use crate::error::StyleError;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Diagram layout and colors.
///
/// Every field has a default, so a TOML fragment only needs the values it
/// overrides:
///
/// ```
/// use ssync_view::DiagramStyle;
///
/// let style = DiagramStyle::from_toml_str("samples_per_period = 200").unwrap();
/// assert_eq!(style.samples_per_period, 200);
/// assert_eq!(style.clock_lane, 6.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramStyle {
    /// Baseline of the clock trace.
    pub clock_lane: f64,
    /// Baseline of the source data traces.
    pub source_lane: f64,
    /// Baseline of the sink data traces.
    pub sink_lane: f64,
    /// Top of the plotting band. The bottom is always 0.
    pub y_max: f64,
    /// Sampling resolution of the traces.
    pub samples_per_period: u32,
    /// Half-width of a data edge ramp.
    pub slope_fraction: f64,
    /// Smallest extent shown before 0 and after one period.
    pub min_extent_fraction: f64,
    /// Multiplier applied to both window extents.
    pub window_padding: f64,
    /// Gap between an anchor and its label.
    pub label_padding_fraction: f64,
    /// Horizontal length of an arrow head.
    pub arrow_head_fraction: f64,
    /// Vertical half-height of an arrow head, in lane units.
    pub arrow_head_height: f64,
    /// Width in cells used for headless rendering.
    pub width: u16,
    /// Height in cells used for headless rendering.
    pub height: u16,
    /// Color of the signal traces and arrows.
    pub trace_color: Color,
    /// Color of the vertical reference lines.
    pub marker_color: Color,
    /// Shading of the device setup/hold window.
    pub setup_hold_color: Color,
    /// Shading of the source-only margin.
    pub source_margin_color: Color,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            clock_lane: 6.5,
            source_lane: 4.5,
            sink_lane: 2.0,
            y_max: 8.0,
            samples_per_period: 1000,
            slope_fraction: 0.01,
            min_extent_fraction: 0.1,
            window_padding: 1.1,
            label_padding_fraction: 0.01,
            arrow_head_fraction: 0.01,
            arrow_head_height: 0.15,
            width: 140,
            height: 50,
            trace_color: Color::White,
            marker_color: Color::DarkGray,
            setup_hold_color: Color::Rgb(0x1f, 0x4d, 0x1f),
            source_margin_color: Color::Rgb(0x44, 0x44, 0x44),
        }
    }
}

impl DiagramStyle {
    /// Parses a style from a TOML fragment and validates it.
    ///
    /// # Errors
    ///
    /// [`StyleError::ParseError`] for malformed TOML or unknown keys,
    /// [`StyleError::ValidationError`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, StyleError> {
        let style: DiagramStyle =
            toml::from_str(content).map_err(|e| StyleError::ParseError(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    /// Checks that the style can produce a diagram.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ValidationError`] naming the first bad field.
    pub fn validate(&self) -> Result<(), StyleError> {
        let invalid = |msg: &str| Err(StyleError::ValidationError(msg.to_string()));
        if self.samples_per_period == 0 {
            return invalid("samples_per_period must be positive");
        }
        if self.y_max.is_nan() || self.y_max <= 0.0 {
            return invalid("y_max must be positive");
        }
        if self.window_padding.is_nan() || self.window_padding <= 0.0 {
            return invalid("window_padding must be positive");
        }
        if self.slope_fraction < 0.0 || self.min_extent_fraction < 0.0 {
            return invalid("fractions must not be negative");
        }
        if self.width < 8 || self.height < 4 {
            return invalid("width must be at least 8 and height at least 4 cells");
        }
        Ok(())
    }
}
