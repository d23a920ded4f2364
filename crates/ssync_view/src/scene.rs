//! Geometry of the timing diagram.
//!
//! [`Diagram::build`] turns a timing budget into plain plot-space primitives:
//! sampled traces, vertical reference lines, annotated arrows, shaded time
//! spans and free text. Nothing here touches the terminal, so the whole
//! layout can be checked without a backend.
//!
//! The diagram has three lanes stacked bottom to top: sink data, source data
//! and the clock. Each data lane draws the signal and its complement, so the
//! old/new data transitions show up as crossing edges.

use ssync_common::format_g;
use ssync_timing::{DerivedTiming, TimingModel, TimingParameters};

use crate::style::DiagramStyle;

/// Upper bound on samples per trace. Extreme setup/hold values relative to
/// the period would otherwise produce unbounded sample vectors.
const MAX_SAMPLES: usize = 100_000;

/// The sampled time window `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    /// First sample time (negative: before the launching clock edge).
    pub begin: f64,
    /// End of the window, exclusive.
    pub end: f64,
    /// Distance between samples.
    pub step: f64,
}

impl TimeWindow {
    /// Computes the window covering the setup extent before 0 and the hold
    /// extent after one period.
    pub fn new(period: f64, derived: &DerivedTiming, style: &DiagramStyle) -> Self {
        let min_extent = period * style.min_extent_fraction;
        let before = derived
            .source_setup
            .max(derived.sink_setup)
            .max(min_extent);
        let after = derived.source_hold.max(derived.sink_hold).max(min_extent);
        Self {
            begin: -before * style.window_padding,
            end: after * style.window_padding + period,
            step: period / f64::from(style.samples_per_period),
        }
    }

    /// Returns the sample times. Empty when the window cannot be sampled
    /// (non-positive or non-finite step, or an empty window).
    pub fn sample_times(&self) -> Vec<f64> {
        let span = self.end - self.begin;
        if !(self.step > 0.0 && self.step.is_finite() && span > 0.0 && span.is_finite()) {
            return Vec::new();
        }
        let mut count = (span / self.step).ceil() as usize;
        let mut step = self.step;
        if count > MAX_SAMPLES {
            count = MAX_SAMPLES;
            step = span / MAX_SAMPLES as f64;
        }
        (0..count).map(|i| self.begin + i as f64 * step).collect()
    }
}

/// 50% duty cycle clock: 1 during the first half of each period, else 0.
pub fn clock_value(t: f64, period: f64) -> f64 {
    if t.rem_euclid(period) < period / 2.0 {
        1.0
    } else {
        0.0
    }
}

/// Data validity between two transitions.
///
/// 0 before `old_end - slope`, a linear ramp to 1 centered on `old_end`,
/// 1 until `new_start - slope`, a linear ramp back to 0 centered on
/// `new_start`, and 0 afterwards.
pub fn data_value(t: f64, old_end: f64, new_start: f64, slope: f64) -> f64 {
    if t < old_end - slope {
        0.0
    } else if t < old_end + slope {
        (t - old_end) / (2.0 * slope) + 0.5
    } else if t < new_start - slope {
        1.0
    } else if t < new_start + slope {
        -(t - new_start) / (2.0 * slope) + 0.5
    } else {
        0.0
    }
}

/// A polyline in plot space.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// `(time, y)` points in ascending time order.
    pub points: Vec<(f64, f64)>,
}

/// Which side of its anchor a label extends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// The label starts at the anchor and extends right.
    Left,
    /// The label ends at the anchor.
    Right,
}

/// A horizontal arrow from `from` to `to` at height `y` with a label.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    /// Tail time.
    pub from: f64,
    /// Head time.
    pub to: f64,
    /// Height of the shaft.
    pub y: f64,
    /// Label text, e.g. `t_SU=1.2`.
    pub label: String,
    /// Anchor the label at the tail instead of the head.
    pub label_at_start: bool,
}

impl Arrow {
    /// Returns the label's anchor time and alignment.
    ///
    /// The label sits just outside the arrow on the side of the chosen end,
    /// pointing away from the shaft, so it stays clear of the busy center of
    /// the diagram.
    pub fn label_anchor(&self, padding: f64) -> (f64, Align) {
        let rightwards = self.from < self.to;
        if self.label_at_start {
            if rightwards {
                (self.from - padding, Align::Right)
            } else {
                (self.from + padding, Align::Left)
            }
        } else if rightwards {
            (self.to + padding, Align::Left)
        } else {
            (self.to - padding, Align::Right)
        }
    }

    /// Returns the two strokes of the arrow head, or nothing for a
    /// zero-length arrow.
    pub fn head_strokes(&self, length: f64, height: f64) -> Vec<((f64, f64), (f64, f64))> {
        if self.from == self.to {
            return Vec::new();
        }
        let back = if self.to > self.from { -length } else { length };
        let tip = (self.to, self.y);
        vec![
            (tip, (self.to + back, self.y + height)),
            (tip, (self.to + back, self.y - height)),
        ]
    }
}

/// The two kinds of shaded area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeKind {
    /// The device's nominal setup/hold window.
    SetupHold,
    /// The extra window claimed only by the source margins.
    SourceMargin,
}

impl ShadeKind {
    /// Legend text.
    pub fn label(self) -> &'static str {
        match self {
            ShadeKind::SetupHold => "Setup/Hold Area",
            ShadeKind::SourceMargin => "Source Margin",
        }
    }
}

/// A shaded time span covering the full plot height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    /// Start time (always `<= end`).
    pub start: f64,
    /// End time.
    pub end: f64,
    /// What the span marks.
    pub kind: ShadeKind,
}

impl Shade {
    fn between(a: f64, b: f64, kind: ShadeKind) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
            kind,
        }
    }

    /// Returns `true` if `t` lies inside the span.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Free text, one entry per line, vertically centered on `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Anchor time.
    pub x: f64,
    /// Vertical center.
    pub y: f64,
    /// Text lines, top to bottom.
    pub lines: Vec<String>,
    /// Horizontal alignment relative to `x`.
    pub align: Align,
}

/// A fully laid out timing diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    /// Plot x range (the time window).
    pub x_bounds: [f64; 2],
    /// Plot y range, bottom clamped to 0.
    pub y_bounds: [f64; 2],
    /// Clock, then source value/complement, then sink value/complement.
    pub traces: Vec<Trace>,
    /// Times of the vertical reference lines.
    pub markers: Vec<f64>,
    /// Annotated interval arrows.
    pub arrows: Vec<Arrow>,
    /// Shaded spans in drawing order.
    pub shades: Vec<Shade>,
    /// Lane captions.
    pub texts: Vec<TextLabel>,
    /// Axis tick labels on the time axis.
    pub ticks: Vec<(f64, String)>,
    /// Anchor offset for labels, in time units.
    pub label_padding: f64,
    /// Arrow head length, in time units.
    pub arrow_head_length: f64,
    /// Advisory messages shown above the diagram.
    pub warnings: Vec<String>,
}

impl Diagram {
    /// Lays out the diagram of a timing model, including its advisories.
    pub fn from_model(model: &TimingModel, style: &DiagramStyle) -> Self {
        let mut diagram = Self::build(model.parameters(), model.derived(), style);
        diagram.warnings = model
            .advisories()
            .iter()
            .map(|a| format!("WARNING: {a}"))
            .collect();
        diagram
    }

    /// Lays out the diagram for the given inputs and derived budget.
    ///
    /// Any numeric record is drawn as given; an infeasible budget simply
    /// produces crossed arrows.
    pub fn build(params: &TimingParameters, d: &DerivedTiming, style: &DiagramStyle) -> Self {
        let period = params.period;
        let window = TimeWindow::new(period, d, style);
        let times = window.sample_times();
        let slope = period * style.slope_fraction;
        let pad = period * style.label_padding_fraction;

        let mut traces = vec![Trace {
            points: times
                .iter()
                .map(|&t| (t, clock_value(t, period) + style.clock_lane))
                .collect(),
        }];
        for (old_end, new_start, lane) in [
            (d.source_hold, period - d.source_setup, style.source_lane),
            (d.sink_hold, period - d.sink_setup, style.sink_lane),
        ] {
            let values: Vec<f64> = times
                .iter()
                .map(|&t| data_value(t, old_end, new_start, slope))
                .collect();
            traces.push(Trace {
                points: times.iter().zip(&values).map(|(&t, &v)| (t, v + lane)).collect(),
            });
            traces.push(Trace {
                points: times
                    .iter()
                    .zip(&values)
                    .map(|(&t, &v)| (t, 1.0 - v + lane))
                    .collect(),
            });
        }

        let markers = vec![
            0.0,
            d.source_hold,
            d.sink_hold,
            period - d.source_setup,
            period - d.sink_setup,
            period,
        ];

        let arrow = |from: f64, to: f64, lane: f64, name: &str, value: f64, at_start: bool| Arrow {
            from,
            to,
            y: lane - 0.5,
            label: format!("{name}={}", format_g(value)),
            label_at_start: at_start,
        };
        let (clk, src, snk) = (style.clock_lane, style.source_lane, style.sink_lane);
        let arrows = vec![
            arrow(d.sink_hold, d.source_hold, clk, "margin_HO", d.overall_hold_margin, true),
            arrow(
                period - d.sink_setup,
                period - d.source_setup,
                clk,
                "margin_SU",
                d.overall_setup_margin,
                true,
            ),
            arrow(0.0, d.source_hold, src, "t_HO", d.source_hold, true),
            arrow(period, period - d.source_setup, src, "t_SU", d.source_setup, true),
            arrow(0.0, d.sink_hold, snk, "t_HO", d.sink_hold, true),
            arrow(period, period - d.sink_setup, snk, "t_SU", d.sink_setup, true),
            arrow(
                d.source_hold,
                0.0,
                src - 0.5,
                "out_min",
                d.source_min_output_delay,
                false,
            ),
            arrow(
                period,
                period - d.source_max_output_delay,
                src - 0.5,
                "out_max",
                d.source_max_output_delay,
                true,
            ),
            arrow(0.0, d.sink_hold, snk - 0.5, "in_min", d.sink_min_input_delay, true),
            arrow(
                0.0,
                d.sink_max_input_delay,
                snk - 1.0,
                "in_max",
                d.sink_max_input_delay,
                true,
            ),
        ];

        let shades = vec![
            Shade::between(-params.setup, params.hold, ShadeKind::SetupHold),
            Shade::between(params.hold, d.source_hold, ShadeKind::SourceMargin),
            Shade::between(period - params.setup, period + params.hold, ShadeKind::SetupHold),
            Shade::between(period - d.source_setup, period - params.setup, ShadeKind::SourceMargin),
        ];

        let caption = |x: f64, lane: f64, side: &str, age: &str, align: Align| TextLabel {
            x,
            y: lane + 0.5,
            lines: vec![side.to_string(), format!("{age} Data")],
            align,
        };
        let texts = vec![
            caption(-pad, snk, "Sink", "Old", Align::Right),
            caption(-pad, src, "Source", "Old", Align::Right),
            caption(period + pad, snk, "Sink", "New", Align::Left),
            caption(period + pad, src, "Source", "New", Align::Left),
        ];

        Self {
            x_bounds: [window.begin, window.end],
            y_bounds: [0.0, style.y_max],
            traces,
            markers,
            arrows,
            shades,
            texts,
            ticks: vec![(0.0, "0".into()), (period, format_g(period))],
            label_padding: pad,
            arrow_head_length: period * style.arrow_head_fraction,
            warnings: Vec::new(),
        }
    }

    /// The shade kinds in legend order.
    pub fn legend(&self) -> [ShadeKind; 2] {
        [ShadeKind::SetupHold, ShadeKind::SourceMargin]
    }

    /// The last shade covering `t`, which is the one drawn on top.
    pub fn shade_at(&self, t: f64) -> Option<ShadeKind> {
        self.shades.iter().rev().find(|s| s.contains(t)).map(|s| s.kind)
    }
}
