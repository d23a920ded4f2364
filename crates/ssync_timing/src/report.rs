//! Constraint report generation.
//!
//! A report turns a [`TimingModel`] into directives for a constraint-driven
//! implementation toolchain: the source side gets `set_output_delay`, the
//! sink side `set_input_delay`. Each report starts with the computed delay
//! window as `#` comments so the numbers can be checked at a glance.
//!
//! The directive syntax lives behind [`ConstraintReportFormatter`] so the
//! arithmetic in [`crate::model`] never depends on a particular tool.

use crate::model::TimingModel;
use serde::{Deserialize, Serialize};
use ssync_common::{format_g, format_shortest};

/// Produces the source- and sink-side constraint text for a model.
///
/// Implementations must be pure: the same model always yields identical text.
pub trait ConstraintReportFormatter {
    /// Output delay constraints for the driving side.
    fn source_constraints(&self, model: &TimingModel) -> String;

    /// Input delay constraints for the receiving side.
    fn sink_constraints(&self, model: &TimingModel) -> String;
}

/// Clock and data port names substituted into the directives.
///
/// The defaults are placeholders the user replaces with real design names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintPorts {
    /// Clock the source launches data with.
    pub source_clock: String,
    /// Clock the sink captures data with.
    pub sink_clock: String,
    /// The data port (or port collection pattern).
    pub data_port: String,
}

impl Default for ConstraintPorts {
    fn default() -> Self {
        Self {
            source_clock: "<CLK_OUT>".into(),
            sink_clock: "<CLK>".into(),
            data_port: "<DATA>".into(),
        }
    }
}

/// Joins report lines, terminating every line with `\n`.
fn lines_to_text(lines: &[String]) -> String {
    lines.iter().flat_map(|l| [l.as_str(), "\n"]).collect()
}

/// Tcl report that restates the margin arithmetic in named variables.
///
/// The margin-adjusted setup/hold values are recomputed in the script from
/// the nominal values and the margins, so the arithmetic is auditable in the
/// constraint file itself.
///
/// `#` comment lines use six significant digits ([`format_g`]); `set`
/// values are written exactly ([`format_shortest`]), switching to exponent
/// notation such as `1e-07` outside `1e-4..1e16`.
#[derive(Debug, Clone, Default)]
pub struct TclVariableFormatter {
    /// Port names used in the directives.
    pub ports: ConstraintPorts,
}

impl TclVariableFormatter {
    /// Creates a formatter with the given port names.
    pub fn new(ports: ConstraintPorts) -> Self {
        Self { ports }
    }
}

impl ConstraintReportFormatter for TclVariableFormatter {
    fn source_constraints(&self, model: &TimingModel) -> String {
        let p = model.parameters();
        let d = model.derived();
        let clock = &self.ports.source_clock;
        let data = &self.ports.data_port;
        lines_to_text(&[
            format!("# output delay min: {}", format_g(d.source_min_output_delay)),
            format!("# output delay max: {}", format_g(d.source_max_output_delay)),
            format!("set t_SU {}", format_shortest(p.setup)),
            format!("set t_HO {}", format_shortest(p.hold)),
            format!("set t_SU_margin {}", format_shortest(p.source_setup_margin)),
            format!("set t_HO_margin {}", format_shortest(p.source_hold_margin)),
            "set t_SU_value [expr t_SU + t_SU_margin]".into(),
            "set t_HO_value [expr t_HO + t_HO_margin]".into(),
            format!("set_output_delay -clock {clock} -min [get_ports {data}] [expr -$t_HO_value]"),
            format!(
                "set_output_delay -clock {clock} -max -add_delay [get_ports {data}] $t_SU_value"
            ),
        ])
    }

    fn sink_constraints(&self, model: &TimingModel) -> String {
        let p = model.parameters();
        let d = model.derived();
        let clock = &self.ports.sink_clock;
        let data = &self.ports.data_port;
        lines_to_text(&[
            format!("# input delay min: {}", format_g(d.sink_min_input_delay)),
            format!("# input delay max: {}", format_g(d.sink_max_input_delay)),
            format!("set t_SU {}", format_shortest(p.setup)),
            format!("set t_HO {}", format_shortest(p.hold)),
            format!("set period {}", format_shortest(p.period)),
            format!("set t_SU_margin {}", format_shortest(p.sink_setup_margin)),
            format!("set t_HO_margin {}", format_shortest(p.sink_hold_margin)),
            "set t_SU_value [expr t_SU - t_SU_margin]".into(),
            "set t_HO_value [expr t_HO - t_HO_margin]".into(),
            format!("set_input_delay -clock {clock} -min [get_ports {data}] $t_HO_value"),
            format!(
                "set_input_delay -clock {clock} -max -add_delay [get_ports {data}] \
                 [expr $period - $t_SU_value]"
            ),
        ])
    }
}

/// Report with the computed delays written as literal numbers.
///
/// For toolchains that accept SDC directives but do not evaluate Tcl `expr`.
#[derive(Debug, Clone, Default)]
pub struct LiteralDelayFormatter {
    /// Port names used in the directives.
    pub ports: ConstraintPorts,
}

impl LiteralDelayFormatter {
    /// Creates a formatter with the given port names.
    pub fn new(ports: ConstraintPorts) -> Self {
        Self { ports }
    }
}

impl ConstraintReportFormatter for LiteralDelayFormatter {
    fn source_constraints(&self, model: &TimingModel) -> String {
        let d = model.derived();
        let clock = &self.ports.source_clock;
        let data = &self.ports.data_port;
        lines_to_text(&[
            format!("# output delay min: {}", format_g(d.source_min_output_delay)),
            format!("# output delay max: {}", format_g(d.source_max_output_delay)),
            format!(
                "set_output_delay -clock {clock} -min [get_ports {data}] {}",
                format_shortest(d.source_min_output_delay)
            ),
            format!(
                "set_output_delay -clock {clock} -max -add_delay [get_ports {data}] {}",
                format_shortest(d.source_max_output_delay)
            ),
        ])
    }

    fn sink_constraints(&self, model: &TimingModel) -> String {
        let d = model.derived();
        let clock = &self.ports.sink_clock;
        let data = &self.ports.data_port;
        lines_to_text(&[
            format!("# input delay min: {}", format_g(d.sink_min_input_delay)),
            format!("# input delay max: {}", format_g(d.sink_max_input_delay)),
            format!(
                "set_input_delay -clock {clock} -min [get_ports {data}] {}",
                format_shortest(d.sink_min_input_delay)
            ),
            format!(
                "set_input_delay -clock {clock} -max -add_delay [get_ports {data}] {}",
                format_shortest(d.sink_max_input_delay)
            ),
        ])
    }
}
