//! Text renderers for emitted constraint statements.
//!
//! Two dialects are supported:
//!
//! - [`XdcRenderer`]: Tcl commands understood by XDC/SDC-consuming tools
//!   (`create_clock`, `set_input_delay`, `set_output_delay`,
//!   `set_false_path`)
//! - [`CanonicalRenderer`]: a tool-neutral `keyword args` form, one
//!   statement per line, for diffing and for adapters to other syntaxes
//!
//! Numbers are printed with a fixed number of decimals so output is stable.

use crate::emit::Statement;
use crate::model::{Direction, EndpointRole};
use chronos_config::Dialect;

/// Renders statements into single lines of text.
pub trait StatementRenderer {
    /// Renders one statement, without a trailing newline.
    fn render(&self, statement: &Statement) -> String;

    /// Renders a comment line.
    fn comment(&self, text: &str) -> String {
        format!("# {text}")
    }
}

/// Returns the renderer for a dialect.
pub fn renderer_for(dialect: Dialect, precision: usize) -> Box<dyn StatementRenderer> {
    match dialect {
        Dialect::Xdc => Box::new(XdcRenderer::new(precision)),
        Dialect::Canonical => Box::new(CanonicalRenderer::new(precision)),
    }
}

/// Renders Tcl-style XDC/SDC commands.
#[derive(Debug, Clone, Copy)]
pub struct XdcRenderer {
    precision: usize,
}

impl XdcRenderer {
    /// Creates a renderer printing `precision` decimals.
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }
}

impl StatementRenderer for XdcRenderer {
    fn render(&self, statement: &Statement) -> String {
        let p = self.precision;
        match statement {
            Statement::CreateClock {
                name,
                period_ns,
                rise_ns,
                fall_ns,
            } => format!(
                "create_clock -period {} -name {name} -waveform {{{} {}}} {}",
                fixed(*period_ns, p),
                fixed(*rise_ns, p),
                fixed(*fall_ns, p),
                get_ports(name),
            ),
            Statement::SetDelay {
                direction,
                bound,
                clock,
                port,
                width,
                value_ns,
            } => {
                let command = match direction {
                    Direction::Input => "set_input_delay",
                    Direction::Output => "set_output_delay",
                };
                let target = match width {
                    Some(_) => format!("{port}[*]"),
                    None => port.clone(),
                };
                format!(
                    "{command} -clock {clock} -{bound} {} {}",
                    fixed(*value_ns, p),
                    get_ports(&target),
                )
            }
            Statement::FalsePath { role, pattern } => {
                let flag = match role {
                    EndpointRole::From => "-from",
                    EndpointRole::To => "-to",
                };
                format!("set_false_path {flag} {}", get_ports(pattern))
            }
        }
    }
}

/// Renders tool-neutral lines such as `delay input min en aclk 0.200`.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalRenderer {
    precision: usize,
}

impl CanonicalRenderer {
    /// Creates a renderer printing `precision` decimals.
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }
}

impl StatementRenderer for CanonicalRenderer {
    fn render(&self, statement: &Statement) -> String {
        let p = self.precision;
        match statement {
            Statement::CreateClock {
                name,
                period_ns,
                rise_ns,
                fall_ns,
            } => format!(
                "clock {name} period={} waveform={},{}",
                fixed(*period_ns, p),
                fixed(*rise_ns, p),
                fixed(*fall_ns, p),
            ),
            Statement::SetDelay {
                direction,
                bound,
                clock,
                port,
                value_ns,
                ..
            } => format!(
                "delay {direction} {bound} {port} {clock} {}",
                fixed(*value_ns, p)
            ),
            Statement::FalsePath { role, pattern } => format!("false_path {role} {pattern}"),
        }
    }
}

/// Wraps a port name or pattern in `[get_ports ...]`, bracing it when it
/// contains Tcl-significant brackets.
fn get_ports(target: &str) -> String {
    if target.contains('[') {
        format!("[get_ports {{{target}}}]")
    } else {
        format!("[get_ports {target}]")
    }
}

/// Formats with a fixed number of decimals. Anything that rounds to zero
/// prints without a sign.
fn fixed(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundKind;

    fn clock() -> Statement {
        Statement::CreateClock {
            name: "aclk".to_string(),
            period_ns: 1.0,
            rise_ns: 0.0,
            fall_ns: 0.5,
        }
    }

    fn delay(
        direction: Direction,
        bound: BoundKind,
        port: &str,
        width: Option<u32>,
        v: f64,
    ) -> Statement {
        Statement::SetDelay {
            direction,
            bound,
            clock: "aclk".to_string(),
            port: port.to_string(),
            width,
            value_ns: v,
        }
    }

    #[test]
    fn xdc_create_clock() {
        let r = XdcRenderer::new(3);
        assert_eq!(
            r.render(&clock()),
            "create_clock -period 1.000 -name aclk -waveform {0.000 0.500} [get_ports aclk]"
        );
    }

    #[test]
    fn xdc_scalar_and_vector_delays() {
        let r = XdcRenderer::new(3);
        assert_eq!(
            r.render(&delay(Direction::Input, BoundKind::Min, "en", None, 0.2)),
            "set_input_delay -clock aclk -min 0.200 [get_ports en]"
        );
        assert_eq!(
            r.render(&delay(Direction::Input, BoundKind::Max, "PINC_REG", Some(32), 0.4)),
            "set_input_delay -clock aclk -max 0.400 [get_ports {PINC_REG[*]}]"
        );
        assert_eq!(
            r.render(&delay(Direction::Output, BoundKind::Max, "dout_valid", None, 0.3)),
            "set_output_delay -clock aclk -max 0.300 [get_ports dout_valid]"
        );
    }

    #[test]
    fn xdc_false_path_roles() {
        let r = XdcRenderer::new(3);
        let to = Statement::FalsePath {
            role: EndpointRole::To,
            pattern: "dout*".to_string(),
        };
        assert_eq!(r.render(&to), "set_false_path -to [get_ports dout*]");
        let from = Statement::FalsePath {
            role: EndpointRole::From,
            pattern: "dout[3]".to_string(),
        };
        assert_eq!(r.render(&from), "set_false_path -from [get_ports {dout[3]}]");
    }

    #[test]
    fn canonical_lines() {
        let r = CanonicalRenderer::new(3);
        assert_eq!(r.render(&clock()), "clock aclk period=1.000 waveform=0.000,0.500");
        assert_eq!(
            r.render(&delay(Direction::Output, BoundKind::Min, "dout", Some(16), 0.0)),
            "delay output min dout aclk 0.000"
        );
        let fp = Statement::FalsePath {
            role: EndpointRole::To,
            pattern: "dout*".to_string(),
        };
        assert_eq!(r.render(&fp), "false_path to dout*");
    }

    #[test]
    fn precision_and_negative_zero() {
        assert_eq!(fixed(-0.0, 3), "0.000");
        assert_eq!(fixed(-0.26, 1), "-0.3");
        assert_eq!(fixed(0.123456, 0), "0");
        assert_eq!(fixed(1.5, 4), "1.5000");
    }

    #[test]
    fn values_rounding_to_zero_lose_sign() {
        assert_eq!(fixed(-0.0001, 3), "0.000");
        assert_eq!(fixed(-0.0004, 3), "0.000");
        assert_eq!(fixed(-0.4, 0), "0");
        assert_eq!(fixed(-0.0006, 3), "-0.001");
        assert_eq!(
            XdcRenderer::new(3).render(&delay(
                Direction::Input,
                BoundKind::Min,
                "en",
                None,
                -0.0001
            )),
            "set_input_delay -clock aclk -min 0.000 [get_ports en]"
        );
    }

    #[test]
    fn comment_default() {
        assert_eq!(XdcRenderer::new(3).comment("hdr"), "# hdr");
        assert_eq!(renderer_for(Dialect::Canonical, 3).comment("x"), "# x");
    }
}
