//! The constraint model: clocks, ports, delay bounds, and path exceptions.
//!
//! A [`ConstraintSet`] is built through explicit calls, checked by
//! [`validate`](crate::validate()), and then frozen. Builder calls reject
//! structurally invalid declarations immediately; cross-cutting consistency
//! (complete min/max pairs, min ≤ max) is left to validation so a set can be
//! authored in any order.

use crate::error::{ConstraintError, ValidationError};
use crate::ids::{ClockRef, PortRef};
use crate::pattern::PortPattern;
use chronos_common::{Ident, Interner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Signal direction at the design boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Driven from outside the design.
    Input,
    /// Driven by the design.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

/// Which end of the permissible delay window a constraint bounds.
///
/// `Min` orders before `Max`; emission relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundKind {
    /// Earliest permissible delay (hold side).
    Min,
    /// Latest permissible delay (setup side).
    Max,
}

impl BoundKind {
    /// The opposite bound kind.
    pub fn other(self) -> Self {
        match self {
            BoundKind::Min => BoundKind::Max,
            BoundKind::Max => BoundKind::Min,
        }
    }
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundKind::Min => write!(f, "min"),
            BoundKind::Max => write!(f, "max"),
        }
    }
}

/// The clock of a constraint set.
///
/// Edges satisfy `0 <= rise_ns < fall_ns <= period_ns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    /// Clock name.
    pub name: Ident,
    /// Clock period in nanoseconds.
    pub period_ns: f64,
    /// Rising edge time within the period.
    pub rise_ns: f64,
    /// Falling edge time within the period.
    pub fall_ns: f64,
}

impl Clock {
    /// Returns the clock frequency in MHz.
    pub fn frequency_mhz(&self) -> f64 {
        1000.0 / self.period_ns
    }

    /// Returns the fraction of the period the clock is high.
    pub fn duty_cycle(&self) -> f64 {
        (self.fall_ns - self.rise_ns) / self.period_ns
    }
}

/// A top-level port of the constrained design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Port name.
    pub name: Ident,
    /// Declared direction.
    pub direction: Direction,
    /// Bit width of a vectored port; `None` for a scalar.
    pub width: Option<u32>,
}

impl Port {
    /// Returns `true` for vectored (bus) ports.
    pub fn is_vectored(&self) -> bool {
        self.width.is_some()
    }
}

/// One min or max bound on a port's external delay, relative to the rising
/// edge of the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayConstraint {
    /// The constrained port.
    pub port: PortRef,
    /// The reference clock.
    pub clock: ClockRef,
    /// Input or output delay.
    pub direction: Direction,
    /// Min or max bound.
    pub bound: BoundKind,
    /// Delay in nanoseconds. May be negative.
    pub value_ns: f64,
}

/// Which end of a path an exception pattern selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointRole {
    /// Paths starting at the matched ports.
    From,
    /// Paths ending at the matched ports.
    To,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::From => write!(f, "from"),
            EndpointRole::To => write!(f, "to"),
        }
    }
}

/// A false-path exception: matched paths are excluded from setup/hold checks.
#[derive(Debug, Clone)]
pub struct PathException {
    /// Ports selected by the exception.
    pub pattern: PortPattern,
    /// Whether the pattern selects path sources or destinations.
    pub role: EndpointRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetState {
    Open,
    Validated,
}

/// The aggregate root: one clock, its ports, their delay bounds, and
/// exceptions.
///
/// The set owns the [`Interner`] for its names, so it carries no ambient
/// context. It is write-once: there are no update or removal operations,
/// and once [`validate`](Self::validate) succeeds every builder call fails
/// with [`ConstraintError::AlreadyValidated`].
pub struct ConstraintSet {
    interner: Interner,
    clock: Option<Clock>,
    ports: Vec<Port>,
    port_index: HashMap<Ident, PortRef>,
    delays: Vec<DelayConstraint>,
    exceptions: Vec<PathException>,
    state: SetState,
}

impl ConstraintSet {
    /// Creates an empty, open constraint set.
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            clock: None,
            ports: Vec::new(),
            port_index: HashMap::new(),
            delays: Vec::new(),
            exceptions: Vec::new(),
            state: SetState::Open,
        }
    }

    /// Defines the clock of this set.
    ///
    /// Fails with [`ConstraintError::DuplicateClock`] if a clock exists, and
    /// with [`ConstraintError::InvalidClock`] unless the period is positive
    /// and `0 <= rise_ns < fall_ns <= period_ns`.
    pub fn define_clock(
        &mut self,
        name: &str,
        period_ns: f64,
        rise_ns: f64,
        fall_ns: f64,
    ) -> Result<ClockRef, ConstraintError> {
        self.ensure_open()?;
        if let Some(existing) = &self.clock {
            return Err(ConstraintError::DuplicateClock {
                existing: self.name(existing.name).to_string(),
                name: name.to_string(),
            });
        }

        let invalid = |reason: String| ConstraintError::InvalidClock {
            name: name.to_string(),
            reason,
        };
        if let Some(reason) = name_problem(name) {
            return Err(invalid(reason));
        }
        if !period_ns.is_finite() || period_ns <= 0.0 {
            return Err(invalid(format!("period must be positive, got {period_ns}")));
        }
        if !rise_ns.is_finite() || !fall_ns.is_finite() {
            return Err(invalid("waveform edges must be finite".to_string()));
        }
        if rise_ns < 0.0 || fall_ns > period_ns {
            return Err(invalid(format!(
                "waveform {{{rise_ns} {fall_ns}}} lies outside [0, {period_ns}]"
            )));
        }
        if rise_ns >= fall_ns {
            return Err(invalid(format!(
                "rising edge {rise_ns} must precede falling edge {fall_ns}"
            )));
        }

        self.clock = Some(Clock {
            name: self.interner.get_or_intern(name),
            period_ns,
            rise_ns,
            fall_ns,
        });
        debug!(clock = name, period_ns, rise_ns, fall_ns, "defined clock");
        Ok(ClockRef::from_raw(0))
    }

    /// Declares a port. `width` is the bit width of a vectored port.
    pub fn declare_port(
        &mut self,
        name: &str,
        direction: Direction,
        width: Option<u32>,
    ) -> Result<PortRef, ConstraintError> {
        self.ensure_open()?;
        if let Some(reason) = name_problem(name) {
            return Err(ConstraintError::InvalidPort {
                name: name.to_string(),
                reason,
            });
        }
        if width == Some(0) {
            return Err(ConstraintError::InvalidPort {
                name: name.to_string(),
                reason: "vector width must be at least 1".to_string(),
            });
        }

        let ident = self.interner.get_or_intern(name);
        if self.port_index.contains_key(&ident) {
            return Err(ConstraintError::DuplicatePort {
                name: name.to_string(),
            });
        }

        let port_ref = PortRef::from_raw(self.ports.len() as u32);
        self.ports.push(Port {
            name: ident,
            direction,
            width,
        });
        self.port_index.insert(ident, port_ref);
        debug!(port = name, %direction, ?width, "declared port");
        Ok(port_ref)
    }

    /// Adds one min or max delay bound on `port` relative to `clock`.
    ///
    /// A min bound above the max bound is accepted here and reported by
    /// validation, so bounds may be added in either order.
    pub fn add_delay(
        &mut self,
        port: PortRef,
        clock: ClockRef,
        direction: Direction,
        bound: BoundKind,
        value_ns: f64,
    ) -> Result<(), ConstraintError> {
        self.ensure_open()?;
        let declared = self.port(port)?;
        let port_name = self.name(declared.name).to_string();
        self.clock_for(clock)?;

        if declared.direction != direction {
            return Err(ConstraintError::DirectionMismatch {
                port: port_name,
                declared: declared.direction,
                requested: direction,
            });
        }
        if !value_ns.is_finite() {
            return Err(ConstraintError::InvalidDelay {
                port: port_name,
                bound,
                value: value_ns,
            });
        }
        if self
            .delays
            .iter()
            .any(|d| d.port == port && d.direction == direction && d.bound == bound)
        {
            return Err(ConstraintError::DuplicateBound {
                port: port_name,
                direction,
                bound,
            });
        }

        self.delays.push(DelayConstraint {
            port,
            clock,
            direction,
            bound,
            value_ns,
        });
        debug!(port = %port_name, %direction, %bound, value_ns, "added delay bound");
        Ok(())
    }

    /// Adds a min bound and then a max bound for the same port.
    pub fn add_delay_pair(
        &mut self,
        port: PortRef,
        clock: ClockRef,
        direction: Direction,
        min_ns: f64,
        max_ns: f64,
    ) -> Result<(), ConstraintError> {
        self.add_delay(port, clock, direction, BoundKind::Min, min_ns)?;
        self.add_delay(port, clock, direction, BoundKind::Max, max_ns)
    }

    /// Declares a false path to every port matching `pattern`.
    ///
    /// Fails with [`ConstraintError::UnknownPort`] if nothing matches.
    pub fn add_false_path(&mut self, pattern: &str) -> Result<(), ConstraintError> {
        self.ensure_open()?;
        let pattern = PortPattern::parse(pattern)?;
        let matched = self.resolve_pattern(&pattern);
        if matched.is_empty() {
            return Err(ConstraintError::UnknownPort {
                port: pattern.to_string(),
            });
        }
        debug!(pattern = %pattern, matched = matched.len(), "added false path");
        self.exceptions.push(PathException {
            pattern,
            role: EndpointRole::To,
        });
        Ok(())
    }

    /// Runs [`validate`](crate::validate()) and, on success, freezes the set.
    ///
    /// Validating an already validated set succeeds without re-checking.
    pub fn validate(&mut self) -> Result<(), Vec<ValidationError>> {
        if self.state == SetState::Validated {
            return Ok(());
        }
        crate::validate::validate(self)?;
        self.state = SetState::Validated;
        Ok(())
    }

    /// Returns `true` once validation has succeeded.
    pub fn is_validated(&self) -> bool {
        self.state == SetState::Validated
    }

    /// The clock, if defined.
    pub fn clock(&self) -> Option<&Clock> {
        self.clock.as_ref()
    }

    /// Resolves a port handle.
    pub fn port(&self, port: PortRef) -> Result<&Port, ConstraintError> {
        self.ports
            .get(port.index())
            .ok_or_else(|| ConstraintError::UnknownPort {
                port: format!("#{}", port.as_raw()),
            })
    }

    /// Ports with their handles, in declaration order.
    pub fn ports(&self) -> impl Iterator<Item = (PortRef, &Port)> {
        self.ports
            .iter()
            .enumerate()
            .map(|(i, p)| (PortRef::from_raw(i as u32), p))
    }

    /// Looks up a port handle by name.
    pub fn find_port(&self, name: &str) -> Option<PortRef> {
        let ident = self.interner.get(name)?;
        self.port_index.get(&ident).copied()
    }

    /// All delay bounds in the order they were added.
    pub fn delays(&self) -> &[DelayConstraint] {
        &self.delays
    }

    /// Delay bounds on one port, in the order they were added.
    pub fn delays_for(&self, port: PortRef) -> impl Iterator<Item = &DelayConstraint> {
        self.delays.iter().filter(move |d| d.port == port)
    }

    /// Exceptions in declaration order.
    pub fn exceptions(&self) -> &[PathException] {
        &self.exceptions
    }

    /// Handles of every port matching `pattern`, in declaration order.
    pub fn resolve_pattern(&self, pattern: &PortPattern) -> Vec<PortRef> {
        self.ports()
            .filter(|(_, p)| pattern.matches(p, self.name(p.name)))
            .map(|(r, _)| r)
            .collect()
    }

    /// Resolves a name interned by this set.
    ///
    /// # Panics
    ///
    /// Panics if `ident` was not produced by this set, for example an
    /// [`Ident`] taken from another `ConstraintSet`.
    pub fn name(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    fn clock_for(&self, clock: ClockRef) -> Result<&Clock, ConstraintError> {
        match &self.clock {
            Some(c) if clock.index() == 0 => Ok(c),
            _ => Err(ConstraintError::UnknownClock {
                clock: format!("#{}", clock.as_raw()),
            }),
        }
    }

    fn ensure_open(&self) -> Result<(), ConstraintError> {
        match self.state {
            SetState::Open => Ok(()),
            SetState::Validated => Err(ConstraintError::AlreadyValidated),
        }
    }
}

/// Characters that change the meaning of a Tcl word.
const TCL_METACHARACTERS: [char; 8] = ['{', '}', '[', ']', ';', '$', '"', '\\'];

/// Returns why `name` cannot be written verbatim into a constraint
/// statement, or `None` if it can.
pub(crate) fn name_problem(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("name is empty".to_string());
    }
    if name.chars().any(char::is_whitespace) {
        return Some("name contains whitespace".to_string());
    }
    name.chars()
        .find(|c| TCL_METACHARACTERS.contains(c))
        .map(|c| format!("name contains `{c}`"))
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("clock", &self.clock)
            .field("ports", &self.ports.len())
            .field("delays", &self.delays.len())
            .field("exceptions", &self.exceptions.len())
            .field("state", &self.state)
            .finish()
    }
}
