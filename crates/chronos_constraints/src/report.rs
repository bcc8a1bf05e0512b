//! Conversion of constraint errors into structured diagnostics.
//!
//! Codes are grouped by stage: `T1xx` for rejected builder calls, `T2xx` for
//! validation violations, `T3xx` for emission. `Wxxx` advisories flag
//! delay bounds that are legal but suspicious; they never block emission.

use crate::error::{ConstraintError, EmitError, ValidationError};
use crate::model::{BoundKind, ConstraintSet};
use chronos_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

impl ConstraintError {
    /// The diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            ConstraintError::InvalidClock { .. } => 101,
            ConstraintError::DuplicateClock { .. } => 102,
            ConstraintError::DuplicatePort { .. } => 103,
            ConstraintError::InvalidPort { .. } => 104,
            ConstraintError::DirectionMismatch { .. } => 105,
            ConstraintError::DuplicateBound { .. } => 106,
            ConstraintError::UnknownPort { .. } => 107,
            ConstraintError::UnknownClock { .. } => 108,
            ConstraintError::InvalidDelay { .. } => 109,
            ConstraintError::InvalidPattern { .. } => 110,
            ConstraintError::AlreadyValidated => 111,
        };
        DiagnosticCode::new(Category::Timing, number)
    }

    /// Converts this error into an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            ConstraintError::InvalidClock { name, .. }
            | ConstraintError::DuplicateClock { name, .. }
            | ConstraintError::DuplicatePort { name }
            | ConstraintError::InvalidPort { name, .. } => diag.with_subject(name),
            ConstraintError::DirectionMismatch { port, declared, .. } => diag
                .with_subject(port)
                .with_help(format!("use an {declared} delay for this port")),
            ConstraintError::DuplicateBound { port, .. }
            | ConstraintError::InvalidDelay { port, .. }
            | ConstraintError::UnknownPort { port } => diag.with_subject(port),
            ConstraintError::UnknownClock { clock } => diag.with_subject(clock),
            ConstraintError::InvalidPattern { pattern, .. } => diag.with_subject(pattern),
            ConstraintError::AlreadyValidated => {
                diag.with_note("a validated constraint set is read-only")
            }
        }
    }
}

impl ValidationError {
    /// The diagnostic code for this violation.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            ValidationError::MissingClock => 201,
            ValidationError::IncompleteBounds { .. } => 202,
            ValidationError::InvertedBounds { .. } => 203,
            ValidationError::UnresolvedPattern { .. } => 204,
        };
        DiagnosticCode::new(Category::Timing, number)
    }

    /// Converts this violation into an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        let diag = match self {
            ValidationError::MissingClock => {
                return diag.with_help("define a clock with `define_clock`");
            }
            ValidationError::IncompleteBounds {
                direction, missing, ..
            } => diag.with_help(format!("add a {missing} {direction} delay")),
            ValidationError::InvertedBounds { .. } => {
                diag.with_note("the min bound must not exceed the max bound")
            }
            ValidationError::UnresolvedPattern { .. } => diag,
        };
        diag.with_subject(self.subject())
    }
}

impl EmitError {
    /// Converts this error into an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EmitError::NotValidated => Diagnostic::error(
                DiagnosticCode::new(Category::Timing, 301),
                self.to_string(),
            )
            .with_help("call `validate` and resolve every violation first"),
            EmitError::Io(_) => {
                Diagnostic::error(DiagnosticCode::new(Category::Error, 1), self.to_string())
            }
        }
    }
}

/// Emits one diagnostic per violation into `sink`, keeping their order.
pub fn report_violations(errors: &[ValidationError], sink: &DiagnosticSink) {
    sink.extend(errors.iter().map(ValidationError::to_diagnostic));
}

/// Advisory warnings about max delay bounds, in port declaration order:
///
/// - `W001`: a negative max bound
/// - `W002`: a max bound of at least one clock period, which leaves the
///   design no time on that path
pub fn advisories(set: &ConstraintSet) -> Vec<Diagnostic> {
    let period = set.clock().map(|c| c.period_ns);
    let mut out = Vec::new();
    for (port_ref, port) in set.ports() {
        let name = set.name(port.name);
        let mut maxes: Vec<_> = set
            .delays_for(port_ref)
            .filter(|d| d.bound == BoundKind::Max)
            .collect();
        maxes.sort_by_key(|d| d.direction);
        for delay in maxes {
            let value = delay.value_ns;
            let direction = delay.direction;
            if value < 0.0 {
                out.push(
                    Diagnostic::warning(
                        DiagnosticCode::new(Category::Warning, 1),
                        format!("max {direction} delay on `{name}` is negative ({value})"),
                    )
                    .with_subject(name)
                    .with_note("the whole delay window lies before the clock edge"),
                );
            }
            if let Some(period) = period.filter(|p| value >= *p) {
                out.push(
                    Diagnostic::warning(
                        DiagnosticCode::new(Category::Warning, 2),
                        format!(
                            "max {direction} delay on `{name}` ({value}) is not below \
                             the clock period ({period})"
                        ),
                    )
                    .with_subject(name)
                    .with_help("check the delay units or add a multicycle path downstream"),
                );
            }
        }
    }
    out
}

/// Emits [`advisories`] for `set` into `sink`.
pub fn report_advisories(set: &ConstraintSet, sink: &DiagnosticSink) {
    sink.extend(advisories(set));
}
