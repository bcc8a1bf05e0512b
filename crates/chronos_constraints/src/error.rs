//! Error types for building, validating, and emitting constraint sets.
//!
//! Builder calls fail fast with a single [`ConstraintError`]. Validation
//! accumulates every [`ValidationError`] it finds. Emission fails with an
//! [`EmitError`] before anything is written.

use crate::model::{BoundKind, Direction};

/// A rejected builder call on a [`ConstraintSet`](crate::ConstraintSet).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintError {
    /// The clock period or waveform is out of range.
    #[error("invalid clock `{name}`: {reason}")]
    InvalidClock {
        /// Clock name.
        name: String,
        /// What is wrong with the definition.
        reason: String,
    },

    /// A clock is already defined in this set.
    #[error("cannot define clock `{name}`: clock `{existing}` is already defined")]
    DuplicateClock {
        /// The clock already present.
        existing: String,
        /// The clock that was rejected.
        name: String,
    },

    /// A port with this name is already declared.
    #[error("port `{name}` is already declared")]
    DuplicatePort {
        /// Port name.
        name: String,
    },

    /// The port declaration is malformed.
    #[error("invalid port `{name}`: {reason}")]
    InvalidPort {
        /// Port name.
        name: String,
        /// What is wrong with the declaration.
        reason: String,
    },

    /// The delay direction disagrees with the port direction.
    #[error("cannot set {requested} delay on {declared} port `{port}`")]
    DirectionMismatch {
        /// Port name.
        port: String,
        /// Direction the port was declared with.
        declared: Direction,
        /// Direction of the rejected delay.
        requested: Direction,
    },

    /// A bound of this kind already exists for the port and direction.
    #[error("{direction} delay on `{port}` already has a {bound} bound")]
    DuplicateBound {
        /// Port name.
        port: String,
        /// Delay direction.
        direction: Direction,
        /// The repeated bound kind.
        bound: BoundKind,
    },

    /// A port handle or pattern resolves to no declared port.
    #[error("no declared port matches `{port}`")]
    UnknownPort {
        /// The unresolved handle (as `#index`) or pattern.
        port: String,
    },

    /// A clock handle does not refer to the clock of this set.
    #[error("unknown clock `{clock}`")]
    UnknownClock {
        /// The unresolved handle, as `#index`.
        clock: String,
    },

    /// The delay value is NaN or infinite.
    #[error("{bound} delay on `{port}` is not a finite number: {value}")]
    InvalidDelay {
        /// Port name.
        port: String,
        /// Bound kind of the rejected delay.
        bound: BoundKind,
        /// The rejected value.
        value: f64,
    },

    /// The port pattern cannot be parsed.
    #[error("invalid port pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// Pattern text.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The set has been validated and no longer accepts declarations.
    #[error("constraint set is validated and can no longer be modified")]
    AlreadyValidated,
}

/// The ordering class of a [`ValidationError`], used as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViolationKind {
    /// No clock is defined.
    MissingClock,
    /// Only one of the min/max bounds is present.
    IncompleteBounds,
    /// The min bound exceeds the max bound.
    InvertedBounds,
    /// An exception pattern resolves to no port.
    UnresolvedPattern,
}

/// A global consistency violation found by [`validate`](crate::validate()).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The set has no clock.
    #[error("constraint set defines no clock")]
    MissingClock,

    /// A (port, direction) pair has one bound but not the other.
    #[error(
        "{direction} delay on `{port}` has a {present} bound but no {missing} bound",
        present = .missing.other()
    )]
    IncompleteBounds {
        /// Port name.
        port: String,
        /// Delay direction.
        direction: Direction,
        /// The bound kind that is absent.
        missing: BoundKind,
    },

    /// A (port, direction) pair has min > max.
    #[error("{direction} delay on `{port}` has min bound {min} above max bound {max}")]
    InvertedBounds {
        /// Port name.
        port: String,
        /// Delay direction.
        direction: Direction,
        /// The min bound value.
        min: f64,
        /// The max bound value.
        max: f64,
    },

    /// A false-path pattern no longer matches any declared port.
    #[error("false-path pattern `{pattern}` matches no declared port")]
    UnresolvedPattern {
        /// Pattern text.
        pattern: String,
    },
}

impl ValidationError {
    /// The port name or pattern this violation is keyed on. Empty for
    /// set-wide violations, so they sort first.
    pub fn subject(&self) -> &str {
        match self {
            ValidationError::MissingClock => "",
            ValidationError::IncompleteBounds { port, .. }
            | ValidationError::InvertedBounds { port, .. } => port,
            ValidationError::UnresolvedPattern { pattern } => pattern,
        }
    }

    /// The ordering class of this violation.
    pub fn kind(&self) -> ViolationKind {
        match self {
            ValidationError::MissingClock => ViolationKind::MissingClock,
            ValidationError::IncompleteBounds { .. } => ViolationKind::IncompleteBounds,
            ValidationError::InvertedBounds { .. } => ViolationKind::InvertedBounds,
            ValidationError::UnresolvedPattern { .. } => ViolationKind::UnresolvedPattern,
        }
    }

    /// The delay direction involved, if any.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            ValidationError::IncompleteBounds { direction, .. }
            | ValidationError::InvertedBounds { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}

/// Emission failure. Nothing is written when emission fails.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The set has not been successfully validated.
    #[error("constraint set must be validated before emission")]
    NotValidated,

    /// Writing the listing to its sink failed.
    #[error("failed to write constraint listing: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_direction_mismatch() {
        let err = ConstraintError::DirectionMismatch {
            port: "dout".to_string(),
            declared: Direction::Output,
            requested: Direction::Input,
        };
        assert_eq!(
            format!("{err}"),
            "cannot set input delay on output port `dout`"
        );
    }

    #[test]
    fn display_incomplete_bounds_names_both_kinds() {
        let err = ValidationError::IncompleteBounds {
            port: "en".to_string(),
            direction: Direction::Input,
            missing: BoundKind::Max,
        };
        assert_eq!(
            format!("{err}"),
            "input delay on `en` has a min bound but no max bound"
        );
    }

    #[test]
    fn subject_and_kind() {
        let err = ValidationError::UnresolvedPattern {
            pattern: "dout*".to_string(),
        };
        assert_eq!(err.subject(), "dout*");
        assert_eq!(err.kind(), ViolationKind::UnresolvedPattern);
        assert_eq!(err.direction(), None);
        assert_eq!(ValidationError::MissingClock.subject(), "");
    }

    #[test]
    fn violation_kinds_are_ordered() {
        assert!(ViolationKind::MissingClock < ViolationKind::IncompleteBounds);
        assert!(ViolationKind::IncompleteBounds < ViolationKind::InvertedBounds);
        assert!(ViolationKind::InvertedBounds < ViolationKind::UnresolvedPattern);
    }

    #[test]
    fn io_error_converts() {
        let err: EmitError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(format!("{err}").contains("disk full"));
    }
}
