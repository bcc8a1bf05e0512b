//! Batch validation of a constraint set.
//!
//! Unlike the builder, validation does not stop at the first problem: it
//! collects every violation and sorts them by (subject, kind, direction) so
//! reports are stable from run to run.

use crate::error::ValidationError;
use crate::ids::PortRef;
use crate::model::{BoundKind, ConstraintSet, Direction};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Default)]
struct BoundPair {
    min: Option<f64>,
    max: Option<f64>,
}

/// Checks the global invariants of `set`.
///
/// - a clock is defined
/// - every (port, direction) with a bound has both a min and a max bound
/// - min ≤ max for every such pair
/// - every exception pattern still resolves to a declared port
///
/// This function does not modify the set; use
/// [`ConstraintSet::validate`] to validate and freeze in one step.
pub fn validate(set: &ConstraintSet) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if set.clock().is_none() {
        errors.push(ValidationError::MissingClock);
    }

    let mut pairs: BTreeMap<(PortRef, Direction), BoundPair> = BTreeMap::new();
    for delay in set.delays() {
        let pair = pairs.entry((delay.port, delay.direction)).or_default();
        match delay.bound {
            BoundKind::Min => pair.min = Some(delay.value_ns),
            BoundKind::Max => pair.max = Some(delay.value_ns),
        }
    }

    for ((port, direction), pair) in &pairs {
        let port = match set.port(*port) {
            Ok(p) => set.name(p.name).to_string(),
            Err(_) => format!("#{}", port.as_raw()),
        };
        match (pair.min, pair.max) {
            (Some(min), Some(max)) if min > max => {
                errors.push(ValidationError::InvertedBounds {
                    port,
                    direction: *direction,
                    min,
                    max,
                });
            }
            (Some(_), None) => errors.push(ValidationError::IncompleteBounds {
                port,
                direction: *direction,
                missing: BoundKind::Max,
            }),
            (None, Some(_)) => errors.push(ValidationError::IncompleteBounds {
                port,
                direction: *direction,
                missing: BoundKind::Min,
            }),
            _ => {}
        }
    }

    for exception in set.exceptions() {
        if set.resolve_pattern(&exception.pattern).is_empty() {
            errors.push(ValidationError::UnresolvedPattern {
                pattern: exception.pattern.to_string(),
            });
        }
    }

    if errors.is_empty() {
        debug!(
            ports = set.ports().count(),
            delays = set.delays().len(),
            exceptions = set.exceptions().len(),
            "constraint set is consistent"
        );
        return Ok(());
    }

    errors.sort_by(|a, b| {
        (a.subject(), a.kind(), a.direction()).cmp(&(b.subject(), b.kind(), b.direction()))
    });
    for error in &errors {
        warn!(subject = error.subject(), "{error}");
    }
    Err(errors)
}
