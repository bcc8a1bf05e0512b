//! Canonical, deterministic emission of a validated constraint set.
//!
//! [`emit`] turns a validated [`ConstraintSet`] into an ordered list of
//! [`Statement`]s:
//!
//! 1. the clock definition
//! 2. delay bounds, port by port in declaration order, min before max
//! 3. exceptions in declaration order
//!
//! The order depends only on declaration order of ports and exceptions, never
//! on the order bounds were added, so the same model always yields the same
//! bytes. The `emit_to_*` functions render with a
//! [`StatementRenderer`](crate::render::StatementRenderer) and are
//! all-or-nothing: the full listing is rendered before any sink is touched.

use crate::error::EmitError;
use crate::model::{BoundKind, ConstraintSet, Direction, EndpointRole};
use crate::render::renderer_for;
use chronos_config::EmitConfig;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// One semantic constraint statement, independent of output syntax.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// Clock definition.
    CreateClock {
        /// Clock name.
        name: String,
        /// Period in nanoseconds.
        period_ns: f64,
        /// Rising edge in nanoseconds.
        rise_ns: f64,
        /// Falling edge in nanoseconds.
        fall_ns: f64,
    },
    /// A min or max input/output delay on one port.
    SetDelay {
        /// Input or output delay.
        direction: Direction,
        /// Min or max bound.
        bound: BoundKind,
        /// Reference clock name.
        clock: String,
        /// Port name.
        port: String,
        /// Bit width when the port is vectored.
        width: Option<u32>,
        /// Delay in nanoseconds.
        value_ns: f64,
    },
    /// A false-path exception.
    FalsePath {
        /// Endpoint role of the pattern.
        role: EndpointRole,
        /// Port pattern as written.
        pattern: String,
    },
}

/// Produces the ordered statement list for a validated set.
///
/// Fails with [`EmitError::NotValidated`] if [`ConstraintSet::validate`] has
/// not succeeded.
pub fn emit(set: &ConstraintSet) -> Result<Vec<Statement>, EmitError> {
    if !set.is_validated() {
        return Err(EmitError::NotValidated);
    }
    let Some(clock) = set.clock() else {
        return Err(EmitError::NotValidated);
    };
    let clock_name = set.name(clock.name).to_string();

    let mut statements = vec![Statement::CreateClock {
        name: clock_name.clone(),
        period_ns: clock.period_ns,
        rise_ns: clock.rise_ns,
        fall_ns: clock.fall_ns,
    }];

    for (port_ref, port) in set.ports() {
        let mut delays: Vec<_> = set.delays_for(port_ref).collect();
        delays.sort_by_key(|d| (d.direction, d.bound));
        statements.extend(delays.into_iter().map(|d| Statement::SetDelay {
            direction: d.direction,
            bound: d.bound,
            clock: clock_name.clone(),
            port: set.name(port.name).to_string(),
            width: port.width,
            value_ns: d.value_ns,
        }));
    }

    statements.extend(set.exceptions().iter().map(|e| Statement::FalsePath {
        role: e.role,
        pattern: e.pattern.to_string(),
    }));

    debug!(statements = statements.len(), "emitted constraint statements");
    Ok(statements)
}

/// Renders the full listing, one statement per line, in the configured
/// dialect. An optional header comes first, commented line by line.
pub fn emit_to_string(set: &ConstraintSet, config: &EmitConfig) -> Result<String, EmitError> {
    let statements = emit(set)?;
    let renderer = renderer_for(config.dialect, config.precision);

    let mut out = String::new();
    if let Some(header) = &config.header {
        // Every header line is commented; a bare line would be a live command.
        for line in header.split(['\n', '\r']) {
            out.push_str(&renderer.comment(line));
            out.push('\n');
        }
    }
    for statement in &statements {
        out.push_str(&renderer.render(statement));
        out.push('\n');
    }
    Ok(out)
}

/// Renders the listing and writes it to `writer`, then flushes.
///
/// Nothing is written if rendering fails.
pub fn emit_to_writer<W: Write>(
    set: &ConstraintSet,
    config: &EmitConfig,
    writer: &mut W,
) -> Result<(), EmitError> {
    let text = emit_to_string(set, config)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Renders the listing and writes it to `path`.
///
/// The file is only created once rendering has succeeded, so an
/// unvalidated set never truncates an existing listing.
pub fn emit_to_file(
    set: &ConstraintSet,
    config: &EmitConfig,
    path: &Path,
) -> Result<(), EmitError> {
    let text = emit_to_string(set, config)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    debug!(path = %path.display(), bytes = text.len(), "wrote constraint listing");
    Ok(())
}
