//! Timing-constraint model for synchronous FPGA interfaces.
//!
//! This crate declares the timing requirements of a design boundary: one
//! clock, min/max input and output delays on ports relative to that clock,
//! and false-path exceptions. It checks the declarations for consistency and
//! emits them as a deterministic listing for downstream synthesis and timing
//! tools. It does not analyze timing itself.
//!
//! # Usage
//!
//! ```
//! use chronos_constraints::{emit_to_string, ConstraintSet, Direction};
//! use chronos_config::EmitConfig;
//!
//! let mut set = ConstraintSet::new();
//! let aclk = set.define_clock("aclk", 1.0, 0.0, 0.5)?;
//! let en = set.declare_port("en", Direction::Input, None)?;
//! set.add_delay_pair(en, aclk, Direction::Input, 0.2, 0.4)?;
//!
//! set.validate().expect("consistent constraints");
//! let xdc = emit_to_string(&set, &EmitConfig::default())?;
//! assert!(xdc.starts_with("create_clock -period 1.000 -name aclk"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - [`model`]: the [`ConstraintSet`] aggregate and its builder calls
//! - [`pattern`]: port-name patterns for exceptions
//! - [`validate`](mod@validate): batch consistency checks
//! - [`emit`](mod@emit): ordered statements and sinks
//! - [`render`]: XDC and canonical text renderers
//! - [`report`]: conversion into [`chronos_diagnostics`] diagnostics

#![warn(missing_docs)]

pub mod emit;
pub mod error;
pub mod ids;
pub mod model;
pub mod pattern;
pub mod render;
pub mod report;
pub mod validate;

pub use emit::{emit, emit_to_file, emit_to_string, emit_to_writer, Statement};
pub use error::{ConstraintError, EmitError, ValidationError, ViolationKind};
pub use ids::{ClockRef, PortRef};
pub use model::{
    BoundKind, Clock, ConstraintSet, DelayConstraint, Direction, EndpointRole, PathException,
    Port,
};
pub use pattern::{BitSelect, PortPattern};
pub use render::{renderer_for, CanonicalRenderer, StatementRenderer, XdcRenderer};
pub use report::{advisories, report_advisories, report_violations};
pub use validate::validate;
