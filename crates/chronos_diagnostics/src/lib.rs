//! Structured diagnostics for constraint authoring and validation.
//!
//! A [`Diagnostic`] carries a severity, a category-prefixed code, the name of
//! the clock, port, or pattern it concerns, and optional notes. The
//! thread-safe [`DiagnosticSink`] accumulates them, and [`TerminalRenderer`]
//! formats them for humans.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
