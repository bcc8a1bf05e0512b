//! Shared foundational types used across the Chronos constraint toolchain.
//!
//! Every named entity in a constraint set (clocks, ports) is identified by an
//! interned [`Ident`]; text is recovered through the [`Interner`] that
//! produced it.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
