//! How serious a finding is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a [`Diagnostic`](crate::Diagnostic).
///
/// Errors block emission; warnings flag declarations that are legal but
/// probably not what the author meant. `Warning < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Questionable but emittable.
    Warning,
    /// The constraint set or configuration cannot be used.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// ANSI SGR colour code used by terminal renderers.
    pub(crate) fn ansi_color(self) -> &'static str {
        match self {
            Severity::Warning => "33",
            Severity::Error => "31",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}
