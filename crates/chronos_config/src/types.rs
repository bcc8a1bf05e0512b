//! Configuration types deserialized from `chronos.toml`.

use serde::Deserialize;

/// Largest accepted number of decimals for emitted delay values.
pub const MAX_PRECISION: usize = 9;

/// The top-level configuration parsed from `chronos.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChronosConfig {
    /// Emission settings.
    #[serde(default)]
    pub emit: EmitConfig,
}

/// Controls how a validated constraint set is rendered to text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitConfig {
    /// Output statement syntax.
    #[serde(default)]
    pub dialect: Dialect,
    /// Decimal places for periods, waveform edges, and delay values.
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Optional comment written as the first line of the listing.
    #[serde(default)]
    pub header: Option<String>,
}

fn default_precision() -> usize {
    3
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            precision: default_precision(),
            header: None,
        }
    }
}

/// Output syntax for emitted constraint statements.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Tcl-style XDC/SDC commands (`create_clock`, `set_input_delay`, ...).
    #[default]
    Xdc,
    /// Tool-neutral `keyword key=value` lines.
    Canonical,
}
