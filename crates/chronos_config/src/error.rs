//! Error types for configuration loading and validation.

use crate::loader::CONFIG_FILE_NAME;
use chronos_diagnostics::{Category, Diagnostic, DiagnosticCode};

/// Errors that can occur when loading or validating a `chronos.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// The diagnostic code for this error: `C001` read, `C002` parse,
    /// `C003` validation.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            ConfigError::IoError(_) => 1,
            ConfigError::ParseError(_) => 2,
            ConfigError::ValidationError(_) => 3,
        };
        DiagnosticCode::new(Category::Config, number)
    }

    /// Converts this error into an error diagnostic about `chronos.toml`.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code(), self.to_string()).with_subject(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError("unknown variant `vhdl`".to_string());
        assert_eq!(
            format!("{err}"),
            "failed to parse configuration: unknown variant `vhdl`"
        );
    }

    #[test]
    fn display_validation_error() {
        let err = ConfigError::ValidationError("emit.precision must be at most 9".to_string());
        assert_eq!(
            format!("{err}"),
            "validation error: emit.precision must be at most 9"
        );
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::from(io_err);
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }

    #[test]
    fn diagnostic_codes() {
        let parse = ConfigError::ParseError("expected `=`".to_string());
        let diag = parse.to_diagnostic();
        assert_eq!(format!("{}", diag.code), "C002");
        assert!(diag.severity.is_error());
        assert_eq!(diag.subject.as_deref(), Some("chronos.toml"));

        let invalid = ConfigError::ValidationError("bad".to_string());
        assert_eq!(format!("{}", invalid.code()), "C003");
        let io = ConfigError::from(std::io::Error::other("denied"));
        assert_eq!(format!("{}", io.code()), "C001");
    }
}
