//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{ChronosConfig, MAX_PRECISION};
use std::path::Path;

/// File name looked up inside a project directory.
pub const CONFIG_FILE_NAME: &str = "chronos.toml";

/// Loads and validates `<project_dir>/chronos.toml`.
///
/// A missing file is not an error: the defaults apply.
pub fn load_config(project_dir: &Path) -> Result<ChronosConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(ChronosConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `chronos.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ChronosConfig, ConfigError> {
    let config: ChronosConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ChronosConfig) -> Result<(), ConfigError> {
    if config.emit.precision > MAX_PRECISION {
        return Err(ConfigError::ValidationError(format!(
            "emit.precision must be at most {MAX_PRECISION}, got {}",
            config.emit.precision
        )));
    }
    if let Some(header) = &config.emit.header {
        if header.contains('\n') {
            return Err(ConfigError::ValidationError(
                "emit.header must be a single line".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dialect;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[emit]
dialect = "canonical"
precision = 4
header = "DDS readout interface"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.emit.dialect, Dialect::Canonical);
        assert_eq!(config.emit.precision, 4);
        assert_eq!(config.emit.header.as_deref(), Some("DDS readout interface"));
    }

    #[test]
    fn precision_too_large() {
        let err = load_config_from_str("[emit]\nprecision = 12\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(format!("{err}").contains("at most 9"));
    }

    #[test]
    fn multiline_header_rejected() {
        let err = load_config_from_str("[emit]\nheader = \"a\\nb\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_dialect_is_parse_error() {
        let err = load_config_from_str("[emit]\ndialect = \"ucf\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = load_config_from_str("[emit]\nprecison = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn rejected_file_reports_config_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[emit]\nprecision = 10\n").unwrap();
        let diag = load_config(dir.path()).unwrap_err().to_diagnostic();
        assert_eq!(format!("{}", diag.code), "C003");
        assert!(diag.message.contains("emit.precision"));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[emit]\nprecision = 2\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.emit.precision, 2);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.emit.precision, 3);
    }
}
