//! Configuration module
//!
//! The CLI reads an optional TOML file; command-line flags override it.
//!
//! ```toml
//! [alignment]
//! rules = "configs/alignment.toml"
//! strict = false
//!
//! [lexicon]
//! path = "lexicon.json"
//!
//! [output]
//! format = "json"
//! pretty_json = true
//! ```

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Alignment configuration
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Lexicon configuration
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Alignment-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AlignmentConfig {
    /// Alignment rule file; embedded rules when unset
    #[serde(default)]
    pub rules: Option<PathBuf>,

    /// Reject inputs whose counts cannot be reconciled
    #[serde(default)]
    pub strict: bool,
}

/// Lexicon-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LexiconConfig {
    /// Lexicon table (`.json` or `.toml`)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Pretty print JSON output
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_format() -> String {
    "text".to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty_json: default_pretty_json(),
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    ///
    /// Relative rule and lexicon paths are resolved against the
    /// directory of the configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: CliConfig = toml::from_str(&text)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            config.alignment.rules = config.alignment.rules.map(|p| base.join(p));
            config.lexicon.path = config.lexicon.path.map(|p| base.join(p));
        }
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.output.format, "text");
        assert!(config.output.pretty_json);
        assert!(!config.alignment.strict);
        assert!(config.lexicon.path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trellis.toml");
        fs::write(&path, "[alignment]\nstrict = true\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert!(config.alignment.strict);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trellis.toml");
        fs::write(&path, "[lexicon]\npath = \"orð.json\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.lexicon.path, Some(dir.path().join("orð.json")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trellis.toml");
        fs::write(&path, "[output]\ncolour = \"red\"\n").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/trellis.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
        assert!(CliConfig::load_or_default(None).is_ok());
    }
}
