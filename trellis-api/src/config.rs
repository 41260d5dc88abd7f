//! High-level configuration API

use crate::error::{ApiError, Result};
use std::path::PathBuf;

/// Configuration for an [`Interpreter`](crate::Interpreter)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Alignment rule file; the embedded rules are used when unset
    pub rules_path: Option<PathBuf>,
    /// Lexicon table (`.json` or `.toml`); no lexicon when unset
    pub lexicon_path: Option<PathBuf>,
    /// Reject inputs whose counts cannot be reconciled
    pub strict_alignment: bool,
    /// Worker threads for batch processing; rayon's default when unset
    pub threads: Option<usize>,
}

impl Config {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Configuration that rejects best-effort alignments
    pub fn strict() -> Self {
        Self {
            strict_alignment: true,
            ..Self::default()
        }
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(ApiError::Config("thread count must be positive".to_string()));
        }
        for (what, path) in [
            ("alignment rules", &self.rules_path),
            ("lexicon", &self.lexicon_path),
        ] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(ApiError::Config(format!(
                        "{what} file not found: {}",
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Load alignment rules from a TOML file
    pub fn rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rules_path = Some(path.into());
        self
    }

    /// Load a lexicon table
    pub fn lexicon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.lexicon_path = Some(path.into());
        self
    }

    /// Reject best-effort alignments
    pub fn strict_alignment(mut self, strict: bool) -> Self {
        self.config.strict_alignment = strict;
        self
    }

    /// Set thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
