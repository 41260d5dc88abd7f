//! Multi-word alignment rules and their loader

use crate::error::RulesError;
use crate::tag::is_nonterminal_name;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

static DEFAULT_RULES: OnceLock<AlignRules> = OnceLock::new();

const EMBEDDED_RULES: &str = include_str!("../../configs/alignment.toml");

/// Rules telling the aligner which tree regions are multi-word units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignRules {
    #[serde(default)]
    pub metadata: RulesMetadata,
    /// Name-run detection
    #[serde(default)]
    pub names: NameRules,
    /// Phrase shapes, tried in order
    #[serde(default)]
    pub phrases: Vec<PhraseShape>,
}

/// Identification of a rule file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Sibling runs of these roots are merged into one name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRules {
    #[serde(default)]
    pub roots: Vec<String>,
    /// Shortest run that counts as a name
    #[serde(default = "default_min_run")]
    pub min_run: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            min_run: default_min_run(),
        }
    }
}

/// A nonterminal whose exact terminal yield denotes one idiomatic phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseShape {
    /// Nonterminal category, matched exactly
    pub category: String,
    /// Terminal roots of the yield, in order
    pub terminals: Vec<String>,
}

fn default_min_run() -> usize {
    2
}

impl AlignRules {
    /// Rules that never merge anything
    pub fn none() -> Self {
        Self {
            metadata: RulesMetadata::default(),
            names: NameRules::default(),
            phrases: Vec::new(),
        }
    }

    /// The embedded default rules, parsed once
    pub fn embedded() -> &'static AlignRules {
        DEFAULT_RULES.get_or_init(|| {
            Self::from_toml(EMBEDDED_RULES).expect("embedded alignment rules should be valid")
        })
    }

    /// Parse and validate rules from TOML text
    pub fn from_toml(text: &str) -> Result<Self, RulesError> {
        let rules: AlignRules = toml::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Check the rules for internal consistency
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.names.min_run < 2 {
            return Err(RulesError::Invalid(format!(
                "names.min_run must be at least 2, got {}",
                self.names.min_run
            )));
        }
        if let Some(root) = self.names.roots.iter().find(|root| root.is_empty()) {
            return Err(RulesError::Invalid(format!("empty name root {root:?}")));
        }
        for phrase in &self.phrases {
            if !is_nonterminal_name(&phrase.category) {
                return Err(RulesError::Invalid(format!(
                    "phrase category '{}' is not a nonterminal name",
                    phrase.category
                )));
            }
            if phrase.terminals.len() < 2 {
                return Err(RulesError::Invalid(format!(
                    "phrase '{}' must span at least two terminals",
                    phrase.category
                )));
            }
        }
        Ok(())
    }

    /// Whether sibling runs of `root` denote a name
    pub fn is_name_root(&self, root: &str) -> bool {
        self.names.roots.iter().any(|r| r == root)
    }

    /// The phrase shape registered for a nonterminal category
    pub fn phrase(&self, category: &str) -> Option<&PhraseShape> {
        self.phrases.iter().find(|p| p.category == category)
    }
}

impl Default for AlignRules {
    fn default() -> Self {
        Self::embedded().clone()
    }
}
