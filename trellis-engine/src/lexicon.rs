//! Lexicon lookups used to render terminal spans
//!
//! The dispatcher asks a [`Lexicon`] for the canonical, nominative and
//! indefinite forms of each aligned token. Unknown words are not an
//! error: the surface text is used for every rendering.

use crate::error::LexiconError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use trellis_core::{Gender, TerminalTag};

/// Renderings of one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexEntry {
    /// Lemma
    pub canonical: String,
    /// Nominative-case form
    pub nominative: String,
    /// Indefinite form
    pub indefinite: String,
}

impl LexEntry {
    /// Entry that renders every form as `text`
    pub fn verbatim(text: &str) -> Self {
        Self {
            canonical: text.to_string(),
            nominative: text.to_string(),
            indefinite: text.to_string(),
        }
    }
}

/// Morphological lookup collaborator
pub trait Lexicon: Send + Sync {
    /// Look up a token's renderings given the terminal it aligned with
    fn lookup(&self, text: &str, tag: &TerminalTag) -> Option<LexEntry>;

    /// Guess the grammatical gender of a personal name
    fn name_gender(&self, _name: &str) -> Option<Gender> {
        None
    }
}

/// Lexicon that knows no words
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyLexicon;

impl Lexicon for EmptyLexicon {
    fn lookup(&self, _text: &str, _tag: &TerminalTag) -> Option<LexEntry> {
        None
    }
}

/// One row of a [`TableLexicon`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Inflected form as it appears in text
    pub form: String,
    /// Restrict the row to terminals with this root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Lemma
    pub canonical: String,
    /// Nominative form; defaults to `form`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominative: Option<String>,
    /// Indefinite form; defaults to `canonical`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indefinite: Option<String>,
}

impl WordEntry {
    fn entry(&self) -> LexEntry {
        LexEntry {
            canonical: self.canonical.clone(),
            nominative: self.nominative.clone().unwrap_or_else(|| self.form.clone()),
            indefinite: self
                .indefinite
                .clone()
                .unwrap_or_else(|| self.canonical.clone()),
        }
    }
}

/// Lexicon backed by a word table loaded from JSON or TOML
///
/// ```toml
/// [[words]]
/// form = "ásinn"
/// root = "no"
/// canonical = "ás"
///
/// [names]
/// Ingibjörg = "kvk"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableLexicon {
    #[serde(default)]
    words: Vec<WordEntry>,
    #[serde(default)]
    names: BTreeMap<String, Gender>,
    #[serde(skip)]
    index: HashMap<String, Vec<usize>>,
}

impl TableLexicon {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON table
    pub fn from_json(text: &str) -> Result<Self, LexiconError> {
        let table: TableLexicon = serde_json::from_str(text)?;
        Ok(table.reindexed())
    }

    /// Parse a TOML table
    pub fn from_toml(text: &str) -> Result<Self, LexiconError> {
        let table: TableLexicon = toml::from_str(text)?;
        Ok(table.reindexed())
    }

    /// Load a table, choosing the format by file extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text)?,
            Some("toml") => Self::from_toml(&text)?,
            other => {
                return Err(LexiconError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        log::debug!(
            "loaded lexicon {} with {} word(s) and {} name(s)",
            path.display(),
            table.words.len(),
            table.names.len()
        );
        Ok(table)
    }

    /// Add a word row
    pub fn insert(&mut self, word: WordEntry) {
        self.index
            .entry(word.form.to_lowercase())
            .or_default()
            .push(self.words.len());
        self.words.push(word);
    }

    /// Add a name gender
    pub fn insert_name(&mut self, name: impl Into<String>, gender: Gender) {
        self.names.insert(name.into(), gender);
    }

    /// Number of word rows
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the table has no word rows
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn reindexed(mut self) -> Self {
        let words = std::mem::take(&mut self.words);
        self.index.clear();
        for word in words {
            self.insert(word);
        }
        self
    }
}

impl Lexicon for TableLexicon {
    fn lookup(&self, text: &str, tag: &TerminalTag) -> Option<LexEntry> {
        let rows = self.index.get(&text.to_lowercase())?;
        let mut fallback = None;
        for &row in rows {
            let word = &self.words[row];
            match &word.root {
                Some(root) if root == tag.root() => return Some(word.entry()),
                Some(_) => {}
                None => {
                    fallback.get_or_insert(row);
                }
            }
        }
        fallback.map(|row| self.words[row].entry())
    }

    fn name_gender(&self, name: &str) -> Option<Gender> {
        self.names.get(name).copied()
    }
}
