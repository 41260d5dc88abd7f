//! Lexical classification of flat annotation tags
//!
//! A flat annotation is a whitespace separated stream of tags. Nonterminals
//! open with their category name (`NP-SUBJ`) and close with the same name
//! behind the close marker (`/NP-SUBJ`). Every other tag is a terminal whose
//! category is the full tag text, feature codes included (`person_kvk_nf`).

use crate::error::FormatError;
use std::fmt;

/// Marker prefixed to a nonterminal name to close it
pub const CLOSE_MARKER: char = '/';

/// Separator between the segments of a nonterminal name
pub const SEGMENT_SEPARATOR: char = '-';

/// Kind of an annotation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Opens a nonterminal
    Open,
    /// Closes the innermost open nonterminal
    Close,
    /// A leaf category
    Terminal,
}

/// A single classified element of the annotation stream
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlatTag {
    raw: String,
    kind: TagKind,
    category: String,
}

impl FlatTag {
    /// Create an open tag for a nonterminal category
    pub fn open(category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            raw: category.clone(),
            kind: TagKind::Open,
            category,
        }
    }

    /// Create a close tag for a nonterminal category
    pub fn close(category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            raw: format!("{CLOSE_MARKER}{category}"),
            kind: TagKind::Close,
            category,
        }
    }

    /// Create a terminal tag
    pub fn terminal(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            raw: tag.clone(),
            kind: TagKind::Terminal,
            category: tag,
        }
    }

    /// The tag text as it appears in the annotation
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The tag kind
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// Category name; for terminals the full tag including feature codes
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether this tag opens a nonterminal
    pub fn is_open(&self) -> bool {
        self.kind == TagKind::Open
    }

    /// Whether this tag closes a nonterminal
    pub fn is_close(&self) -> bool {
        self.kind == TagKind::Close
    }

    /// Whether this tag is a terminal
    pub fn is_terminal(&self) -> bool {
        self.kind == TagKind::Terminal
    }
}

impl fmt::Display for FlatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Check whether `name` follows the nonterminal naming convention
///
/// The first character must be uppercase and every dash-delimited segment
/// must be non-empty.
pub fn is_nonterminal_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
        && name.split(SEGMENT_SEPARATOR).all(|segment| !segment.is_empty())
}

/// Classify a single tag
///
/// Pure and idempotent: classifying the same text twice yields equal tags.
pub fn classify(text: &str) -> Result<FlatTag, FormatError> {
    if text.is_empty() {
        return Err(FormatError::EmptyTag);
    }
    if text.chars().any(char::is_whitespace) {
        return Err(FormatError::Whitespace {
            tag: text.to_string(),
        });
    }

    if let Some(name) = text.strip_prefix(CLOSE_MARKER) {
        if !is_nonterminal_name(name) {
            return Err(FormatError::MalformedClose {
                tag: text.to_string(),
            });
        }
        return Ok(FlatTag::close(name));
    }

    if text.chars().next().is_some_and(char::is_uppercase) {
        if !is_nonterminal_name(text) {
            return Err(FormatError::MalformedNonterminal {
                tag: text.to_string(),
            });
        }
        return Ok(FlatTag::open(text));
    }

    Ok(FlatTag::terminal(text))
}

/// Map an open nonterminal tag to its close tag and vice versa
///
/// `NP-SUBJ` maps to `/NP-SUBJ` and `/NP-SUBJ` maps to `NP-SUBJ`.
pub fn matching_nonterminal(tag: &str) -> String {
    match tag.strip_prefix(CLOSE_MARKER) {
        Some(name) => name.to_string(),
        None => format!("{CLOSE_MARKER}{tag}"),
    }
}

/// Split an annotation on whitespace and classify every tag
pub fn tokenize_annotation(annotation: &str) -> Result<Vec<FlatTag>, FormatError> {
    annotation.split_whitespace().map(classify).collect()
}
