//! Core error types (deterministic only)

use thiserror::Error;

/// Malformed tag text in a flat annotation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The tag was empty
    #[error("empty tag")]
    EmptyTag,

    /// The tag contained whitespace
    #[error("tag '{tag}' contains whitespace")]
    Whitespace {
        /// The offending tag text
        tag: String,
    },

    /// A nonterminal name with an empty dash-delimited segment
    #[error("malformed nonterminal name '{tag}'")]
    MalformedNonterminal {
        /// The offending tag text
        tag: String,
    },

    /// A close marker not followed by a nonterminal name
    #[error("close tag '{tag}' does not name a nonterminal")]
    MalformedClose {
        /// The offending tag text
        tag: String,
    },
}

/// Corrupt nesting in a flat annotation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The annotation contained no tags
    #[error("annotation is empty")]
    Empty,

    /// A close tag did not match the innermost open nonterminal
    #[error("close tag '/{found}' at position {position} does not match open '{expected}'")]
    Mismatched {
        /// Category of the innermost open nonterminal
        expected: String,
        /// Category named by the close tag
        found: String,
        /// Index of the close tag in the annotation stream
        position: usize,
    },

    /// A close tag appeared with no open nonterminal
    #[error("close tag '/{found}' at position {position} has no open nonterminal")]
    UnexpectedClose {
        /// Category named by the close tag
        found: String,
        /// Index of the close tag in the annotation stream
        position: usize,
    },

    /// A terminal appeared outside of any nonterminal
    #[error("terminal '{tag}' at position {position} is outside any nonterminal")]
    OrphanTerminal {
        /// The terminal tag text
        tag: String,
        /// Index of the terminal in the annotation stream
        position: usize,
    },

    /// Nonterminals were still open when the stream ended
    #[error("unbalanced annotation: {} nonterminal(s) left open, innermost '{}'", .open.len(), .open.last().map(String::as_str).unwrap_or(""))]
    Unclosed {
        /// Open categories from outermost to innermost
        open: Vec<String>,
    },

    /// More than one top-level nonterminal
    #[error("annotation has {count} top-level nodes, expected a single root")]
    MultipleRoots {
        /// Number of top-level nodes found
        count: usize,
    },
}

/// Core algorithm errors (no I/O, no external failures)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed tag text
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Corrupt annotation structure
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
}

/// Errors loading alignment rules
#[derive(Debug, Error)]
pub enum RulesError {
    /// Rule file could not be read
    #[error("failed to read alignment rules from {path}: {source}")]
    Io {
        /// Path of the rule file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Rule file could not be parsed
    #[error("failed to parse alignment rules: {0}")]
    Parse(#[from] toml::de::Error),

    /// Rule file parsed but is inconsistent
    #[error("invalid alignment rules: {0}")]
    Invalid(String),
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
