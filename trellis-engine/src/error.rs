//! Layered error types
//!
//! Registry assembly and lexicon loading fail with [`EngineError`]. Handlers
//! report failures with [`HandlerError`]; the dispatcher turns contract
//! violations into [`DispatchError`] and records everything else on the
//! root accumulator.

use std::path::PathBuf;
use thiserror::Error;

/// Error code recorded when a handler fails during interpretation
pub const E_EXCEPTION: &str = "E_EXCEPTION";

/// Error code reported when no handler set a query type
pub const E_QUERY_NOT_UNDERSTOOD: &str = "E_QUERY_NOT_UNDERSTOOD";

/// Errors raised by handler functions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler's assumptions about the tree or accumulator do not hold
    ///
    /// Aborts the whole interpretation.
    #[error("contract violated: {0}")]
    Contract(String),

    /// Any other failure; recorded on the root accumulator
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    /// Create a contract violation
    pub fn contract(message: impl Into<String>) -> Self {
        HandlerError::Contract(message.into())
    }

    /// Create an ordinary handler failure
    pub fn failed(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into())
    }
}

/// Fatal interpretation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A handler reported a contract violation
    #[error("handler for '{category}' violated its contract: {message}")]
    Contract {
        /// Category whose handler failed
        category: String,
        /// The handler's message
        message: String,
    },
}

/// Errors loading a lexicon table
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The table file could not be read
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        /// Path of the table
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON table could not be parsed
    #[error("invalid JSON lexicon: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML table could not be parsed
    #[error("invalid TOML lexicon: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither `.json` nor `.toml`
    #[error("unsupported lexicon format: {0}")]
    UnsupportedFormat(String),
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Two plug-ins registered the same plug-in name
    #[error("plugin '{0}' is registered twice")]
    DuplicatePlugin(String),

    /// Two registrations share a handler key
    #[error("handler '{key}' is registered by both '{first}' and '{second}'")]
    DuplicateHandler {
        /// The contested category name
        key: String,
        /// Plug-in that registered it first
        first: String,
        /// Plug-in that registered it again
        second: String,
    },

    /// A nonterminal handler key no contributed grammar declares
    #[error("plugin '{plugin}' registers handler '{key}' but no grammar declares it")]
    UndeclaredNonterminal {
        /// Plug-in owning the handler
        plugin: String,
        /// The undeclared category
        key: String,
    },

    /// A plug-in grammar declares no productions or is malformed
    #[error("invalid grammar in plugin '{plugin}': {reason}")]
    Grammar {
        /// Plug-in owning the grammar
        plugin: String,
        /// What is wrong with it
        reason: String,
    },

    /// The process-wide registry was already initialised
    #[error("handler registry is already initialised")]
    AlreadyInitialized,

    /// Lexicon loading failed
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_display() {
        assert_eq!(
            HandlerError::contract("missing child").to_string(),
            "contract violated: missing child"
        );
        assert_eq!(HandlerError::failed("no route").to_string(), "no route");
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::DuplicateHandler {
            key: "QBus".to_string(),
            first: "bus".to_string(),
            second: "transit".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "handler 'QBus' is registered by both 'bus' and 'transit'"
        );
    }
}
