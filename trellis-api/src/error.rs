//! API error types

use thiserror::Error;
use trellis_core::{AlignmentWarning, CoreError, RulesError};
use trellis_engine::{DispatchError, EngineError, LexiconError};

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The annotation could not be turned into a tree
    #[error("invalid annotation: {0}")]
    Annotation(#[from] CoreError),

    /// Alignment rules could not be loaded
    #[error("alignment rules: {0}")]
    Rules(#[from] RulesError),

    /// Lexicon table could not be loaded
    #[error("lexicon: {0}")]
    Lexicon(#[from] LexiconError),

    /// Engine error
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// A handler violated its contract
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// Counts could not be reconciled and strict alignment is on
    #[error("strict alignment: {0}")]
    Alignment(AlignmentWarning),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Worker pool could not be created
    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
