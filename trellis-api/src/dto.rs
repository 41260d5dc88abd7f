//! Data Transfer Objects for API

use serde_json::Value;
use std::collections::BTreeMap;
use trellis_core::LogicalToken;
use trellis_engine::Outcome;

#[cfg(feature = "serde")]
use crate::error::Result;

/// One query to interpret: the sentence and the parser's annotation of it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Input {
    /// Caller-supplied identifier echoed in the output
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,
    /// Raw sentence
    pub sentence: String,
    /// Flat annotation produced by the parser
    pub annotation: String,
}

impl Input {
    /// Create an input
    pub fn new(sentence: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            id: None,
            sentence: sentence.into(),
            annotation: annotation.into(),
        }
    }

    /// Attach an identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Parse one JSON object per line, skipping blank lines
    #[cfg(feature = "serde")]
    pub fn from_json_lines(text: &str) -> Result<Vec<Input>> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Ok(serde_json::from_str::<Input>(line)?))
            .collect()
    }
}

/// Logical token for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenDTO {
    /// Covering text
    pub text: String,
    /// Byte offset where the token starts
    pub start: usize,
    /// Byte offset where the token ends
    pub end: usize,
    /// Number of surface tokens merged into this one
    pub width: usize,
}

impl From<&LogicalToken> for TokenDTO {
    fn from(token: &LogicalToken) -> Self {
        Self {
            text: token.text.clone(),
            start: token.span.start,
            end: token.span.end,
            width: token.width(),
        }
    }
}

/// Result of interpreting one input
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interpretation {
    /// Identifier of the input
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,
    /// The interpreted sentence
    pub sentence: String,
    /// What the root accumulator amounts to
    pub outcome: Outcome,
    /// Fields of the root accumulator
    pub fields: BTreeMap<String, Value>,
    /// Logical tokens, one per terminal
    pub tokens: Vec<TokenDTO>,
    /// Aligned tree in flat notation, merged terminals collapsed
    pub aligned: String,
    /// Alignment warnings
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<String>,
}

impl Interpretation {
    /// Whether a handler determined the query type
    pub fn is_answered(&self) -> bool {
        self.outcome.is_answered()
    }
}

/// Summary over a batch of interpretations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    /// Inputs processed
    pub total: usize,
    /// Inputs with a query type
    pub answered: usize,
    /// Inputs no handler understood
    pub not_understood: usize,
    /// Inputs whose handlers failed
    pub failed: usize,
    /// Inputs rejected before dispatch
    pub rejected: usize,
    /// Inputs aligned with a warning
    pub warnings: usize,
}

impl BatchSummary {
    /// Tally a batch
    pub fn from_results<'a, E: 'a>(
        results: impl IntoIterator<Item = &'a std::result::Result<Interpretation, E>>,
    ) -> Self {
        let mut summary = BatchSummary::default();
        for result in results {
            summary.total += 1;
            match result {
                Ok(interpretation) => {
                    match interpretation.outcome {
                        Outcome::Answered { .. } => summary.answered += 1,
                        Outcome::NotUnderstood => summary.not_understood += 1,
                        Outcome::Failed { .. } => summary.failed += 1,
                    }
                    if !interpretation.warnings.is_empty() {
                        summary.warnings += 1;
                    }
                }
                Err(_) => summary.rejected += 1,
            }
        }
        summary
    }
}
