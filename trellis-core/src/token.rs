//! Surface tokens from the external tokenizer and the logical tokens
//! produced by alignment

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Byte span in the original sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span at `offset`
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Smallest span covering both spans
    pub fn union(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// As a byte range
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Simple lexical class assigned by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Ordinary word
    Word,
    /// Punctuation mark
    Punctuation,
    /// Abbreviation such as `a.m.k.`
    Abbreviation,
    /// Numeral
    Number,
    /// Anything else
    Other,
}

/// One unit produced by the independent tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceToken {
    /// Token text
    pub text: String,
    /// Byte span in the sentence
    pub span: Span,
    /// Lexical class
    pub kind: TokenKind,
}

impl SurfaceToken {
    /// Create a surface token
    pub fn new(text: impl Into<String>, span: Span, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            span,
            kind,
        }
    }

    /// Build word tokens from whitespace separated text, with spans
    ///
    /// Handy where no real tokenizer is at hand.
    pub fn words(sentence: &str) -> Vec<SurfaceToken> {
        let mut tokens = Vec::new();
        let mut start = None;
        for (offset, ch) in sentence.char_indices() {
            match (ch.is_whitespace(), start) {
                (true, Some(begin)) => {
                    tokens.push(Self::word(&sentence[begin..offset], begin));
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }
        if let Some(begin) = start {
            tokens.push(Self::word(&sentence[begin..], begin));
        }
        tokens
    }

    fn word(text: &str, offset: usize) -> SurfaceToken {
        SurfaceToken::new(text, Span::new(offset, offset + text.len()), TokenKind::Word)
    }
}

/// One or more surface tokens treated as a single unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalToken {
    /// Covering text; whitespace between merged tokens is preserved
    pub text: String,
    /// Union of the merged spans
    pub span: Span,
    /// Indices of the merged surface tokens
    pub source: Range<usize>,
}

impl LogicalToken {
    /// Merge a contiguous run of surface tokens
    ///
    /// When `sentence` is given the text is the sentence slice covering the
    /// run; otherwise the token texts are joined with single spaces.
    pub fn merge(tokens: &[SurfaceToken], source: Range<usize>, sentence: Option<&str>) -> Self {
        let run = &tokens[source.clone()];
        let span = run
            .iter()
            .map(|token| token.span)
            .reduce(|acc, span| acc.union(&span))
            .unwrap_or_default();
        let text = sentence
            .and_then(|s| s.get(span.range()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                run.iter()
                    .map(|token| token.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            });
        Self { text, span, source }
    }

    /// A placeholder for a terminal no surface token could be assigned to
    pub fn missing(at: usize, source_index: usize) -> Self {
        Self {
            text: String::new(),
            span: Span::empty(at),
            source: source_index..source_index,
        }
    }

    /// Number of surface tokens merged into this one
    pub fn width(&self) -> usize {
        self.source.len()
    }

    /// Whether this token is a placeholder without text
    pub fn is_missing(&self) -> bool {
        self.source.is_empty()
    }
}
