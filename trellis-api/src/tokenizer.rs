//! Surface tokenization
//!
//! Interpretation needs the sentence split the same way the parser saw
//! it. Callers with a real tokenizer implement [`Tokenizer`]; the
//! [`WhitespaceTokenizer`] covers plain text.

use trellis_core::{Span, SurfaceToken, TokenKind};

/// Splits a sentence into surface tokens
pub trait Tokenizer: Send + Sync {
    /// Tokens in reading order with byte spans into `sentence`
    fn tokenize(&self, sentence: &str) -> Vec<SurfaceToken>;
}

/// Whitespace splitting with punctuation detached
///
/// Leading and trailing punctuation marks become tokens of their own.
/// A word with an inner dot (`a.m.k.`) is an abbreviation and keeps its
/// final dot. Words starting with a digit and made of digits and
/// separators are numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, sentence: &str) -> Vec<SurfaceToken> {
        let mut tokens = Vec::new();
        for word in SurfaceToken::words(sentence) {
            split_word(&word.text, word.span.start, &mut tokens);
        }
        tokens
    }
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<SurfaceToken> + Send + Sync,
{
    fn tokenize(&self, sentence: &str) -> Vec<SurfaceToken> {
        self(sentence)
    }
}

fn split_word(word: &str, offset: usize, out: &mut Vec<SurfaceToken>) {
    let Some(start) = word.find(char::is_alphanumeric) else {
        push_marks(word, offset, out);
        return;
    };
    push_marks(&word[..start], offset, out);

    let body = &word[start..];
    let mut end = body
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map_or(body.len(), |(i, c)| i + c.len_utf8());
    let core = &body[..end];

    let kind = if is_number(core) {
        TokenKind::Number
    } else if core.contains('.') {
        if body[end..].starts_with('.') {
            end += 1;
        }
        TokenKind::Abbreviation
    } else {
        TokenKind::Word
    };

    let begin = offset + start;
    out.push(SurfaceToken::new(
        &body[..end],
        Span::new(begin, begin + end),
        kind,
    ));
    push_marks(&body[end..], begin + end, out);
}

fn push_marks(marks: &str, offset: usize, out: &mut Vec<SurfaceToken>) {
    for (i, c) in marks.char_indices() {
        let start = offset + i;
        out.push(SurfaceToken::new(
            c.to_string(),
            Span::new(start, start + c.len_utf8()),
            TokenKind::Punctuation,
        ));
    }
}

fn is_number(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':'))
}
