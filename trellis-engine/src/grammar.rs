//! Plug-in grammar declarations
//!
//! Plug-ins contribute grammar text in the parser's production notation.
//! The engine does not compile grammars; it only reads the left-hand side
//! of each production to learn which nonterminals a plug-in declares, so
//! that handler keys can be checked against them.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Marker for comment lines in grammar text
pub const COMMENT_MARKER: char = '#';

fn production_head() -> &'static Regex {
    static HEAD: OnceLock<Regex> = OnceLock::new();
    HEAD.get_or_init(|| {
        // `Name →`, `Name/var →` and `Name/var1/var2 ->`
        Regex::new(r"^\s*([A-Z][\w-]*)((?:/\w+)*)\s*(?:→|->)")
            .expect("production head pattern is valid")
    })
}

/// Nonterminals declared by a grammar text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    nonterminals: BTreeSet<String>,
    variants: BTreeSet<String>,
}

impl Grammar {
    /// Scan grammar text for production heads
    pub fn scan(text: &str) -> Self {
        let mut grammar = Grammar::default();
        for line in text.lines() {
            let line = match line.find(COMMENT_MARKER) {
                Some(at) => &line[..at],
                None => line,
            };
            let Some(caps) = production_head().captures(line) else {
                continue;
            };
            grammar.nonterminals.insert(caps[1].to_string());
            grammar.variants.extend(
                caps[2]
                    .split('/')
                    .filter(|variant| !variant.is_empty())
                    .map(str::to_string),
            );
        }
        grammar
    }

    /// Declared nonterminal names, variants stripped
    pub fn nonterminals(&self) -> &BTreeSet<String> {
        &self.nonterminals
    }

    /// Variant names used on left-hand sides (e.g. `fall`)
    pub fn variants(&self) -> &BTreeSet<String> {
        &self.variants
    }

    /// Whether the grammar declares `name`
    pub fn declares(&self, name: &str) -> bool {
        self.nonterminals.contains(name)
    }

    /// Whether no production was found
    pub fn is_empty(&self) -> bool {
        self.nonterminals.is_empty()
    }
}
