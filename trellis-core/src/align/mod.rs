//! Token alignment
//!
//! The tree's terminal count and the tokenizer's token count often differ:
//! a personal name or a fixed date phrase can be several words long while
//! the parser marks it with several terminals that really denote one unit.
//! Alignment runs in two phases:
//!
//! 1. [`detect_groups`] finds multi-word candidates in the tree;
//! 2. terminals and surface tokens are walked in lockstep, each group
//!    consuming as many tokens as it has members and collapsing them into
//!    one [`LogicalToken`].
//!
//! Afterwards every terminal of the annotated tree owns exactly one
//! logical token, matched by leaf ordinal.

mod detect;
mod rules;

pub use detect::{detect_groups, MergeGroup, MergeReason};
pub use rules::{AlignRules, NameRules, PhraseShape, RulesMetadata};

use crate::token::{LogicalToken, SurfaceToken};
use crate::tree::{Node, Terminal};
use std::ops::Range;
use thiserror::Error;

/// Counts that no known multi-word pattern explains
///
/// The alignment carrying this warning is best-effort: tokens were
/// assigned one-to-one from the left, surplus tokens were folded into the
/// last logical token and terminals without tokens received empty
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not reconcile {terminals} terminal(s) ({units} unit(s) after merging) with {tokens} surface token(s)")]
pub struct AlignmentWarning {
    /// Terminal leaves before merging
    pub terminals: usize,
    /// Logical units after merging
    pub units: usize,
    /// Surface tokens supplied
    pub tokens: usize,
}

/// Result of aligning a tree with surface tokens
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Tree with merged terminals collapsed and token ranges attached
    pub tree: Node,
    /// One logical token per terminal, indexed by leaf ordinal
    pub tokens: Vec<LogicalToken>,
    /// Merge groups that were applied, by original leaf ordinal
    pub groups: Vec<MergeGroup>,
    /// Present when the counts could not be reconciled
    pub warning: Option<AlignmentWarning>,
}

impl Alignment {
    /// The logical token aligned with a terminal
    pub fn token_for(&self, terminal: &Terminal) -> Option<&LogicalToken> {
        self.tokens.get(terminal.leaf())
    }

    /// Whether the alignment needed no fallback
    pub fn is_exact(&self) -> bool {
        self.warning.is_none()
    }
}

/// Aligner configured with rules and, optionally, the original sentence
#[derive(Debug, Clone, Copy)]
pub struct Aligner<'a> {
    rules: &'a AlignRules,
    sentence: Option<&'a str>,
}

impl<'a> Aligner<'a> {
    /// Create an aligner
    pub fn new(rules: &'a AlignRules) -> Self {
        Self {
            rules,
            sentence: None,
        }
    }

    /// Use the sentence to render merged token text with its whitespace
    pub fn with_sentence(mut self, sentence: &'a str) -> Self {
        self.sentence = Some(sentence);
        self
    }

    /// Align `tree` with `tokens`
    pub fn align(&self, tree: Node, tokens: &[SurfaceToken]) -> Alignment {
        let terminals = tree.terminal_count();
        let groups = detect_groups(&tree, self.rules);
        let units = units(terminals, &groups);

        let (logical, warning) = if terminals == tokens.len() {
            (self.lockstep(&units, tokens), None)
        } else {
            let warning = AlignmentWarning {
                terminals,
                units: units.len(),
                tokens: tokens.len(),
            };
            log::warn!("{warning}; using best-effort alignment");
            (self.best_effort(&units, tokens), Some(warning))
        };

        let mut unit_of = vec![(0usize, false); terminals];
        for (index, unit) in units.iter().enumerate() {
            for leaf in unit.clone() {
                unit_of[leaf] = (index, leaf == unit.start);
            }
        }
        let mut tree = tree;
        annotate(&mut tree, &unit_of, &logical);

        log::debug!(
            "aligned {} terminal(s) with {} token(s) into {} logical token(s), {} merge group(s)",
            terminals,
            tokens.len(),
            logical.len(),
            groups.len()
        );

        Alignment {
            tree,
            tokens: logical,
            groups,
            warning,
        }
    }

    fn lockstep(&self, units: &[Range<usize>], tokens: &[SurfaceToken]) -> Vec<LogicalToken> {
        let mut cursor = 0;
        units
            .iter()
            .map(|unit| {
                let source = cursor..cursor + unit.len();
                cursor = source.end;
                LogicalToken::merge(tokens, source, self.sentence)
            })
            .collect()
    }

    fn best_effort(&self, units: &[Range<usize>], tokens: &[SurfaceToken]) -> Vec<LogicalToken> {
        let end_offset = tokens.last().map_or(0, |token| token.span.end);
        let mut cursor = 0;
        let mut logical: Vec<LogicalToken> = units
            .iter()
            .map(|unit| {
                if cursor >= tokens.len() {
                    return LogicalToken::missing(end_offset, tokens.len());
                }
                let source = cursor..(cursor + unit.len()).min(tokens.len());
                cursor = source.end;
                LogicalToken::merge(tokens, source, self.sentence)
            })
            .collect();

        if cursor < tokens.len() {
            if let Some(last) = logical.last_mut() {
                *last = LogicalToken::merge(tokens, last.source.start..tokens.len(), self.sentence);
            }
        }
        logical
    }
}

/// Align with the given rules and no sentence text
pub fn align(tree: Node, tokens: &[SurfaceToken], rules: &AlignRules) -> Alignment {
    Aligner::new(rules).align(tree, tokens)
}

/// Partition leaves `0..terminals` into units: one per group, one per
/// ungrouped terminal
fn units(terminals: usize, groups: &[MergeGroup]) -> Vec<Range<usize>> {
    let mut units = Vec::with_capacity(terminals);
    let mut groups = groups.iter().peekable();
    let mut leaf = 0;
    while leaf < terminals {
        match groups.peek() {
            Some(group) if group.first_leaf == leaf => {
                units.push(group.leaves());
                leaf = group.leaves().end;
                groups.next();
            }
            _ => {
                units.push(leaf..leaf + 1);
                leaf += 1;
            }
        }
    }
    units
}

/// Collapse group members into their representative and attach tokens
fn annotate(node: &mut Node, unit_of: &[(usize, bool)], logical: &[LogicalToken]) {
    let Node::Nonterminal(nt) = node else {
        return;
    };
    nt.children_mut().retain(|child| match child {
        Node::Terminal(t) => unit_of[t.leaf()].1,
        Node::Nonterminal(_) => true,
    });
    for child in nt.children_mut() {
        match child {
            Node::Terminal(t) => {
                let (unit, _) = unit_of[t.leaf()];
                t.set_leaf(unit);
                t.set_tokens(logical[unit].source.clone());
            }
            Node::Nonterminal(_) => annotate(child, unit_of, logical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse_annotation;

    #[test]
    fn test_units_partition() {
        let groups = vec![MergeGroup {
            first_leaf: 1,
            len: 2,
            reason: MergeReason::Phrase {
                category: "ADVP-DATE-REL".to_string(),
            },
        }];
        assert_eq!(units(4, &groups), vec![0..1, 1..3, 3..4]);
        assert_eq!(units(0, &[]), Vec::<Range<usize>>::new());
    }

    #[test]
    fn test_exact_alignment_collapses_phrase() {
        let sentence = "kemur á morgun";
        let tree =
            parse_annotation("P VP so_et_fh /VP ADVP-DATE-REL ao ao /ADVP-DATE-REL /P").unwrap();
        let tokens = SurfaceToken::words(sentence);
        let alignment = Aligner::new(AlignRules::embedded())
            .with_sentence(sentence)
            .align(tree, &tokens);

        assert!(alignment.is_exact());
        assert_eq!(alignment.tokens.len(), 2);
        assert_eq!(alignment.tree.terminal_count(), 2);
        assert_eq!(alignment.tokens[1].text, "á morgun");
        assert_eq!(
            alignment.tree.to_string(),
            "P VP so_et_fh /VP ADVP-DATE-REL ao /ADVP-DATE-REL /P"
        );
        let terminals = alignment.tree.terminals();
        assert_eq!(terminals[1].leaf(), 1);
        assert_eq!(terminals[1].tokens(), 1..3);
        assert_eq!(alignment.token_for(terminals[1]).unwrap().text, "á morgun");
    }

    #[test]
    fn test_surplus_tokens_folded_into_last() {
        let tree = parse_annotation("P no_nf so_fh /P").unwrap();
        let tokens = SurfaceToken::words("hundur geltir hátt");
        let alignment = align(tree, &tokens, &AlignRules::none());

        let warning = alignment.warning.clone().unwrap();
        assert_eq!(warning.terminals, 2);
        assert_eq!(warning.tokens, 3);
        assert_eq!(alignment.tokens.len(), 2);
        assert_eq!(alignment.tokens[1].text, "geltir hátt");
        assert_eq!(alignment.tokens[1].source, 1..3);
    }

    #[test]
    fn test_missing_tokens_get_placeholders() {
        let tree = parse_annotation("P no_nf so_fh ao /P").unwrap();
        let tokens = SurfaceToken::words("hundur");
        let alignment = align(tree, &tokens, &AlignRules::none());

        assert!(!alignment.is_exact());
        assert_eq!(alignment.tokens.len(), 3);
        assert_eq!(alignment.tokens[0].text, "hundur");
        assert!(alignment.tokens[1].is_missing());
        assert!(alignment.tokens[2].is_missing());
        assert_eq!(alignment.tree.terminal_count(), 3);
    }

    #[test]
    fn test_no_tokens_at_all() {
        let tree = parse_annotation("P ao /P").unwrap();
        let alignment = align(tree, &[], &AlignRules::none());
        assert_eq!(alignment.tokens.len(), 1);
        assert!(alignment.tokens[0].is_missing());
    }
}
