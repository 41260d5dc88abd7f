//! Detection of multi-word spans in a parse tree

use super::rules::AlignRules;
use crate::tree::{Node, Nonterminal};
use std::ops::Range;

/// Why a run of terminals was grouped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeReason {
    /// Adjacent sibling terminals sharing a name-like root
    NameRun {
        /// The shared root
        root: String,
    },
    /// A nonterminal whose terminal yield is a known idiomatic phrase
    Phrase {
        /// Category of the phrase nonterminal
        category: String,
    },
}

/// A contiguous run of terminals to collapse into one logical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeGroup {
    /// Leaf ordinal of the first member (the representative)
    pub first_leaf: usize,
    /// Number of member terminals
    pub len: usize,
    /// Detection reason
    pub reason: MergeReason,
}

impl MergeGroup {
    /// Leaf ordinals of all members
    pub fn leaves(&self) -> Range<usize> {
        self.first_leaf..self.first_leaf + self.len
    }
}

/// Find merge candidates, ordered by first leaf
///
/// Phrase shapes are matched first; a subtree claimed by a phrase is not
/// searched for name runs.
pub fn detect_groups(tree: &Node, rules: &AlignRules) -> Vec<MergeGroup> {
    let mut groups = Vec::new();
    if let Node::Nonterminal(nt) = tree {
        visit(nt, rules, &mut groups);
    }
    groups.sort_by_key(|group| group.first_leaf);
    groups
}

fn visit(nt: &Nonterminal, rules: &AlignRules, groups: &mut Vec<MergeGroup>) {
    if let Some(group) = match_phrase(nt, rules) {
        groups.push(group);
        return;
    }

    let mut run: Option<(&str, usize, usize)> = None;
    for child in nt.children() {
        match child {
            Node::Terminal(t) if rules.is_name_root(t.tag().root()) => {
                let root = t.tag().root();
                run = match run {
                    Some((current, first, len)) if current == root => Some((current, first, len + 1)),
                    previous => {
                        close_run(previous, rules, groups);
                        Some((root, t.leaf(), 1))
                    }
                };
            }
            other => {
                close_run(run.take(), rules, groups);
                if let Node::Nonterminal(inner) = other {
                    visit(inner, rules, groups);
                }
            }
        }
    }
    close_run(run, rules, groups);
}

fn close_run(run: Option<(&str, usize, usize)>, rules: &AlignRules, groups: &mut Vec<MergeGroup>) {
    if let Some((root, first_leaf, len)) = run {
        if len >= rules.names.min_run {
            groups.push(MergeGroup {
                first_leaf,
                len,
                reason: MergeReason::NameRun {
                    root: root.to_string(),
                },
            });
        }
    }
}

fn match_phrase(nt: &Nonterminal, rules: &AlignRules) -> Option<MergeGroup> {
    let shape = rules.phrase(nt.category())?;
    let mut terminals = Vec::new();
    for child in nt.children() {
        terminals.extend(child.terminals());
    }
    let matches = terminals.len() == shape.terminals.len()
        && terminals
            .iter()
            .zip(&shape.terminals)
            .all(|(t, root)| t.tag().root() == root);
    if !matches {
        return None;
    }
    Some(MergeGroup {
        first_leaf: terminals[0].leaf(),
        len: terminals.len(),
        reason: MergeReason::Phrase {
            category: nt.category().to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse_annotation;

    fn groups(annotation: &str) -> Vec<MergeGroup> {
        let tree = parse_annotation(annotation).unwrap();
        detect_groups(&tree, AlignRules::embedded())
    }

    #[test]
    fn test_name_run() {
        let found = groups("P NP-SUBJ person_kvk_nf person_kvk_nf person_kvk_nf /NP-SUBJ /P");
        assert_eq!(
            found,
            vec![MergeGroup {
                first_leaf: 0,
                len: 3,
                reason: MergeReason::NameRun {
                    root: "person".to_string()
                },
            }]
        );
    }

    #[test]
    fn test_run_broken_by_other_root() {
        let found = groups("P NP-SUBJ person_kvk_nf no_kvk_nf person_kvk_nf /NP-SUBJ /P");
        assert!(found.is_empty());
    }

    #[test]
    fn test_runs_split_by_punctuation() {
        let found =
            groups("P NP-PRD person_kk_nf person_kk_nf p person_kk_nf person_kk_nf person_kk_nf /NP-PRD /P");
        let spans: Vec<_> = found.iter().map(MergeGroup::leaves).collect();
        assert_eq!(spans, vec![0..2, 3..6]);
    }

    #[test]
    fn test_run_split_across_parents() {
        let found = groups("P NP person_kk_nf /NP NP person_kk_nf /NP /P");
        assert!(found.is_empty());
    }

    #[test]
    fn test_gender_change_keeps_run() {
        let found = groups("P NP person_kk_nf person_kvk_nf /NP /P");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len, 2);
    }

    #[test]
    fn test_date_phrase() {
        let found = groups("P ADVP ADVP-DATE-REL ao ao /ADVP-DATE-REL /ADVP /P");
        assert_eq!(
            found,
            vec![MergeGroup {
                first_leaf: 0,
                len: 2,
                reason: MergeReason::Phrase {
                    category: "ADVP-DATE-REL".to_string()
                },
            }]
        );
    }

    #[test]
    fn test_date_phrase_wrong_shape() {
        assert!(groups("P ADVP-DATE-REL fs ao /ADVP-DATE-REL /P").is_empty());
        assert!(groups("P ADVP-DATE-REL ao ao ao /ADVP-DATE-REL /P").is_empty());
    }

    #[test]
    fn test_plain_adverbs_not_merged() {
        assert!(groups("P ADVP ao ao /ADVP /P").is_empty());
    }

    #[test]
    fn test_groups_sorted() {
        let found = groups(
            "P ADVP-DATE-REL ao ao /ADVP-DATE-REL NP person_kk_nf person_kk_nf /NP /P",
        );
        let firsts: Vec<_> = found.iter().map(|g| g.first_leaf).collect();
        assert_eq!(firsts, vec![0, 2]);
    }
}
