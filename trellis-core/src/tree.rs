//! Parse tree reconstructed from a flat annotation

use crate::features::TerminalTag;
use crate::tag::FlatTag;
use std::fmt;
use std::ops::Range;

/// A leaf of the parse tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    tag: TerminalTag,
    leaf: usize,
    tokens: Range<usize>,
}

impl Terminal {
    /// Create an unaligned terminal
    pub fn new(tag: TerminalTag, leaf: usize) -> Self {
        Self {
            tag,
            leaf,
            tokens: 0..0,
        }
    }

    /// The parsed terminal tag
    pub fn tag(&self) -> &TerminalTag {
        &self.tag
    }

    /// Category name, the full tag text
    pub fn category(&self) -> &str {
        self.tag.raw()
    }

    /// Left-to-right ordinal among all terminals of the tree
    pub fn leaf(&self) -> usize {
        self.leaf
    }

    /// Surface tokens covered by this terminal (empty before alignment)
    pub fn tokens(&self) -> Range<usize> {
        self.tokens.clone()
    }

    pub(crate) fn set_leaf(&mut self, leaf: usize) {
        self.leaf = leaf;
    }

    pub(crate) fn set_tokens(&mut self, tokens: Range<usize>) {
        self.tokens = tokens;
    }
}

/// A phrase-level node with ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonterminal {
    category: String,
    children: Vec<Node>,
}

impl Nonterminal {
    /// Create a nonterminal
    pub fn new(category: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            category: category.into(),
            children,
        }
    }

    /// Category name
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Ordered children
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// The first segment of the category name (`NP` for `NP-SUBJ`)
    pub fn base_category(&self) -> &str {
        self.category
            .split(crate::tag::SEGMENT_SEPARATOR)
            .next()
            .unwrap_or(&self.category)
    }
}

/// A node of the parse tree
///
/// The tree is a strict hierarchy: every node is owned by its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Phrase node
    Nonterminal(Nonterminal),
    /// Leaf node
    Terminal(Terminal),
}

impl Node {
    /// Category name of the node
    pub fn category(&self) -> &str {
        match self {
            Node::Nonterminal(nt) => nt.category(),
            Node::Terminal(t) => t.category(),
        }
    }

    /// Whether the node is a terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    /// Terminals in left-to-right order
    pub fn terminals(&self) -> Vec<&Terminal> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a Terminal>) {
        match self {
            Node::Terminal(t) => out.push(t),
            Node::Nonterminal(nt) => {
                for child in nt.children() {
                    child.collect_terminals(out);
                }
            }
        }
    }

    /// Number of terminal leaves
    pub fn terminal_count(&self) -> usize {
        match self {
            Node::Terminal(_) => 1,
            Node::Nonterminal(nt) => nt.children().iter().map(Node::terminal_count).sum(),
        }
    }

    /// Range of leaf ordinals covered by this node
    pub fn leaf_span(&self) -> Range<usize> {
        let terminals = self.terminals();
        match (terminals.first(), terminals.last()) {
            (Some(first), Some(last)) => first.leaf()..last.leaf() + 1,
            _ => 0..0,
        }
    }

    /// Range of surface tokens covered by this node
    pub fn token_span(&self) -> Range<usize> {
        let terminals = self.terminals();
        match (terminals.first(), terminals.last()) {
            (Some(first), Some(last)) => first.tokens().start..last.tokens().end,
            _ => 0..0,
        }
    }

    /// Re-emit the flat annotation in pre-order
    pub fn flatten(&self) -> Vec<FlatTag> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<FlatTag>) {
        match self {
            Node::Terminal(t) => out.push(FlatTag::terminal(t.category())),
            Node::Nonterminal(nt) => {
                out.push(FlatTag::open(nt.category()));
                for child in nt.children() {
                    child.flatten_into(out);
                }
                out.push(FlatTag::close(nt.category()));
            }
        }
    }

    /// Indented multi-line rendering, one node per line
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        use std::fmt::Write;

        let indent = "  ".repeat(depth);
        match self {
            Node::Terminal(t) => {
                let _ = writeln!(out, "{indent}{} [{}]", t.category(), t.leaf());
            }
            Node::Nonterminal(nt) => {
                let _ = writeln!(out, "{indent}{}", nt.category());
                for child in nt.children() {
                    child.render_into(out, depth + 1);
                }
            }
        }
    }

    /// Depth of the tree; a lone terminal has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Node::Terminal(_) => 1,
            Node::Nonterminal(nt) => 1 + nt.children().iter().map(Node::depth).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = self.flatten();
        for (i, tag) in tags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
