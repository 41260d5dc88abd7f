//! Bracket matcher and tree builder
//!
//! Consumes classified tags and rebuilds the nested tree with an explicit
//! stack of open frames. Closing is by name: a close tag must name the
//! innermost open nonterminal, anonymous nesting is not enough.

use crate::error::{CoreError, StructuralError};
use crate::features::TerminalTag;
use crate::tag::{tokenize_annotation, FlatTag, TagKind};
use crate::tree::{Node, Nonterminal, Terminal};

/// A nonterminal whose close tag has not been seen yet
#[derive(Debug)]
struct Frame {
    category: String,
    children: Vec<Node>,
}

/// Incremental tree builder
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Frame>,
    roots: Vec<Node>,
    leaves: usize,
    position: usize,
}

impl TreeBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next tag of the stream
    pub fn push(&mut self, tag: &FlatTag) -> Result<(), StructuralError> {
        let position = self.position;
        self.position += 1;

        match tag.kind() {
            TagKind::Open => {
                self.stack.push(Frame {
                    category: tag.category().to_string(),
                    children: Vec::new(),
                });
            }
            TagKind::Terminal => {
                let frame = self
                    .stack
                    .last_mut()
                    .ok_or_else(|| StructuralError::OrphanTerminal {
                        tag: tag.raw().to_string(),
                        position,
                    })?;
                let terminal = Terminal::new(TerminalTag::parse(tag.category()), self.leaves);
                self.leaves += 1;
                frame.children.push(Node::Terminal(terminal));
            }
            TagKind::Close => {
                let frame = self
                    .stack
                    .pop()
                    .ok_or_else(|| StructuralError::UnexpectedClose {
                        found: tag.category().to_string(),
                        position,
                    })?;
                if frame.category != tag.category() {
                    return Err(StructuralError::Mismatched {
                        expected: frame.category,
                        found: tag.category().to_string(),
                        position,
                    });
                }
                let node = Node::Nonterminal(Nonterminal::new(frame.category, frame.children));
                match self.stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => self.roots.push(node),
                }
            }
        }

        Ok(())
    }

    /// Finish the stream and return the root
    pub fn finish(mut self) -> Result<Node, StructuralError> {
        if !self.stack.is_empty() {
            return Err(StructuralError::Unclosed {
                open: self.stack.drain(..).map(|frame| frame.category).collect(),
            });
        }
        match self.roots.len() {
            0 => Err(StructuralError::Empty),
            1 => Ok(self.roots.remove(0)),
            count => Err(StructuralError::MultipleRoots { count }),
        }
    }
}

/// Build a tree from a classified tag stream
pub fn build<'a>(tags: impl IntoIterator<Item = &'a FlatTag>) -> Result<Node, StructuralError> {
    let mut builder = TreeBuilder::new();
    for tag in tags {
        builder.push(tag)?;
    }
    let tree = builder.finish()?;
    log::debug!(
        "built tree rooted at {} with {} terminals",
        tree.category(),
        tree.terminal_count()
    );
    Ok(tree)
}

/// Classify and build in one step
pub fn parse_annotation(annotation: &str) -> Result<Node, CoreError> {
    let tags = tokenize_annotation(annotation)?;
    Ok(build(&tags)?)
}
