//! Post-order tree walk
//!
//! Children are interpreted left to right before their parent. Each node
//! passes through the same states: children pending, children merged,
//! handler applied (or skipped), done. A handler failure aborts the walk;
//! contract violations surface as [`DispatchError`], any other failure is
//! caught once at the root and recorded on a fresh accumulator.

use crate::accumulator::{Accumulator, Derived};
use crate::error::{DispatchError, HandlerError, E_EXCEPTION};
use crate::lexicon::{EmptyLexicon, LexEntry, Lexicon};
use crate::plugin::Params;
use crate::registry::HandlerRegistry;
use trellis_core::{Alignment, Gender, Node, Nonterminal, Terminal};

/// Root used by the tag of personal-name terminals
pub const PERSON_ROOT: &str = "person";

static EMPTY_LEXICON: EmptyLexicon = EmptyLexicon;

/// Why the walk stopped early
enum Abort {
    Contract { category: String, message: String },
    Failed { category: String, message: String },
}

impl Abort {
    fn new(category: &str, error: HandlerError) -> Self {
        let category = category.to_string();
        match error {
            HandlerError::Contract(message) => Abort::Contract { category, message },
            HandlerError::Failed(message) => Abort::Failed { category, message },
        }
    }
}

/// Interprets aligned trees with a handler registry and a lexicon
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a HandlerRegistry,
    lexicon: &'a dyn Lexicon,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher that knows no words
    pub fn new(registry: &'a HandlerRegistry) -> Self {
        Self {
            registry,
            lexicon: &EMPTY_LEXICON,
        }
    }

    /// Use `lexicon` for terminal renderings
    pub fn with_lexicon(mut self, lexicon: &'a dyn Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Interpret an aligned tree, returning the root accumulator
    pub fn interpret(&self, alignment: &Alignment) -> Result<Accumulator, DispatchError> {
        match self.visit(&alignment.tree, alignment) {
            Ok(acc) => {
                log::debug!(
                    "interpreted tree: qtype={:?}, {} field(s)",
                    acc.qtype(),
                    acc.fields().count()
                );
                Ok(acc)
            }
            Err(Abort::Contract { category, message }) => {
                Err(DispatchError::Contract { category, message })
            }
            Err(Abort::Failed { category, message }) => {
                log::warn!("handler for '{category}' failed: {message}");
                Ok(Accumulator::failed(format!("{E_EXCEPTION}: {message}")))
            }
        }
    }

    fn visit(&self, node: &Node, alignment: &Alignment) -> Result<Accumulator, Abort> {
        match node {
            Node::Terminal(terminal) => self.visit_terminal(node, terminal, alignment),
            Node::Nonterminal(nt) => self.visit_nonterminal(node, nt, alignment),
        }
    }

    fn visit_nonterminal(
        &self,
        node: &Node,
        nt: &Nonterminal,
        alignment: &Alignment,
    ) -> Result<Accumulator, Abort> {
        let children = nt
            .children()
            .iter()
            .map(|child| self.visit(child, alignment))
            .collect::<Result<Vec<_>, _>>()?;
        let mut acc = Accumulator::merged(&children);

        if let Some(registration) = self.registry.get(nt.category()) {
            log::trace!("applying handler for {}", nt.category());
            let params = Params::for_children(&children, registration.options());
            (registration.handler())(node, &params, &mut acc)
                .map_err(|error| Abort::new(nt.category(), error))?;
        }
        Ok(acc)
    }

    fn visit_terminal(
        &self,
        node: &Node,
        terminal: &Terminal,
        alignment: &Alignment,
    ) -> Result<Accumulator, Abort> {
        let token = alignment.token_for(terminal);
        let text = token.map_or("", |token| token.text.as_str());
        let mut acc = Accumulator::with_derived(self.render(text, terminal));

        if let Some(registration) = self.registry.get(terminal.category()) {
            log::trace!("applying handler for terminal {}", terminal.category());
            let params = Params::for_token(token, registration.options());
            (registration.handler())(node, &params, &mut acc)
                .map_err(|error| Abort::new(terminal.category(), error))?;
        }
        Ok(acc)
    }

    fn render(&self, text: &str, terminal: &Terminal) -> Derived {
        let tag = terminal.tag();
        let entry = if text.is_empty() {
            None
        } else {
            self.lexicon.lookup(text, tag)
        };
        let LexEntry {
            canonical,
            nominative,
            indefinite,
        } = entry.unwrap_or_else(|| LexEntry::verbatim(text));

        let gender = (tag.root() == PERSON_ROOT).then(|| self.name_gender(text, terminal));

        Derived {
            text: text.to_string(),
            canonical,
            nominative,
            indefinite,
            gender,
        }
    }

    /// Lexicon guess from the first name, then the tag, then neuter
    fn name_gender(&self, text: &str, terminal: &Terminal) -> Gender {
        text.split_whitespace()
            .next()
            .and_then(|first| self.lexicon.name_gender(first))
            .or(terminal.tag().features().gender)
            .unwrap_or(Gender::Neuter)
    }
}

impl Default for Dispatcher<'static> {
    fn default() -> Self {
        Self::new(HandlerRegistry::global())
    }
}

/// Interpret with the process-wide registry and no lexicon
pub fn interpret(alignment: &Alignment) -> Result<Accumulator, DispatchError> {
    Dispatcher::default().interpret(alignment)
}
