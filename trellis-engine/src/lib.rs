//! Grammar-driven interpretation of aligned parse trees
//!
//! Plug-ins contribute grammar text and handlers keyed by category name.
//! The [`HandlerRegistry`] collects them once per process; the
//! [`Dispatcher`] walks an aligned tree bottom-up and threads an
//! [`Accumulator`] through the handlers. The root accumulator is turned
//! into an [`Outcome`] by the caller.

#![warn(missing_docs)]

pub mod accumulator;
pub mod dispatcher;
pub mod error;
pub mod grammar;
pub mod lexicon;
pub mod outcome;
pub mod plugin;
pub mod plugins;
pub mod registry;

// Re-export key types
pub use accumulator::{Accumulator, Derived};
pub use dispatcher::{interpret, Dispatcher};
pub use error::{
    DispatchError, EngineError, HandlerError, LexiconError, Result, E_EXCEPTION,
    E_QUERY_NOT_UNDERSTOOD,
};
pub use grammar::Grammar;
pub use lexicon::{EmptyLexicon, LexEntry, Lexicon, TableLexicon, WordEntry};
pub use outcome::Outcome;
pub use plugin::{handler, Handler, Options, Params, QueryPlugin, SimplePlugin};
pub use registry::{HandlerRegistry, PluginInfo, Registration, RegistryBuilder};

// Re-export from core for convenience
pub use trellis_core::{Alignment, Node};
