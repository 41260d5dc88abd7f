//! Handler registry
//!
//! Handlers from every plug-in are gathered once into an immutable map
//! from category name to handler. The process-wide instance lives in a
//! `OnceLock` and is read concurrently without locking.

use crate::error::{EngineError, Result};
use crate::grammar::Grammar;
use crate::plugin::{Handler, Options, QueryPlugin};
use crate::plugins;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};
use trellis_core::tag::is_nonterminal_name;

static GLOBAL: OnceLock<HandlerRegistry> = OnceLock::new();

/// A registered handler with its owner's options
#[derive(Clone)]
pub struct Registration {
    plugin: Arc<str>,
    handler: Handler,
    options: Arc<Options>,
}

impl Registration {
    /// Name of the owning plug-in
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// The handler function
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// The owning plug-in's options
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("plugin", &self.plugin)
            .finish_non_exhaustive()
    }
}

/// Summary of one installed plug-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plug-in name
    pub name: String,
    /// Nonterminals its grammar declares
    pub nonterminals: BTreeSet<String>,
    /// Handler keys it registered, sorted
    pub handlers: Vec<String>,
}

/// Immutable map from category name to handler
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    entries: HashMap<String, Registration>,
    plugins: Vec<PluginInfo>,
}

impl HandlerRegistry {
    /// Start assembling a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry without handlers
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the built-in plug-ins
    pub fn builtin() -> Result<Self> {
        plugins::builtin()
            .into_iter()
            .fold(Self::builder(), RegistryBuilder::plugin_boxed)
            .build()
    }

    /// The process-wide registry
    ///
    /// Initialised with the built-in plug-ins unless [`install`](Self::install)
    /// ran first.
    pub fn global() -> &'static HandlerRegistry {
        GLOBAL.get_or_init(|| Self::builtin().expect("built-in plug-ins must register cleanly"))
    }

    /// Make `registry` the process-wide registry
    pub fn install(registry: HandlerRegistry) -> Result<&'static HandlerRegistry> {
        GLOBAL
            .set(registry)
            .map_err(|_| EngineError::AlreadyInitialized)?;
        Ok(Self::global())
    }

    /// Handler registered for an exact category name
    pub fn get(&self, category: &str) -> Option<&Registration> {
        self.entries.get(category)
    }

    /// Whether a handler is registered for `category`
    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered category names, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Installed plug-ins in registration order
    pub fn plugins(&self) -> &[PluginInfo] {
        &self.plugins
    }
}

struct Contribution {
    name: String,
    grammar: Grammar,
    handlers: Vec<(String, Handler)>,
    options: Options,
}

/// Collects plug-ins and validates them into a [`HandlerRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    contributions: Vec<Contribution>,
}

impl RegistryBuilder {
    /// Add a plug-in
    pub fn plugin<P: QueryPlugin + ?Sized>(mut self, plugin: &P) -> Self {
        self.contributions.push(Contribution {
            name: plugin.name().to_string(),
            grammar: Grammar::scan(plugin.grammar()),
            handlers: plugin.handlers(),
            options: plugin.options(),
        });
        self
    }

    /// Add a boxed plug-in
    pub fn plugin_boxed(self, plugin: Box<dyn QueryPlugin>) -> Self {
        self.plugin(&*plugin)
    }

    /// Validate the contributions and freeze them
    ///
    /// Fails on a repeated plug-in name, a handler key registered twice, a
    /// non-empty grammar without productions, or a nonterminal handler key
    /// that no contributed grammar declares. Terminal handler keys need no
    /// declaration.
    pub fn build(self) -> Result<HandlerRegistry> {
        let mut declared = BTreeSet::new();
        let mut names = BTreeSet::new();
        for contribution in &self.contributions {
            if !names.insert(contribution.name.as_str()) {
                return Err(EngineError::DuplicatePlugin(contribution.name.clone()));
            }
            if contribution.grammar.is_empty() && !contribution.handlers.is_empty() {
                let has_nonterminal_handler = contribution
                    .handlers
                    .iter()
                    .any(|(key, _)| is_nonterminal_name(key));
                if has_nonterminal_handler {
                    return Err(EngineError::Grammar {
                        plugin: contribution.name.clone(),
                        reason: "no productions declared".to_string(),
                    });
                }
            }
            declared.extend(contribution.grammar.nonterminals().iter().cloned());
        }

        let mut registry = HandlerRegistry::default();
        for contribution in self.contributions {
            let plugin: Arc<str> = Arc::from(contribution.name.as_str());
            let options = Arc::new(contribution.options);
            let mut keys = Vec::with_capacity(contribution.handlers.len());

            for (key, handler) in contribution.handlers {
                if is_nonterminal_name(&key) && !declared.contains(&key) {
                    return Err(EngineError::UndeclaredNonterminal {
                        plugin: contribution.name,
                        key,
                    });
                }
                if let Some(existing) = registry.entries.get(&key) {
                    return Err(EngineError::DuplicateHandler {
                        key,
                        first: existing.plugin.to_string(),
                        second: contribution.name,
                    });
                }
                keys.push(key.clone());
                registry.entries.insert(
                    key,
                    Registration {
                        plugin: Arc::clone(&plugin),
                        handler,
                        options: Arc::clone(&options),
                    },
                );
            }

            keys.sort_unstable();
            log::debug!(
                "registered plugin '{}' with {} handler(s)",
                contribution.name,
                keys.len()
            );
            registry.plugins.push(PluginInfo {
                name: contribution.name,
                nonterminals: contribution.grammar.nonterminals().clone(),
                handlers: keys,
            });
        }
        Ok(registry)
    }
}
