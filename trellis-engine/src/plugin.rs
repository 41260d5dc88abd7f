//! Query plug-in contract
//!
//! A plug-in contributes grammar text declaring its nonterminals, a set
//! of handlers keyed by exact category name, and static options handed to
//! each of its handlers.

use crate::accumulator::Accumulator;
use crate::error::HandlerError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use trellis_core::{LogicalToken, Node};

/// Static options of a plug-in
pub type Options = BTreeMap<String, Value>;

/// A handler invoked for every node of its category
pub type Handler =
    Arc<dyn Fn(&Node, &Params<'_>, &mut Accumulator) -> Result<(), HandlerError> + Send + Sync>;

/// Read-only parameters passed to a handler
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    children: &'a [Accumulator],
    options: &'a Options,
    token: Option<&'a LogicalToken>,
}

impl<'a> Params<'a> {
    /// Parameters for a nonterminal
    pub fn for_children(children: &'a [Accumulator], options: &'a Options) -> Self {
        Self {
            children,
            options,
            token: None,
        }
    }

    /// Parameters for a terminal
    pub fn for_token(token: Option<&'a LogicalToken>, options: &'a Options) -> Self {
        Self {
            children: &[],
            options,
            token,
        }
    }

    /// Accumulators of the node's children, left to right
    pub fn children(&self) -> &'a [Accumulator] {
        self.children
    }

    /// One child's accumulator
    pub fn child(&self, index: usize) -> Option<&'a Accumulator> {
        self.children.get(index)
    }

    /// The plug-in's static options
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// One static option
    pub fn option(&self, name: &str) -> Option<&'a Value> {
        self.options.get(name)
    }

    /// The logical token of a terminal
    pub fn token(&self) -> Option<&'a LogicalToken> {
        self.token
    }
}

/// Wrap a function or closure as a [`Handler`]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Node, &Params<'_>, &mut Accumulator) -> Result<(), HandlerError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// A grammar contribution with its handlers
pub trait QueryPlugin: Send + Sync {
    /// Unique plug-in name
    fn name(&self) -> &str;

    /// Grammar text declaring the plug-in's nonterminals
    fn grammar(&self) -> &str;

    /// Handlers keyed by category name
    fn handlers(&self) -> Vec<(String, Handler)>;

    /// Static options passed to every handler of this plug-in
    fn options(&self) -> Options {
        Options::new()
    }
}

/// A plug-in assembled at runtime
#[derive(Clone, Default)]
pub struct SimplePlugin {
    name: String,
    grammar: String,
    handlers: Vec<(String, Handler)>,
    options: Options,
}

impl SimplePlugin {
    /// Create an empty plug-in
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append grammar text
    pub fn grammar(mut self, text: &str) -> Self {
        if !self.grammar.is_empty() {
            self.grammar.push('\n');
        }
        self.grammar.push_str(text);
        self
    }

    /// Register a handler
    pub fn handler<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Node, &Params<'_>, &mut Accumulator) -> Result<(), HandlerError>
            + Send
            + Sync
            + 'static,
    {
        self.handlers.push((key.into(), handler(f)));
        self
    }

    /// Set a static option
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}

impl fmt::Debug for SimplePlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplePlugin")
            .field("name", &self.name)
            .field(
                "handlers",
                &self.handlers.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .field("options", &self.options)
            .finish()
    }
}

impl QueryPlugin for SimplePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn grammar(&self) -> &str {
        &self.grammar
    }

    fn handlers(&self) -> Vec<(String, Handler)> {
        self.handlers.clone()
    }

    fn options(&self) -> Options {
        self.options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_plugin() {
        let plugin = SimplePlugin::new("weather")
            .grammar("QWeather →\n    \"veðrið\"")
            .handler("QWeather", |_, _, acc| {
                acc.set_qtype("Weather");
                Ok(())
            })
            .option("unit", "celsius");

        assert_eq!(plugin.name(), "weather");
        assert!(QueryPlugin::grammar(&plugin).starts_with("QWeather"));
        assert_eq!(plugin.handlers().len(), 1);
        assert_eq!(plugin.options().get("unit"), Some(&json!("celsius")));
    }

    #[test]
    fn test_params_accessors() {
        let children = vec![Accumulator::new(), Accumulator::failed("x")];
        let options = Options::from([("limit".to_string(), json!(3))]);
        let params = Params::for_children(&children, &options);

        assert_eq!(params.children().len(), 2);
        assert_eq!(params.child(1).and_then(Accumulator::error), Some("x"));
        assert!(params.child(2).is_none());
        assert_eq!(params.option("limit"), Some(&json!(3)));
        assert!(params.token().is_none());
    }
}
