//! Public API for Trellis query interpretation
//!
//! An [`Interpreter`] takes a sentence with its flat parser annotation,
//! rebuilds the tree, aligns it with the sentence's tokens and dispatches
//! it through the query handlers, returning an [`Interpretation`].
//!
//! ```rust
//! use trellis_api::{Input, Interpreter};
//!
//! let interpreter = Interpreter::new().unwrap();
//! let output = interpreter
//!     .process(&Input::new(
//!         "Hvenær kemur strætó númer sjö?",
//!         "P QBusArrivalTime ao so_et_fh QBus QBusNumber no_et_kk_nf no_et_hk_nf \
//!          QBusNumberWord tö_ft_hk_nf /QBusNumberWord /QBusNumber /QBus p /QBusArrivalTime /P",
//!     ))
//!     .unwrap();
//!
//! assert!(output.is_answered());
//! assert_eq!(output.fields["qkey"], 7);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;
pub mod tokenizer;

use std::sync::Arc;
use trellis_core::{parse_annotation, AlignRules, Aligner};
use trellis_engine::{Dispatcher, EmptyLexicon, HandlerRegistry, Lexicon, TableLexicon};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{BatchSummary, Input, Interpretation, TokenDTO};
pub use error::{ApiError, Result};
pub use tokenizer::{Tokenizer, WhitespaceTokenizer};
pub use trellis_engine::Outcome;

enum Registry {
    Global,
    Owned(Arc<HandlerRegistry>),
}

impl Registry {
    fn get(&self) -> &HandlerRegistry {
        match self {
            Registry::Global => HandlerRegistry::global(),
            Registry::Owned(registry) => registry,
        }
    }
}

/// Main entry point for query interpretation
pub struct Interpreter {
    rules: AlignRules,
    lexicon: Arc<dyn Lexicon>,
    tokenizer: Arc<dyn Tokenizer>,
    registry: Registry,
    config: Config,
}

impl Interpreter {
    /// Create an interpreter with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create an interpreter with a custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let rules = match &config.rules_path {
            Some(path) => AlignRules::from_file(path)?,
            None => AlignRules::embedded().clone(),
        };
        let lexicon: Arc<dyn Lexicon> = match &config.lexicon_path {
            Some(path) => Arc::new(TableLexicon::from_file(path)?),
            None => Arc::new(EmptyLexicon),
        };
        log::debug!(
            "interpreter ready: rules '{}', strict alignment {}",
            rules.metadata.name,
            config.strict_alignment
        );

        Ok(Self {
            rules,
            lexicon,
            tokenizer: Arc::new(WhitespaceTokenizer),
            registry: Registry::Global,
            config,
        })
    }

    /// Use a registry other than the process-wide one
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = Registry::Owned(Arc::new(registry));
        self
    }

    /// Use a different lexicon
    pub fn with_lexicon(mut self, lexicon: impl Lexicon + 'static) -> Self {
        self.lexicon = Arc::new(lexicon);
        self
    }

    /// Use a different tokenizer
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Arc::new(tokenizer);
        self
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the handler registry in use
    pub fn registry(&self) -> &HandlerRegistry {
        self.registry.get()
    }

    /// Interpret one input
    pub fn process(&self, input: &Input) -> Result<Interpretation> {
        let tokens = self.tokenizer.tokenize(&input.sentence);
        let tree = parse_annotation(&input.annotation)?;
        let alignment = Aligner::new(&self.rules)
            .with_sentence(&input.sentence)
            .align(tree, &tokens);

        if let Some(warning) = &alignment.warning {
            if self.config.strict_alignment {
                return Err(ApiError::Alignment(warning.clone()));
            }
        }

        let acc = Dispatcher::new(self.registry.get())
            .with_lexicon(self.lexicon.as_ref())
            .interpret(&alignment)?;

        Ok(Interpretation {
            id: input.id.clone(),
            sentence: input.sentence.clone(),
            outcome: Outcome::from_accumulator(&acc),
            fields: acc
                .fields()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            tokens: alignment.tokens.iter().map(Into::into).collect(),
            aligned: alignment.tree.to_string(),
            warnings: alignment
                .warning
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }

    /// Interpret many inputs, in parallel when the `parallel` feature is on
    ///
    /// Results are returned in input order; one failing input does not
    /// affect the others.
    pub fn process_batch(&self, inputs: &[Input]) -> Result<Vec<Result<Interpretation>>> {
        log::debug!("processing batch of {} input(s)", inputs.len());
        self.run_batch(inputs)
    }

    #[cfg(feature = "parallel")]
    fn run_batch(&self, inputs: &[Input]) -> Result<Vec<Result<Interpretation>>> {
        let run = || -> Vec<Result<Interpretation>> {
            inputs.par_iter().map(|input| self.process(input)).collect()
        };
        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ApiError::ThreadPool(e.to_string()))?;
                Ok(pool.install(run))
            }
            None => Ok(run()),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_batch(&self, inputs: &[Input]) -> Result<Vec<Result<Interpretation>>> {
        Ok(inputs.iter().map(|input| self.process(input)).collect())
    }
}

// Convenience functions

/// Interpret one sentence with the default configuration
pub fn interpret(sentence: &str, annotation: &str) -> Result<Interpretation> {
    Interpreter::new()?.process(&Input::new(sentence, annotation))
}
