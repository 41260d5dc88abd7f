//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use trellis_api::{Config, Interpreter};

pub mod batch;
pub mod interpret;
pub mod list;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interpret one sentence with its flat annotation
    Interpret(interpret::InterpretArgs),

    /// Interpret JSON-lines query files
    Batch(batch::BatchArgs),

    /// Check an annotation and show its tree and alignment
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List registered handler keys
    Handlers,

    /// List installed query plug-ins
    Plugins,

    /// List available output formats
    Formats,
}

/// State shared by every command
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded configuration file, or defaults
    pub config: CliConfig,
    /// Suppress progress and summaries
    pub quiet: bool,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self, session: &Session) -> Result<()> {
        match self {
            Commands::Interpret(args) => args.execute(session),
            Commands::Batch(args) => args.execute(session),
            Commands::Validate(args) => args.execute(session),
            Commands::List { subcommand } => list::execute(*subcommand),
        }
    }
}

/// Options shared by the commands that interpret queries
#[derive(Debug, Default, Args)]
pub struct InterpretOptions {
    /// Alignment rule file (TOML)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Lexicon table (.json or .toml)
    #[arg(long, value_name = "FILE", env = "TRELLIS_LEXICON")]
    pub lexicon: Option<PathBuf>,

    /// Reject queries whose tokens cannot be aligned with the tree
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl InterpretOptions {
    /// Merge flags over the configuration file
    pub fn api_config(&self, config: &CliConfig, threads: Option<usize>) -> Result<Config> {
        let mut builder = Config::builder()
            .strict_alignment(self.strict || config.alignment.strict)
            .threads(threads);
        if let Some(path) = self.rules.as_ref().or(config.alignment.rules.as_ref()) {
            builder = builder.rules_path(path);
        }
        if let Some(path) = self.lexicon.as_ref().or(config.lexicon.path.as_ref()) {
            builder = builder.lexicon_path(path);
        }
        Ok(builder.build()?)
    }

    /// Build an interpreter from flags and configuration
    pub fn interpreter(&self, config: &CliConfig, threads: Option<usize>) -> Result<Interpreter> {
        let api_config = self.api_config(config, threads)?;
        log::debug!("interpreter configuration: {api_config:?}");
        Ok(Interpreter::with_config(api_config)?)
    }

    /// Output format from the flag, else the configuration file
    pub fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_name(&config.output.format).ok_or_else(|| {
            CliError::ConfigError(format!("unknown output format '{}'", config.output.format))
                .into()
        })
    }
}
