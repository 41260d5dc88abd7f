//! Interpret command implementation

use super::{InterpretOptions, Session};
use anyhow::{Context, Result};
use clap::Args;
use std::io;
use trellis_api::Input;

/// Arguments for the interpret command
#[derive(Debug, Args)]
pub struct InterpretArgs {
    /// Sentence to interpret
    pub sentence: String,

    /// Flat annotation of the sentence
    #[arg(short, long, value_name = "ANNOTATION")]
    pub annotation: String,

    /// Identifier echoed in the output
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub options: InterpretOptions,
}

impl InterpretArgs {
    /// Execute the interpret command
    pub fn execute(&self, session: &Session) -> Result<()> {
        log::info!("Interpreting one query");
        log::debug!("Arguments: {:?}", self);

        let interpreter = self.options.interpreter(&session.config, None)?;
        let format = self.options.output_format(&session.config)?;

        let mut input = Input::new(&self.sentence, &self.annotation);
        input.id = self.id.clone();

        let interpretation = interpreter
            .process(&input)
            .context("Failed to interpret query")?;
        for warning in &interpretation.warnings {
            log::warn!("{warning}");
        }

        let mut formatter = format.formatter(io::stdout(), session.config.output.pretty_json);
        formatter.format_interpretation(&interpretation)?;
        formatter.finish()
    }
}
