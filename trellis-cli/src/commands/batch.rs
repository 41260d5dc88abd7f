//! Batch command implementation

use super::{InterpretOptions, Session};
use crate::input::{resolve_patterns, FileReader};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use trellis_api::BatchSummary;

/// Arguments for the batch command
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Input files or patterns (supports glob), one JSON object per line
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub options: InterpretOptions,
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self, session: &Session) -> Result<()> {
        log::info!("Starting batch interpretation");
        log::debug!("Arguments: {:?}", self);

        let files = resolve_patterns(&self.input)?;
        let interpreter = self.options.interpreter(&session.config, self.threads)?;
        let format = self.options.output_format(&session.config)?;

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter = format.formatter(writer, session.config.output.pretty_json);

        let mut progress = ProgressReporter::new(session.quiet);
        progress.init_files(files.len() as u64);

        let mut results = Vec::new();
        for file in &files {
            let inputs = FileReader::read_inputs(file)?;
            let batch = interpreter.process_batch(&inputs)?;

            for (input, result) in inputs.iter().zip(&batch) {
                match result {
                    Ok(interpretation) => formatter.format_interpretation(interpretation)?,
                    Err(error) => {
                        log::warn!("{}: {error}", input.id.as_deref().unwrap_or("<unnamed>"));
                        formatter.format_rejected(input.id.as_deref(), error)?;
                    }
                }
            }
            progress.file_completed(&file.display().to_string(), inputs.len());
            results.extend(batch);
        }
        progress.finish();
        formatter.finish()?;

        let summary = BatchSummary::from_results(&results);
        log::info!("Batch summary: {summary:?}");
        if !session.quiet {
            eprintln!("{}", describe(&summary));
        }
        Ok(())
    }
}

fn describe(summary: &BatchSummary) -> String {
    format!(
        "Interpreted {} queries: {} answered, {} not understood, {} failed, {} rejected ({} with alignment warnings)",
        summary.total,
        summary.answered,
        summary.not_understood,
        summary.failed,
        summary.rejected,
        summary.warnings
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_summary() {
        let summary = BatchSummary {
            total: 4,
            answered: 2,
            not_understood: 1,
            failed: 0,
            rejected: 1,
            warnings: 1,
        };
        assert_eq!(
            describe(&summary),
            "Interpreted 4 queries: 2 answered, 1 not understood, 0 failed, 1 rejected (1 with alignment warnings)"
        );
    }
}
