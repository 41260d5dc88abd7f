//! Validate command implementation

use super::Session;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use trellis_api::{Tokenizer, WhitespaceTokenizer};
use trellis_core::{parse_annotation, AlignRules, Aligner, MergeReason};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Flat annotation to check
    pub annotation: String,

    /// Sentence to align the tree with
    #[arg(short, long)]
    pub sentence: Option<String>,

    /// Alignment rule file (TOML)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, session: &Session) -> Result<()> {
        let tree = parse_annotation(&self.annotation).context("Annotation is not well formed")?;

        print!("{}", tree.render_tree());
        println!(
            "{} terminal(s), depth {}",
            tree.terminal_count(),
            tree.depth()
        );

        let Some(sentence) = &self.sentence else {
            return Ok(());
        };

        let custom;
        let rules = match self.rules.as_ref().or(session.config.alignment.rules.as_ref()) {
            Some(path) => {
                custom = AlignRules::from_file(path)?;
                &custom
            }
            None => AlignRules::embedded(),
        };
        let tokens = WhitespaceTokenizer.tokenize(sentence);
        let alignment = Aligner::new(rules).with_sentence(sentence).align(tree, &tokens);

        println!();
        for group in &alignment.groups {
            let reason = match &group.reason {
                MergeReason::NameRun { root } => format!("name run ({root})"),
                MergeReason::Phrase { category } => format!("phrase {category}"),
            };
            println!(
                "merged leaves {}..{}: {reason}",
                group.leaves().start,
                group.leaves().end
            );
        }
        for terminal in alignment.tree.terminals() {
            let text = alignment
                .token_for(terminal)
                .map_or("", |token| token.text.as_str());
            println!("{}\t{text}", terminal.category());
        }
        if let Some(warning) = &alignment.warning {
            println!("warning: {warning}");
        }
        Ok(())
    }
}
