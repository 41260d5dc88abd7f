//! Trellis command-line interface

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use trellis_cli::commands::{Commands, Session};
use trellis_cli::config::CliConfig;

/// Interpret parsed queries with grammar-driven handlers
#[derive(Debug, Parser)]
#[command(name = "trellis", version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true, env = "TRELLIS_CONFIG")]
    config: Option<PathBuf>,

    /// Suppress progress output and summaries
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    let session = Session {
        config: CliConfig::load_or_default(cli.config.as_deref())?,
        quiet: cli.quiet,
    };
    cli.command.execute(&session)
}
