//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::ValueEnum;
use trellis_engine::HandlerRegistry;

/// Execute a list subcommand
pub fn execute(subcommand: ListCommands) -> Result<()> {
    let registry = HandlerRegistry::global();
    match subcommand {
        ListCommands::Handlers => {
            for key in registry.keys() {
                let plugin = registry.get(key).map_or("", |r| r.plugin());
                println!("{key}\t{plugin}");
            }
        }
        ListCommands::Plugins => {
            for plugin in registry.plugins() {
                println!("{}", plugin.name);
                println!(
                    "  nonterminals: {}",
                    plugin
                        .nonterminals
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                println!("  handlers: {}", plugin.handlers.join(", "));
            }
        }
        ListCommands::Formats => {
            for format in OutputFormat::value_variants() {
                if let Some(value) = format.to_possible_value() {
                    let help = value.get_help().map(ToString::to_string);
                    println!("{:<6} {}", value.get_name(), help.unwrap_or_default());
                }
            }
        }
    }
    Ok(())
}
