//! keysmith-cli - chord parsing, key suggestions and diatonic tables
//!
//! Subcommands:
//! - `keysmith-cli parse <chord>` - Show how a chord name is read
//! - `keysmith-cli suggest <chord>` - Rank keys that contain a chord
//! - `keysmith-cli diatonic <key>` - Scale and diatonic chords of a key
//! - `keysmith-cli explain <chord>` - Best key for a chord, chords by function
//! - `keysmith-cli config` - Print the effective configuration

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keysmith::{BrowseOptions, SortOrder, TheoryCache, TheoryEngine};
use keysmithconf::KeysmithConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "keysmith-cli")]
#[command(about = "Chord parsing, key suggestions and diatonic chords")]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file to load instead of ./keysmith.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a chord name and show its notes
    Parse {
        /// Chord name (e.g., Am7, F#m7b5, G7/B)
        chord: String,
    },

    /// Suggest keys that contain a chord
    Suggest {
        /// Chord name
        chord: String,

        /// Sort order: score, name or mode
        #[arg(short, long)]
        sort: Option<SortOrder>,

        /// Maximum number of keys to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only keys on C, G, D, A, E, B or F
        #[arg(long)]
        standard_only: bool,

        /// Show confidence and score under each reason
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the scale and diatonic chords of a key
    Diatonic {
        /// Key (e.g., C, Am, "F# minor", "Bb major")
        key: String,
    },

    /// Pick the best key for a chord and group its chords by function
    Explain {
        /// Chord name
        chord: String,
    },

    /// Print the effective configuration and its sources
    Config,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = KeysmithConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&config.logging.log_level);
    debug!(files = ?sources.files, env = ?sources.env_overrides, "configuration loaded");

    let engine = TheoryEngine::new(Arc::new(TheoryCache::new(config.cache.capacity)));

    let output = match cli.command {
        Commands::Parse { chord } => commands::parse(&engine, &chord, cli.json)?,
        Commands::Suggest {
            chord,
            sort,
            limit,
            standard_only,
            detailed,
        } => {
            let sort_order = match sort {
                Some(order) => order,
                None => config
                    .suggestions
                    .sort_order
                    .parse()
                    .context("Invalid suggestions.sort_order in configuration")?,
            };
            let options = BrowseOptions {
                sort_order,
                max_results: limit.unwrap_or(config.suggestions.max_results),
                standard_keys_only: standard_only || config.suggestions.standard_keys_only,
            };
            commands::suggest(
                &engine,
                &chord,
                &options,
                detailed || config.suggestions.detailed,
                cli.json,
            )?
        }
        Commands::Diatonic { key } => commands::diatonic(&engine, &key, cli.json)?,
        Commands::Explain { chord } => commands::explain(&engine, &chord, cli.json)?,
        Commands::Config => commands::config(&config, &sources, cli.json)?,
    };

    print!("{}", output);
    if cli.json {
        println!();
    }

    debug!(cache = ?engine.cache().stats(), "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_suggest_flags() {
        let cli = Cli::try_parse_from([
            "keysmith-cli",
            "suggest",
            "G7",
            "--sort",
            "mode",
            "--limit",
            "3",
            "--standard-only",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Suggest {
                chord,
                sort,
                limit,
                standard_only,
                detailed,
            } => {
                assert_eq!(chord, "G7");
                assert_eq!(sort, Some(SortOrder::Mode));
                assert_eq!(limit, Some(3));
                assert!(standard_only);
                assert!(!detailed);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_sort_order() {
        assert!(Cli::try_parse_from(["keysmith-cli", "suggest", "C", "--sort", "random"]).is_err());
    }

    #[test]
    fn global_config_flag() {
        let cli =
            Cli::try_parse_from(["keysmith-cli", "--config", "/tmp/k.toml", "diatonic", "Am"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/k.toml")));
        assert!(matches!(cli.command, Commands::Diatonic { ref key } if key == "Am"));
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Cli::try_parse_from(["keysmith-cli"]).is_err());
    }
}
