use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filterbrr")]
#[command(author, version, about = "Release classification and filter matching for torrent announces")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a release name and display the detected fields
    Parse {
        /// Release name to parse
        #[arg(required = true)]
        title: String,

        /// Tracker tag string, e.g. "FLAC / Lossless / Log / 100% / Cue"
        #[arg(long)]
        tags: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an announce through every enabled filter
    Check {
        /// Announced torrent name
        #[arg(required = true)]
        title: String,

        /// Indexer the announce came from
        #[arg(short, long, default_value = "cli")]
        indexer: String,

        /// Announced category
        #[arg(long)]
        category: Option<String>,

        /// Announced size, e.g. "4.5 GB"
        #[arg(short, long)]
        size: Option<String>,

        /// Tracker tag string
        #[arg(long)]
        tags: Option<String>,

        /// Mark the announce as freeleech
        #[arg(long)]
        freeleech: bool,

        /// Uploader name
        #[arg(long)]
        uploader: Option<String>,

        /// Extra announce variable as key=value (repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
