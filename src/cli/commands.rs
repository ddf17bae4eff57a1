//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Simpli.fi reporting tap
#[derive(Parser, Debug)]
#[command(name = "simplifi-tap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (JSON); defaults to every discovered stream
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory of stream schema files
    #[arg(long, global = true, default_value = "schemas")]
    pub schemas: PathBuf,

    /// State file (JSON), updated after every stream
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the catalog built from the schema directory
    Discover,

    /// Sync selected streams to stdout
    Sync {
        /// Streams to sync (comma-separated, empty = all selected)
        #[arg(long)]
        streams: Option<String>,
    },

    /// Print warehouse table definitions for the report streams
    Ddl {
        /// Dataset the tables are created in
        #[arg(long, default_value = "simplifi")]
        dataset: String,
    },
}

impl Commands {
    /// Stream names from a `--streams a,b` list
    pub fn parse_stream_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }

    /// The stream filter for a sync; an absent or empty list selects
    /// every stream in the catalog
    pub fn stream_filter(list: Option<&str>) -> Option<Vec<String>> {
        let names = Self::parse_stream_list(list?);
        (!names.is_empty()).then_some(names)
    }
}
