pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taxprof",
    version,
    about = "Taxonomic profiling of grouped genomes",
    long_about = "taxprof loads a taxonomy tree from a tab-delimited load file and reports, for \
                  each group of genomes in a table, how many distinct families, genera and \
                  species the group spans. It can also trace the lineage of individual taxa."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use for ingestion (0 = all available, 1 = streaming)
    #[arg(short = 'j', long, default_value = "1", global = true)]
    pub threads: usize,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", env = "TAXPROF_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile groups of genomes read from a tab-delimited table
    Profile(commands::profile::ProfileArgs),

    /// Show the ancestor chain of one or more taxa
    Lineage(commands::lineage::LineageArgs),
}
