pub mod bio;
pub mod cli;
pub mod core;
pub mod report;
pub mod utils;

pub use crate::bio::{rank::Rank, taxonomy::{Taxon, TaxonId, TreeOfLife}};
pub use crate::core::{counter::TaxonomyCounter, profiler::TaxonomyProfiler};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxprofError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TaxprofError>;
