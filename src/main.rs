use clap::Parser;
use colored::*;
use std::process;
use taxprof::cli::{Cli, Commands};
use taxprof::core::config::{load_config, Config};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with TAXPROF_LOG environment variable support
    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    let log_level = std::env::var("TAXPROF_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<taxprof::TaxprofError>() {
            Some(taxprof::TaxprofError::Config(_)) => 2,
            Some(taxprof::TaxprofError::Io(_)) => 3,
            Some(taxprof::TaxprofError::Parse(_)) | Some(taxprof::TaxprofError::InvalidInput(_)) => 4,
            Some(taxprof::TaxprofError::NotFound(_)) => 5,
            None if e.downcast_ref::<std::io::Error>().is_some() => 3,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if cli.threads != 1 {
        taxprof::utils::parallel::configure_thread_pool(cli.threads)?;
        tracing::debug!("Using {} threads", rayon::current_num_threads());
    }

    match cli.command {
        Commands::Profile(args) => taxprof::cli::commands::profile::run(args, &config, cli.threads),
        Commands::Lineage(args) => taxprof::cli::commands::lineage::run(args),
    }
}
