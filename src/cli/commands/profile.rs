use crate::bio::observations::{Observation, TabbedReader};
use crate::bio::rank::Rank;
use crate::bio::taxonomy::TreeOfLife;
use crate::cli::output::format_number;
use crate::core::concurrent::SharedProfiler;
use crate::core::config::Config;
use crate::core::profiler::TaxonomyProfiler;
use crate::report::{Format, ReportGenerator, ReportOptions};
use crate::TaxprofError;
use clap::Args;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ProfileArgs {
    /// Taxonomy load file (optionally gzipped)
    #[arg(value_name = "TAXONOMY_FILE")]
    pub taxonomy: PathBuf,

    /// Tab-delimited genome table with a header line (default: standard input)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Column containing the group ID (name or 1-based index) [default: group_id]
    #[arg(short = 'c', long = "group-col", visible_alias = "col")]
    pub group_col: Option<String>,

    /// Column containing the taxonomy ID (name or 1-based index) [default: taxon_id]
    #[arg(short = 't', long = "tax-col")]
    pub tax_col: Option<String>,

    /// Write the report here instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (tsv, csv, json, table) [default: tsv]
    #[arg(long)]
    pub format: Option<String>,

    /// Comma-separated ranks to report [default: family,genus,species]
    #[arg(long, value_delimiter = ',')]
    pub ranks: Option<Vec<String>>,
}

pub fn run(args: ProfileArgs, config: &Config, threads: usize) -> anyhow::Result<()> {
    let options = report_options(&args, config)?;
    let group_col = args.group_col.as_deref().unwrap_or(&config.profile.group_column);
    let tax_col = args.tax_col.as_deref().unwrap_or(&config.profile.taxon_column);

    let tree = Arc::new(super::load_tree(&args.taxonomy)?);

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let reader = TabbedReader::new(input)?;
    let group_idx = reader.find_column(group_col)?;
    let tax_idx = reader.find_column(tax_col)?;

    let profiler = if threads == 1 {
        ingest_streaming(reader, group_idx, tax_idx, tree, config.profile.progress_interval)?
    } else {
        ingest_parallel(reader, group_idx, tax_idx, tree)?
    };
    tracing::info!("Profiled {} groups", format_number(profiler.len()));

    let report = ReportGenerator::new(options).generate(&profiler.sorted_profiles())?;
    match &args.output {
        Some(path) => std::fs::write(path, report)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn report_options(args: &ProfileArgs, config: &Config) -> Result<ReportOptions, TaxprofError> {
    let format_name = args.format.as_deref().unwrap_or(&config.report.format);
    let format = format_name
        .parse::<Format>()
        .map_err(TaxprofError::InvalidInput)?;

    let ranks = match &args.ranks {
        Some(labels) => labels
            .iter()
            .map(|label| match Rank::classify(label.trim()) {
                Rank::Other => Err(TaxprofError::InvalidInput(format!(
                    "'{}' is not a major rank",
                    label
                ))),
                rank => Ok(rank),
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => config.report.ranks.clone(),
    };

    Ok(ReportOptions { format, ranks })
}

fn ingest_streaming<R: BufRead>(
    reader: TabbedReader<R>,
    group_idx: usize,
    tax_idx: usize,
    tree: Arc<TreeOfLife>,
    progress_interval: usize,
) -> anyhow::Result<TaxonomyProfiler> {
    let mut profiler = TaxonomyProfiler::new(tree);
    let mut observations = reader.observations(group_idx, tax_idx);

    while let Some(observation) = observations.next() {
        let Observation { group, taxon_id } = observation?;
        profiler.register(&group, taxon_id);

        let lines = observations.lines_read();
        if progress_interval > 0 && lines % progress_interval == 0 {
            tracing::debug!("{} records processed.", format_number(lines));
        }
    }

    tracing::info!("{} total lines processed.", format_number(observations.lines_read()));
    Ok(profiler)
}

fn ingest_parallel<R: BufRead>(
    reader: TabbedReader<R>,
    group_idx: usize,
    tax_idx: usize,
    tree: Arc<TreeOfLife>,
) -> anyhow::Result<TaxonomyProfiler> {
    let observations = reader
        .observations(group_idx, tax_idx)
        .collect::<crate::Result<Vec<_>>>()?;
    tracing::info!(
        "Registering {} observations on {} threads",
        format_number(observations.len()),
        rayon::current_num_threads()
    );

    let shared = SharedProfiler::new(tree);
    shared.register_all(&observations);
    Ok(shared.into_profiler())
}
