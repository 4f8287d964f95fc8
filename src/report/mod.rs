use crate::bio::rank::Rank;
use crate::cli::output::{create_standard_table, header_cell};
use crate::core::counter::TaxonomyCounter;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: Format,
    /// Ranks reported as distinct-group columns, in column order
    pub ranks: Vec<Rank>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: Format::Tsv,
            ranks: vec![Rank::Family, Rank::Genus, Rank::Species],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Tsv,
    Csv,
    Json,
    Table,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "text" => Ok(Format::Tsv),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "table" => Ok(Format::Table),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Per-group row of the JSON report
#[derive(Debug, Serialize)]
struct GroupSummary<'a> {
    group_id: &'a str,
    members: usize,
    invalid: usize,
    ranks: Vec<RankSummary>,
}

#[derive(Debug, Serialize)]
struct RankSummary {
    rank: Rank,
    distinct: usize,
}

/// Renders group profiles, one row per group in the order given
pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn generate(&self, profiles: &[&TaxonomyCounter]) -> Result<String> {
        match self.options.format {
            Format::Tsv => self.generate_delimited(profiles, '\t'),
            Format::Csv => self.generate_delimited(profiles, ','),
            Format::Json => self.generate_json(profiles),
            Format::Table => self.generate_table(profiles),
        }
    }

    fn column_names(&self) -> Vec<&'static str> {
        let mut names = vec!["group_id", "members"];
        names.extend(self.options.ranks.iter().map(|rank| rank.plural()));
        names.push("invalid");
        names
    }

    fn generate_delimited(&self, profiles: &[&TaxonomyCounter], delimiter: char) -> Result<String> {
        let mut output = String::new();
        let separator = delimiter.to_string();

        writeln!(&mut output, "{}", self.column_names().join(&separator))?;

        for counter in profiles {
            let group = if delimiter == ',' {
                format!("\"{}\"", escape_csv(counter.name()))
            } else {
                counter.name().to_string()
            };
            write!(&mut output, "{}{}{}", group, delimiter, counter.total())?;
            for rank in &self.options.ranks {
                write!(&mut output, "{}{}", delimiter, counter.types_of(*rank))?;
            }
            writeln!(&mut output, "{}{}", delimiter, counter.invalid())?;
        }

        Ok(output)
    }

    fn generate_json(&self, profiles: &[&TaxonomyCounter]) -> Result<String> {
        let summaries: Vec<GroupSummary> = profiles
            .iter()
            .map(|counter| GroupSummary {
                group_id: counter.name(),
                members: counter.total(),
                invalid: counter.invalid(),
                ranks: self
                    .options
                    .ranks
                    .iter()
                    .map(|&rank| RankSummary {
                        rank,
                        distinct: counter.types_of(rank),
                    })
                    .collect(),
            })
            .collect();

        let mut output = serde_json::to_string_pretty(&summaries)?;
        output.push('\n');
        Ok(output)
    }

    fn generate_table(&self, profiles: &[&TaxonomyCounter]) -> Result<String> {
        let mut table = create_standard_table();
        table.set_header(self.column_names().into_iter().map(header_cell));

        for counter in profiles {
            let mut row = vec![
                Cell::new(counter.name()),
                Cell::new(counter.total()).set_alignment(CellAlignment::Right),
            ];
            for rank in &self.options.ranks {
                row.push(Cell::new(counter.types_of(*rank)).set_alignment(CellAlignment::Right));
            }
            row.push(Cell::new(counter.invalid()).set_alignment(CellAlignment::Right));
            table.add_row(row);
        }

        Ok(format!("{}\n", table))
    }
}

fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
