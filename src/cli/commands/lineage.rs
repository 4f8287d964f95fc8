use crate::bio::taxonomy::TreeOfLife;
use crate::cli::output::{section_header_with_line, tree_item, warning};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct LineageArgs {
    /// Taxonomy load file (optionally gzipped)
    #[arg(value_name = "TAXONOMY_FILE")]
    pub taxonomy: PathBuf,

    /// Taxon IDs to trace
    #[arg(required = true, value_name = "TAXON_ID")]
    pub taxon_ids: Vec<u32>,

    /// Print only the taxonomy string (visible names, root first)
    #[arg(long)]
    pub names_only: bool,
}

pub fn run(args: LineageArgs) -> anyhow::Result<()> {
    let tree = super::load_tree(&args.taxonomy)?;

    for &taxon_id in &args.taxon_ids {
        if tree.find(taxon_id).is_none() {
            warning(&format!("Taxon {} is not in the taxonomy", taxon_id));
            continue;
        }

        if args.names_only {
            if let Some(names) = tree.taxonomy_string(taxon_id) {
                println!("{}\t{}", taxon_id, names);
            }
        } else {
            print_lineage(&tree, taxon_id);
        }
    }

    Ok(())
}

fn print_lineage(tree: &TreeOfLife, taxon_id: u32) {
    let chain: Vec<_> = tree.lineage(taxon_id).collect();
    let Some(leaf) = chain.first() else {
        return;
    };

    section_header_with_line(&leaf.to_string());
    for (i, taxon) in chain.iter().enumerate() {
        let rank = if taxon.rank().is_major() {
            taxon.rank().label()
        } else {
            "-"
        };
        tree_item(
            i == chain.len() - 1,
            &format!("{:>8}  {:<8}", taxon.id().value(), rank),
            Some(taxon.name()),
            taxon.is_hidden(),
        );
    }
}
