pub mod lineage;
pub mod profile;

use crate::bio::taxonomy::TreeOfLife;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Load the taxonomy tree behind a spinner
pub fn load_tree(path: &Path) -> anyhow::Result<TreeOfLife> {
    let loading_pb = ProgressBar::new_spinner();
    loading_pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    loading_pb.set_message(format!("Loading taxonomy from {}...", path.display()));
    loading_pb.enable_steady_tick(Duration::from_millis(100));

    let tree = TreeOfLife::load(path);
    loading_pb.finish_and_clear();

    Ok(tree?)
}
