pub mod observations;
pub mod rank;
pub mod taxonomy;

pub use observations::{Observation, TabbedReader};
pub use rank::Rank;
pub use taxonomy::{Taxon, TaxonId, TreeOfLife};
