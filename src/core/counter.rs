use crate::bio::rank::{Rank, N_GOOD};
use crate::bio::taxonomy::{Taxon, TaxonId, TreeOfLife};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Counts the distinct taxonomic groupings found at each major rank for one
/// named group.
///
/// Every registered taxon ID is swept up its full lineage: the leaf and each
/// of its ancestors with a major rank gets one more hit in the bag for its
/// own rank. A group that contains one E. coli genome therefore has one
/// species, one genus, one family and so on up to one domain.
pub struct TaxonomyCounter {
    name: String,
    tree: Arc<TreeOfLife>,
    /// one bag per major rank, indexed by [`Rank::index`]
    counts: [HashMap<TaxonId, usize>; N_GOOD],
    invalid_count: usize,
    total_count: usize,
}

impl TaxonomyCounter {
    pub fn new(name: impl Into<String>, tree: Arc<TreeOfLife>) -> Self {
        Self {
            name: name.into(),
            tree,
            counts: std::array::from_fn(|_| HashMap::new()),
            invalid_count: 0,
            total_count: 0,
        }
    }

    /// Register one member of the grouping with the given taxon ID.
    ///
    /// An ID that is not in the tree only bumps the invalid count.
    pub fn register(&mut self, taxon_id: impl Into<TaxonId>) {
        let taxon_id = taxon_id.into();
        if self.tree.find(taxon_id).is_none() {
            self.invalid_count += 1;
            return;
        }

        for taxon in self.tree.lineage(taxon_id) {
            if let Some(idx) = taxon.rank().index() {
                *self.counts[idx].entry(taxon.id()).or_insert(0) += 1;
            }
        }
        self.total_count += 1;
    }

    /// Number of distinct groupings seen at a rank
    pub fn types_of(&self, rank: Rank) -> usize {
        rank.index().map_or(0, |idx| self.counts[idx].len())
    }

    /// Number of registrations that fell in the given grouping or below it.
    ///
    /// The bag is chosen by the taxon's own rank. Ancestors are written into
    /// the bag for their own rank during the sweep, so a genus reached only
    /// through its species is still counted here. Taxa without a major rank
    /// are never counted.
    pub fn count_of(&self, taxon: &Taxon) -> usize {
        taxon
            .rank()
            .index()
            .and_then(|idx| self.counts[idx].get(&taxon.id()).copied())
            .unwrap_or(0)
    }

    /// All groupings at a rank with their counts, most frequent first.
    /// Equal counts are ordered by ascending taxon ID.
    pub fn sorted_counts(&self, rank: Rank) -> Vec<(&Taxon, usize)> {
        let Some(idx) = rank.index() else {
            return Vec::new();
        };

        let mut counts: Vec<(&Taxon, usize)> = self.counts[idx]
            .iter()
            .filter_map(|(id, &count)| self.tree.find(*id).map(|taxon| (taxon, count)))
            .collect();
        counts.sort_by(|(a, a_count), (b, b_count)| {
            b_count.cmp(a_count).then_with(|| a.id().cmp(&b.id()))
        });
        counts
    }

    pub fn invalid(&self) -> usize {
        self.invalid_count
    }

    pub fn total(&self) -> usize {
        self.total_count
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for TaxonomyCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxonomyCounter")
            .field("name", &self.name)
            .field("total", &self.total_count)
            .field("invalid", &self.invalid_count)
            .finish()
    }
}

// Counters sort by highest total, then lowest invalid count, then name.
impl Ord for TaxonomyCounter {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total_count
            .cmp(&self.total_count)
            .then_with(|| self.invalid_count.cmp(&other.invalid_count))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for TaxonomyCounter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TaxonomyCounter {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TaxonomyCounter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn bacteria_tree() -> Arc<TreeOfLife> {
        let mut tree = TreeOfLife::new(100);
        tree.find_or_insert(1, 1, "no rank", "root", true);
        tree.find_or_insert(2, 1, "superkingdom", "Bacteria", false);
        tree.find_or_insert(1224, 2, "phylum", "Proteobacteria", false);
        Arc::new(tree)
    }

    fn enterobacteria_tree() -> Arc<TreeOfLife> {
        let mut tree = TreeOfLife::new(100);
        tree.find_or_insert(1, 1, "no rank", "root", true);
        tree.find_or_insert(2, 1, "superkingdom", "Bacteria", false);
        tree.find_or_insert(1224, 2, "phylum", "Proteobacteria", false);
        tree.find_or_insert(543, 1224, "family", "Enterobacteriaceae", false);
        tree.find_or_insert(561, 543, "genus", "Escherichia", false);
        tree.find_or_insert(562, 561, "species", "Escherichia coli", false);
        tree.find_or_insert(83333, 562, "strain", "Escherichia coli K-12", false);
        tree.find_or_insert(620, 543, "genus", "Shigella", false);
        tree.find_or_insert(623, 620, "species", "Shigella flexneri", false);
        tree.find_or_insert(624, 620, "species", "Shigella sonnei", false);
        Arc::new(tree)
    }

    #[test]
    fn test_register_sweeps_lineage() {
        let tree = bacteria_tree();
        let mut counter = TaxonomyCounter::new("test", Arc::clone(&tree));
        counter.register(1224);

        assert_eq!(counter.types_of(Rank::Phylum), 1);
        assert_eq!(counter.types_of(Rank::Domain), 1);
        assert_eq!(counter.types_of(Rank::Species), 0);
        assert_eq!(counter.count_of(tree.find(1224).unwrap()), 1);
        assert_eq!(counter.count_of(tree.find(2).unwrap()), 1);
        assert_eq!(counter.total(), 1);
        assert_eq!(counter.invalid(), 0);
    }

    #[test]
    fn test_register_unknown_id() {
        let tree = bacteria_tree();
        let mut counter = TaxonomyCounter::new("test", tree);
        counter.register(666666);

        assert_eq!(counter.invalid(), 1);
        assert_eq!(counter.total(), 0);
        for rank in Rank::GOOD {
            assert_eq!(counter.types_of(rank), 0);
        }
    }

    #[test]
    fn test_unranked_leaf_counts_ranked_ancestors() {
        let tree = enterobacteria_tree();
        let mut counter = TaxonomyCounter::new("test", Arc::clone(&tree));
        counter.register(83333);

        assert_eq!(counter.total(), 1);
        assert_eq!(counter.count_of(tree.find(562).unwrap()), 1);
        assert_eq!(counter.count_of(tree.find(561).unwrap()), 1);
        assert_eq!(counter.count_of(tree.find(543).unwrap()), 1);
        // Strain and root have no major rank
        assert_eq!(counter.count_of(tree.find(83333).unwrap()), 0);
        assert_eq!(counter.count_of(tree.find(1).unwrap()), 0);
        assert_eq!(counter.types_of(Rank::Other), 0);
    }

    #[test]
    fn test_distinct_types_per_rank() {
        let tree = enterobacteria_tree();
        let mut counter = TaxonomyCounter::new("test", Arc::clone(&tree));
        for id in [562, 83333, 623, 624, 624] {
            counter.register(id);
        }

        assert_eq!(counter.total(), 5);
        assert_eq!(counter.types_of(Rank::Species), 3);
        assert_eq!(counter.types_of(Rank::Genus), 2);
        assert_eq!(counter.types_of(Rank::Family), 1);
        assert_eq!(counter.types_of(Rank::Order), 0);
        assert_eq!(counter.count_of(tree.find(543).unwrap()), 5);
        assert_eq!(counter.count_of(tree.find(562).unwrap()), 2);
        // Shigella was never registered directly but is counted via its species
        assert_eq!(counter.count_of(tree.find(620).unwrap()), 3);
    }

    #[test]
    fn test_sorted_counts_most_frequent_first() {
        let tree = enterobacteria_tree();
        let mut counter = TaxonomyCounter::new("test", tree);
        for id in [624, 562, 623, 624, 623, 624] {
            counter.register(id);
        }

        let species: Vec<(u32, usize)> = counter
            .sorted_counts(Rank::Species)
            .into_iter()
            .map(|(taxon, count)| (taxon.id().value(), count))
            .collect();
        assert_eq!(species, vec![(624, 3), (623, 2), (562, 1)]);

        assert!(counter.sorted_counts(Rank::Order).is_empty());
        assert!(counter.sorted_counts(Rank::Other).is_empty());
    }

    #[test]
    fn test_sorted_counts_ties_by_id() {
        let tree = enterobacteria_tree();
        let mut counter = TaxonomyCounter::new("test", tree);
        for id in [624, 562, 623] {
            counter.register(id);
        }

        let ids: Vec<u32> = counter
            .sorted_counts(Rank::Species)
            .iter()
            .map(|(taxon, _)| taxon.id().value())
            .collect();
        assert_eq!(ids, vec![562, 623, 624]);
    }

    #[test]
    fn test_counter_ordering() {
        let tree = bacteria_tree();
        let mut big = TaxonomyCounter::new("zeta", Arc::clone(&tree));
        big.register(1224);
        big.register(1224);

        let mut clean = TaxonomyCounter::new("beta", Arc::clone(&tree));
        clean.register(1224);

        let mut dirty = TaxonomyCounter::new("alpha", Arc::clone(&tree));
        dirty.register(1224);
        dirty.register(999);

        let mut twin = TaxonomyCounter::new("gamma", Arc::clone(&tree));
        twin.register(2);

        let mut counters = vec![&dirty, &twin, &clean, &big];
        counters.sort();
        let names: Vec<&str> = counters.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["zeta", "beta", "gamma", "alpha"]);
        assert_ne!(clean, twin);
    }
}
