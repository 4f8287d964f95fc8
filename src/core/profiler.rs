use crate::bio::taxonomy::{TaxonId, TreeOfLife};
use crate::core::counter::TaxonomyCounter;
use std::collections::HashMap;
use std::sync::Arc;

/// Computes the taxonomic profile of one or more groups keyed by name.
///
/// Each group gets its own [`TaxonomyCounter`], created the first time the
/// group is seen. All counters share the same tree.
pub struct TaxonomyProfiler {
    tree: Arc<TreeOfLife>,
    groups: HashMap<String, TaxonomyCounter>,
}

impl TaxonomyProfiler {
    pub fn new(tree: Arc<TreeOfLife>) -> Self {
        Self {
            tree,
            groups: HashMap::new(),
        }
    }

    pub(crate) fn from_counters(
        tree: Arc<TreeOfLife>,
        groups: HashMap<String, TaxonomyCounter>,
    ) -> Self {
        Self { tree, groups }
    }

    /// Count a member of a taxonomic grouping for a group
    pub fn register(&mut self, group: &str, taxon_id: impl Into<TaxonId>) {
        let taxon_id = taxon_id.into();
        if let Some(counter) = self.groups.get_mut(group) {
            counter.register(taxon_id);
            return;
        }

        let mut counter = TaxonomyCounter::new(group, Arc::clone(&self.tree));
        counter.register(taxon_id);
        self.groups.insert(group.to_string(), counter);
    }

    pub fn profile_of(&self, group: &str) -> Option<&TaxonomyCounter> {
        self.groups.get(group)
    }

    /// All profiles, largest group first (see [`TaxonomyCounter`]'s ordering)
    pub fn sorted_profiles(&self) -> Vec<&TaxonomyCounter> {
        let mut profiles: Vec<&TaxonomyCounter> = self.groups.values().collect();
        profiles.sort();
        profiles
    }

    pub fn tree(&self) -> &Arc<TreeOfLife> {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
