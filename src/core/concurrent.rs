/// Multi-threaded profile ingestion over a frozen tree
use crate::bio::observations::Observation;
use crate::bio::taxonomy::{TaxonId, TreeOfLife};
use crate::core::counter::TaxonomyCounter;
use crate::core::profiler::TaxonomyProfiler;
use dashmap::DashMap;
use rayon::prelude::*;
use std::sync::Arc;

/// A profiler that accepts registrations from many threads at once.
///
/// The tree is only read. Each group's counter lives in a `DashMap` shard
/// and the shard lock is held for the whole lineage sweep, so readers never
/// see half of a registration.
pub struct SharedProfiler {
    tree: Arc<TreeOfLife>,
    groups: DashMap<String, TaxonomyCounter>,
}

impl SharedProfiler {
    pub fn new(tree: Arc<TreeOfLife>) -> Self {
        Self {
            tree,
            groups: DashMap::new(),
        }
    }

    pub fn register(&self, group: &str, taxon_id: impl Into<TaxonId>) {
        let taxon_id = taxon_id.into();
        if let Some(mut counter) = self.groups.get_mut(group) {
            counter.register(taxon_id);
            return;
        }

        self.groups
            .entry(group.to_string())
            .or_insert_with(|| TaxonomyCounter::new(group, Arc::clone(&self.tree)))
            .register(taxon_id);
    }

    /// Register a batch of observations in parallel on the rayon pool
    pub fn register_all(&self, observations: &[Observation]) {
        observations
            .par_iter()
            .for_each(|obs| self.register(&obs.group, obs.taxon_id));
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finish ingestion and hand the counters to an ordinary profiler
    pub fn into_profiler(self) -> TaxonomyProfiler {
        let groups = self.groups.into_iter().collect();
        TaxonomyProfiler::from_counters(self.tree, groups)
    }
}
