/// The tree of life: every taxonomic grouping keyed by ID, with upward traversal
use crate::bio::rank::Rank;
use crate::{Result, TaxprofError};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

/// Name given to a taxon that has been referenced but not yet loaded
pub const UNKNOWN_NAME: &str = "<unknown>";

/// Rough size of one load file record, used to pre-size storage
const AVERAGE_RECORD_SIZE: u64 = 40;
const MIN_CAPACITY: usize = 100;

/// Taxonomy ID type - newtype pattern for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct TaxonId(pub u32);

impl TaxonId {
    pub const ROOT: Self = Self(1);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaxonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<TaxonId> for u32 {
    fn from(taxon: TaxonId) -> Self {
        taxon.0
    }
}

/// A single taxonomic grouping.
///
/// The parent is held by ID and resolved through the owning [`TreeOfLife`],
/// so a placeholder created for a forward reference can be filled in later
/// without disturbing the children that already point at it.
/// Equality, hashing and ordering use the ID only.
#[derive(Debug, Clone, Serialize)]
pub struct Taxon {
    id: TaxonId,
    rank: Rank,
    name: String,
    hidden: bool,
    parent: Option<TaxonId>,
    #[serde(skip)]
    resolved: bool,
}

impl Taxon {
    fn placeholder(id: TaxonId) -> Self {
        Self {
            id,
            rank: Rank::Other,
            name: UNKNOWN_NAME.to_string(),
            hidden: true,
            parent: None,
            resolved: false,
        }
    }

    pub fn id(&self) -> TaxonId {
        self.id
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// TRUE if this grouping should be left out of taxonomy listings
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn parent_id(&self) -> Option<TaxonId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// TRUE if this taxon was only ever referenced as a parent
    pub fn is_placeholder(&self) -> bool {
        !self.resolved
    }
}

impl PartialEq for Taxon {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Taxon {}

impl Hash for Taxon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Taxon {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Taxon {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Taxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

/// The full taxonomy tree, indexed by taxon ID.
#[derive(Debug, Default)]
pub struct TreeOfLife {
    taxa: HashMap<TaxonId, Taxon>,
}

impl TreeOfLife {
    /// Create an empty tree with room for `capacity` groupings
    pub fn new(capacity: usize) -> Self {
        Self {
            taxa: HashMap::with_capacity(capacity),
        }
    }

    pub fn find(&self, taxon_id: impl Into<TaxonId>) -> Option<&Taxon> {
        self.taxa.get(&taxon_id.into())
    }

    /// Insert a taxonomic grouping, overwriting it if it already exists.
    ///
    /// A parent ID equal to the taxon's own ID marks a root. Any other parent
    /// that is not in the tree yet is created as a placeholder, to be filled
    /// in when its own record arrives.
    pub fn find_or_insert(
        &mut self,
        taxon_id: impl Into<TaxonId>,
        parent_id: impl Into<TaxonId>,
        rank_label: &str,
        name: impl Into<String>,
        hidden: bool,
    ) -> &Taxon {
        let id = taxon_id.into();
        let parent_id = parent_id.into();

        let parent = if parent_id == id {
            None
        } else {
            self.taxa
                .entry(parent_id)
                .or_insert_with(|| Taxon::placeholder(parent_id));
            Some(parent_id)
        };

        let taxon = self.taxa.entry(id).or_insert_with(|| Taxon::placeholder(id));
        taxon.rank = Rank::classify(rank_label);
        taxon.name = name.into();
        taxon.hidden = hidden;
        taxon.parent = parent;
        taxon.resolved = true;
        taxon
    }

    pub fn parent(&self, taxon: &Taxon) -> Option<&Taxon> {
        taxon.parent.and_then(|id| self.taxa.get(&id))
    }

    /// Walk from a taxon up to its root, starting with the taxon itself.
    ///
    /// The walk is empty for an unknown ID. It never takes more steps than
    /// there are taxa in the tree, so a malformed file containing a parent
    /// cycle cannot hang it.
    pub fn lineage(&self, taxon_id: impl Into<TaxonId>) -> Lineage<'_> {
        Lineage {
            tree: self,
            next: self.find(taxon_id),
            remaining: self.taxa.len(),
        }
    }

    /// Find the nearest ancestor (or the taxon itself) at a given rank
    pub fn ancestor_at_rank(&self, taxon_id: impl Into<TaxonId>, rank: Rank) -> Option<&Taxon> {
        self.lineage(taxon_id).find(|taxon| taxon.rank == rank)
    }

    /// Build the user-facing taxonomy string for a taxon: the names of all
    /// non-hidden groupings from the root down, separated by "; ".
    pub fn taxonomy_string(&self, taxon_id: impl Into<TaxonId>) -> Option<String> {
        let taxon_id = taxon_id.into();
        self.find(taxon_id)?;

        let mut names: Vec<&str> = self
            .lineage(taxon_id)
            .filter(|taxon| !taxon.hidden)
            .map(|taxon| taxon.name.as_str())
            .collect();
        names.reverse();
        Some(names.join("; "))
    }

    /// IDs that were referenced as parents but never loaded, in ascending order
    pub fn unresolved(&self) -> Vec<TaxonId> {
        let mut ids: Vec<TaxonId> = self
            .taxa
            .values()
            .filter(|taxon| taxon.is_placeholder())
            .map(|taxon| taxon.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Taxon> {
        self.taxa.values()
    }

    /// Load the tree of life from a taxonomy load file (supports .gz compression).
    ///
    /// Each line holds six tab-delimited fields: ID, parent ID, domain flag
    /// (ignored), hidden flag, rank and name.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let start = Instant::now();

        let file = File::open(path)?;
        let capacity = estimate_capacity(file.metadata()?.len());

        let tree = if path.extension().and_then(|s| s.to_str()) == Some("gz") {
            Self::from_reader(BufReader::new(GzDecoder::new(file)), capacity)?
        } else {
            Self::from_reader(BufReader::new(file), capacity)?
        };

        tracing::info!(
            "Loaded {} taxa from {} in {:.2}s",
            tree.len(),
            path.display(),
            start.elapsed().as_secs_f64()
        );

        let unresolved = tree.unresolved();
        if !unresolved.is_empty() {
            tracing::warn!(
                "{} parent taxa in {} have no record of their own (first: {})",
                unresolved.len(),
                path.display(),
                unresolved[0]
            );
        }

        Ok(tree)
    }

    /// Build a tree from load records read from any buffered source.
    ///
    /// The whole input must parse; the first malformed record aborts the load.
    pub fn from_reader<R: BufRead>(reader: R, capacity: usize) -> Result<Self> {
        let mut tree = Self::new(capacity);

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let record = parse_record(line, index + 1)?;
            tree.find_or_insert(
                record.taxon_id,
                record.parent_id,
                record.rank,
                record.name,
                record.hidden,
            );
        }

        Ok(tree)
    }
}

/// Upward walk through the tree, see [`TreeOfLife::lineage`]
pub struct Lineage<'a> {
    tree: &'a TreeOfLife,
    next: Option<&'a Taxon>,
    remaining: usize,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Taxon;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Storage size to allocate for a load file of the given length
pub fn estimate_capacity(byte_len: u64) -> usize {
    usize::try_from(byte_len / AVERAGE_RECORD_SIZE)
        .unwrap_or(usize::MAX)
        .max(MIN_CAPACITY)
}

struct LoadRecord<'a> {
    taxon_id: u32,
    parent_id: u32,
    hidden: bool,
    rank: &'a str,
    name: &'a str,
}

fn parse_record(line: &str, line_no: usize) -> Result<LoadRecord<'_>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 6 {
        return Err(TaxprofError::Parse(format!(
            "line {}: expected 6 tab-delimited fields, found {}",
            line_no,
            fields.len()
        )));
    }

    let taxon_id = parse_number::<u32>(fields[0], "taxon ID", line_no)?;
    let parent_id = parse_number::<u32>(fields[1], "parent ID", line_no)?;
    parse_number::<i64>(fields[2], "domain flag", line_no)?;
    let hidden = parse_number::<i64>(fields[3], "hidden flag", line_no)? != 0;

    Ok(LoadRecord {
        taxon_id,
        parent_id,
        hidden,
        rank: fields[4],
        name: fields[5],
    })
}

fn parse_number<T: std::str::FromStr>(field: &str, what: &str, line_no: usize) -> Result<T> {
    field.trim().parse::<T>().map_err(|_| {
        TaxprofError::Parse(format!("line {}: invalid {} '{}'", line_no, what, field))
    })
}
