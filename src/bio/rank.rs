/// Major taxonomic ranks used for profiling
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Number of major ranks (every rank except `Other`)
pub const N_GOOD: usize = 8;

/// The eight major taxonomic ranks from domain to species, plus a catch-all
/// for the minor ranks ("no rank", "subspecies", "strain", ...).
///
/// The discriminant of every major rank is its index into per-rank storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Domain = 0,
    Kingdom = 1,
    Phylum = 2,
    Class = 3,
    Order = 4,
    Family = 5,
    Genus = 6,
    Species = 7,
    Other = 8,
}

impl Rank {
    /// All major ranks in index order
    pub const GOOD: [Rank; N_GOOD] = [
        Rank::Domain,
        Rank::Kingdom,
        Rank::Phylum,
        Rank::Class,
        Rank::Order,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ];

    /// Classify a rank label from a load file.
    ///
    /// Matching is exact. NCBI calls the domain rank "superkingdom", so that
    /// label is accepted as well. Anything unrecognized is `Other`.
    pub fn classify(label: &str) -> Self {
        match label {
            "domain" | "superkingdom" => Self::Domain,
            "kingdom" => Self::Kingdom,
            "phylum" => Self::Phylum,
            "class" => Self::Class,
            "order" => Self::Order,
            "family" => Self::Family,
            "genus" => Self::Genus,
            "species" => Self::Species,
            _ => Self::Other,
        }
    }

    /// Index into per-rank storage, `None` for `Other`
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Other => None,
            rank => Some(rank as usize),
        }
    }

    pub fn is_major(self) -> bool {
        self != Self::Other
    }

    /// Canonical label; empty for `Other`
    pub fn label(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Kingdom => "kingdom",
            Self::Phylum => "phylum",
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
            Self::Genus => "genus",
            Self::Species => "species",
            Self::Other => "",
        }
    }

    /// Plural form used for report column headers
    pub fn plural(self) -> &'static str {
        match self {
            Self::Domain => "domains",
            Self::Kingdom => "kingdoms",
            Self::Phylum => "phyla",
            Self::Class => "classes",
            Self::Order => "orders",
            Self::Family => "families",
            Self::Genus => "genera",
            Self::Species => "species",
            Self::Other => "others",
        }
    }
}

impl FromStr for Rank {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
