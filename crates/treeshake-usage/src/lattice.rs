//! Export usage lattice
//!
//! `Unused ⊑ Named(S) ⊑ All`, with `Named(A) ⊑ Named(B)` iff `A ⊆ B`.
//! Joining two values never moves down the order, which is what lets the
//! propagation engine stop as soon as a merge stops changing anything.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a value a module makes available to importers
pub type ExportName = String;

/// How much of a module's exports are consumed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "names", rename_all = "snake_case")]
pub enum UsedExports {
    /// Nothing is used (bottom)
    #[default]
    Unused,
    /// Exactly this subset of exports is used
    Named(BTreeSet<ExportName>),
    /// Every export is used, or usage cannot be narrowed (top)
    All,
}

impl UsedExports {
    /// Build a `Named` value from any list of names
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ExportName>,
    {
        UsedExports::Named(names.into_iter().map(Into::into).collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, UsedExports::All)
    }

    /// True for `Unused` and for an empty `Named` set
    pub fn is_nothing(&self) -> bool {
        match self {
            UsedExports::Unused => true,
            UsedExports::Named(names) => names.is_empty(),
            UsedExports::All => false,
        }
    }

    /// Whether the given export is covered by this usage
    pub fn uses(&self, name: &str) -> bool {
        match self {
            UsedExports::Unused => false,
            UsedExports::Named(names) => names.contains(name),
            UsedExports::All => true,
        }
    }

    /// Names carried by a `Named` value
    pub fn names(&self) -> Option<&BTreeSet<ExportName>> {
        match self {
            UsedExports::Named(names) => Some(names),
            _ => None,
        }
    }

    /// Join `incoming` into `self` without touching `self`.
    ///
    /// Returns the joined value and whether it differs from `self`.
    pub fn merge(&self, incoming: &UsedExports) -> (UsedExports, bool) {
        match (self, incoming) {
            (UsedExports::Unused, x) => (x.clone(), *x != UsedExports::Unused),
            (UsedExports::All, _) => (UsedExports::All, false),
            (UsedExports::Named(_), UsedExports::All) => (UsedExports::All, true),
            (UsedExports::Named(a), UsedExports::Named(b)) => {
                if b.is_subset(a) {
                    (self.clone(), false)
                } else {
                    (UsedExports::Named(a.union(b).cloned().collect()), true)
                }
            }
            (UsedExports::Named(_), UsedExports::Unused) => (self.clone(), false),
        }
    }

    /// In-place join. Only commits when the value actually grows.
    pub fn merge_in_place(&mut self, incoming: &UsedExports) -> bool {
        match (&mut *self, incoming) {
            (_, UsedExports::Unused) | (UsedExports::All, _) => false,
            (UsedExports::Named(a), UsedExports::Named(b)) => {
                if b.is_subset(a) {
                    return false;
                }
                a.extend(b.iter().cloned());
                true
            }
            (slot, incoming) => {
                *slot = incoming.clone();
                true
            }
        }
    }
}

impl PartialOrd for UsedExports {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use UsedExports::*;
        match (self, other) {
            (Unused, Unused) | (All, All) => Some(Ordering::Equal),
            (Unused, _) | (_, All) => Some(Ordering::Less),
            (_, Unused) | (All, _) => Some(Ordering::Greater),
            (Named(a), Named(b)) => {
                if a == b {
                    Some(Ordering::Equal)
                } else if a.is_subset(b) {
                    Some(Ordering::Less)
                } else if a.is_superset(b) {
                    Some(Ordering::Greater)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for UsedExports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsedExports::Unused => write!(f, "unused"),
            UsedExports::All => write!(f, "all"),
            UsedExports::Named(names) => {
                write!(f, "{{")?;
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", name)?;
                }
                write!(f, "}}")
            }
        }
    }
}
