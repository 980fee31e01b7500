//! Per-module usage record
//!
//! A [`ModuleUsage`] is the only place usage state changes. Callers feed it
//! an incoming usage value and the entry point responsible for it, and get
//! back whether the module's own dependencies need (re-)expanding.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ExportName, UsedExports};

/// Identifier of an entry point, used to attribute export usage
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId(id.to_string())
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        EntryId(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map from export name to the entry points that use it
pub type Owners = BTreeMap<ExportName, BTreeSet<EntryId>>;

/// Result of applying incoming usage to a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Module is reachable, but it is side-effect-free and nothing it exports
    /// is used, so its dependencies are not expanded from here
    Pruned,
    /// Nothing changed; no further work needed
    NoNewInfo,
    /// Usage or attribution grew; the module's root block must be expanded
    Expand,
}

/// Knobs for [`ModuleUsage::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Stop at side-effect-free modules with no used exports
    pub prune_side_effect_free: bool,
    /// Keep recording owners after a module became fully used
    pub attribute_after_full_use: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            prune_side_effect_free: true,
            attribute_after_full_use: false,
        }
    }
}

/// Usage state of one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleUsage {
    /// Reached from some entry point during the current run
    pub reachable: bool,
    /// Which exports are consumed
    pub used: UsedExports,
    /// Which entry points consume each named export
    pub owners: Owners,
}

impl ModuleUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply incoming usage on behalf of `entry`.
    ///
    /// Reaching a module for the first time in a run counts as new
    /// information even when the usage value itself does not grow: a plain
    /// side-effect import still has to walk the target's dependencies, and a
    /// run over usage carried from an earlier run has to re-mark them.
    ///
    /// Once a module is [`UsedExports::All`] later `Named` imports are not
    /// attributed unless `options.attribute_after_full_use` is set.
    pub fn apply(
        &mut self,
        incoming: &UsedExports,
        entry: &EntryId,
        side_effect_free: bool,
        options: &ApplyOptions,
    ) -> ApplyOutcome {
        let newly_reached = !self.reachable;
        self.reachable = true;

        if self.used.is_all() {
            let attributed = options.attribute_after_full_use && self.attribute(incoming, entry);
            return if attributed || newly_reached {
                ApplyOutcome::Expand
            } else {
                ApplyOutcome::NoNewInfo
            };
        }

        let grew = self.used.merge_in_place(incoming);
        let attributed = self.attribute(incoming, entry);

        if !grew && !attributed && !newly_reached {
            return ApplyOutcome::NoNewInfo;
        }

        if side_effect_free && options.prune_side_effect_free && self.used.is_nothing() {
            return ApplyOutcome::Pruned;
        }

        ApplyOutcome::Expand
    }

    /// Record `entry` as an owner of every name in a `Named` value.
    /// Returns whether any owner set grew.
    fn attribute(&mut self, incoming: &UsedExports, entry: &EntryId) -> bool {
        let Some(names) = incoming.names() else {
            return false;
        };

        let mut added = false;
        for name in names {
            let owners = self.owners.entry(name.clone()).or_default();
            if !owners.contains(entry) {
                owners.insert(entry.clone());
                added = true;
            }
        }
        added
    }

    /// Entry points that use `name`
    pub fn owners_of(&self, name: &str) -> Option<&BTreeSet<EntryId>> {
        self.owners.get(name)
    }

    /// Forget everything, including the usage carried between runs
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
