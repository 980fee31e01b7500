//! Usage table: per-module usage records keyed by module id
//!
//! The table outlives a single run. Each run clears `reachable` but keeps
//! `used` and `owners` as a baseline; call [`UsageTable::clear`] for a clean
//! slate.

use serde::{Deserialize, Serialize};
use treeshake_graph::{GraphError, Module, ModuleGraph, ModuleId};
use treeshake_usage::{ApplyOptions, ApplyOutcome, EntryId, ModuleUsage, UsedExports};

/// Usage state for every module of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTable {
    records: Vec<ModuleUsage>,
}

impl UsageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with one empty record per module of `graph`
    pub fn for_graph(graph: &ModuleGraph) -> Self {
        let mut table = Self::new();
        table.sync(graph);
        table
    }

    /// Add records for modules added to the graph since the last sync
    pub fn sync(&mut self, graph: &ModuleGraph) {
        if self.records.len() < graph.len() {
            self.records.resize_with(graph.len(), ModuleUsage::new);
        }
    }

    pub fn get(&self, module: ModuleId) -> Option<&ModuleUsage> {
        self.records.get(module.index())
    }

    pub fn is_reachable(&self, module: ModuleId) -> bool {
        self.get(module).is_some_and(|r| r.reachable)
    }

    /// Usage of a module; `Unused` for modules the table has never seen
    pub fn used_exports(&self, module: ModuleId) -> UsedExports {
        self.get(module).map(|r| r.used.clone()).unwrap_or_default()
    }

    /// Mark every module unreachable, keeping usage and owners
    pub fn reset_reachable(&mut self) {
        for record in &mut self.records {
            record.reachable = false;
        }
    }

    /// Drop all usage state, including what earlier runs accumulated
    pub fn clear(&mut self) {
        for record in &mut self.records {
            record.clear();
        }
    }

    /// Apply incoming usage to `module`. The only way usage state changes.
    pub fn apply_usage(
        &mut self,
        module: &Module,
        incoming: &UsedExports,
        entry: &EntryId,
        options: &ApplyOptions,
    ) -> Result<ApplyOutcome, GraphError> {
        let record = self
            .records
            .get_mut(module.id.index())
            .ok_or(GraphError::UnknownModule(module.id))?;
        Ok(record.apply(incoming, entry, module.side_effect_free, options))
    }

    /// Records paired with their module ids
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &ModuleUsage)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (ModuleId(i as u32), r))
    }

    /// Ids of modules reached in the last run
    pub fn reachable_modules(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.iter().filter(|(_, r)| r.reachable).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
