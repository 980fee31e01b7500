//! Propagation engine
//!
//! Walks dependency blocks from the entry points, merging the names each
//! edge imports into its target and scheduling the target's own block only
//! when that merge produced new information. Nested blocks are deferred to
//! the work stack rather than expanded inline, so traversal depth does not
//! grow with the graph.

use tracing::{debug, trace};
use treeshake_graph::{Dependency, EntryPoint, Module, ModuleGraph, ModuleId};
use treeshake_usage::{ApplyOptions, ApplyOutcome, EntryId, UsedExports};

use crate::scheduler::{WorkItem, WorkStack};
use crate::{FlagError, FlagSettings, FlagStats, ReferenceResolver, UsageTable};

/// State of one flagging run
pub(crate) struct Engine<'a, R: ?Sized> {
    graph: &'a ModuleGraph,
    resolver: &'a R,
    table: &'a mut UsageTable,
    options: ApplyOptions,
    max_tasks: Option<usize>,
    stack: WorkStack,
    stats: FlagStats,
}

impl<'a, R> Engine<'a, R>
where
    R: ReferenceResolver + ?Sized,
{
    pub(crate) fn new(
        graph: &'a ModuleGraph,
        resolver: &'a R,
        table: &'a mut UsageTable,
        settings: &FlagSettings,
    ) -> Self {
        Self {
            graph,
            resolver,
            table,
            options: settings.apply_options(),
            max_tasks: settings.max_tasks,
            stack: WorkStack::new(),
            stats: FlagStats::default(),
        }
    }

    /// Mark an entry point's root module fully used
    pub(crate) fn seed(&mut self, entry: &EntryPoint) -> Result<(), FlagError> {
        let graph = self.graph;
        let module = graph.module(entry.module)?;
        self.stats.entries += 1;

        let outcome = self
            .table
            .apply_usage(module, &UsedExports::All, &entry.id, &self.options)?;
        self.schedule(module, outcome, &entry.id);
        Ok(())
    }

    /// Pop work items until the stack is empty
    pub(crate) fn run(mut self) -> Result<FlagStats, FlagError> {
        while let Some(item) = self.stack.pop() {
            if let Some(limit) = self.max_tasks {
                if self.stats.tasks_processed >= limit {
                    return Err(FlagError::TaskLimit { limit });
                }
            }
            self.stats.tasks_processed += 1;
            self.process_dependencies_block(item)?;
        }

        self.stats.modules_reached = self.table.reachable_modules().count();
        Ok(self.stats)
    }

    fn process_dependencies_block(&mut self, item: WorkItem) -> Result<(), FlagError> {
        let graph = self.graph;
        let block = graph.block(item.block)?;

        // direct dependencies first, then variable-scoped ones
        for dependency in block.all_dependencies() {
            self.process_dependency(item.module, dependency, &item.entry)?;
        }

        for &nested in &block.blocks {
            self.stack.push(WorkItem {
                module: item.module,
                block: nested,
                usage: item.usage.clone(),
                entry: item.entry.clone(),
            });
        }

        Ok(())
    }

    fn process_dependency(
        &mut self,
        owner: ModuleId,
        dependency: &Dependency,
        entry: &EntryId,
    ) -> Result<(), FlagError> {
        let reference = self
            .resolver
            .resolve(self.graph, owner, dependency)
            .map_err(|source| FlagError::Resolver {
                module: owner,
                request: dependency.request.clone(),
                source,
            })?;
        self.stats.dependencies_resolved += 1;

        let Some(reference) = reference else {
            self.stats.no_effect_dependencies += 1;
            return Ok(());
        };

        let graph = self.graph;
        let target = graph.module(reference.module)?;

        // An edge without imported names cannot add anything to a module
        // that is already reached.
        if reference.imported_names.is_none() && self.table.is_reachable(target.id) {
            trace!(
                request = %dependency.request,
                target = %target.identifier,
                "Skipping edge without imported names"
            );
            self.stats.skipped_edges += 1;
            return Ok(());
        }

        let incoming = reference.imported_names.unwrap_or_default();
        let outcome = self
            .table
            .apply_usage(target, &incoming, entry, &self.options)?;
        self.schedule(target, outcome, entry);
        Ok(())
    }

    fn schedule(&mut self, module: &Module, outcome: ApplyOutcome, entry: &EntryId) {
        match outcome {
            ApplyOutcome::Expand => {
                let usage = self.table.used_exports(module.id);
                debug!(
                    module = %module.identifier,
                    usage = %usage,
                    entry = %entry,
                    "Expanding module"
                );
                self.stats.modules_expanded += 1;
                self.stack.push(WorkItem {
                    module: module.id,
                    block: module.root,
                    usage,
                    entry: entry.clone(),
                });
            }
            ApplyOutcome::Pruned => {
                debug!(
                    module = %module.identifier,
                    "Side-effect-free module has no used exports, not expanding"
                );
                self.stats.modules_pruned += 1;
            }
            ApplyOutcome::NoNewInfo => {}
        }
    }
}
