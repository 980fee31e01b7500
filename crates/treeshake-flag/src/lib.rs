//! treeshake-flag: reachability and export usage flagging
//!
//! Given a module graph, its entry points and a reference resolver, this
//! crate computes which modules are reachable and which of their exports are
//! consumed, attributing each used export to the entry points that need it.
//! The result drives dead-code elimination downstream.
//!
//! The analysis is a monotone worklist fixed point: usage only grows along
//! `Unused ⊑ Named(S) ⊑ All`, and a module's dependencies are re-expanded
//! only when a merge changes something, so cycles terminate on their own.
//!
//! # Usage
//!
//! ```
//! use treeshake_flag::{flag_dependency_usage, DeclaredResolver, UsageTable};
//! use treeshake_graph::{Dependency, EntryPoint, ModuleGraph};
//! use treeshake_usage::UsedExports;
//!
//! let mut graph = ModuleGraph::new();
//! let main = graph.add_module("./main.js", false).unwrap();
//! let util = graph.add_module("./util.js", true).unwrap();
//! let root = graph.root_block(main).unwrap();
//! graph
//!     .add_dependency(root, Dependency::importing("./util", util, ["format"]))
//!     .unwrap();
//!
//! let entries = [EntryPoint::for_module(&graph, main).unwrap()];
//! let mut table = UsageTable::for_graph(&graph);
//! flag_dependency_usage(&graph, &entries, &DeclaredResolver, &mut table).unwrap();
//!
//! assert_eq!(table.used_exports(util), UsedExports::named(["format"]));
//! ```
//!
//! # Runs and state
//!
//! Each run resets reachability but keeps usage and owners from earlier runs
//! as a baseline. Callers that need a clean re-analysis must call
//! [`UsageTable::clear`] first.

mod engine;
mod error;
mod report;
mod resolver;
mod scheduler;
mod settings;
mod table;

pub use error::{BoxedResolverError, FlagError};
pub use report::{ShakeWarning, UsageReport};
pub use resolver::{DeclaredResolver, Reference, ReferenceResolver};
pub use scheduler::{WorkItem, WorkStack};
pub use settings::FlagSettings;
pub use table::UsageTable;

use engine::Engine;
use serde::Serialize;
use tracing::info;
use treeshake_graph::{EntryPoint, ModuleGraph};

/// Counters from one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagStats {
    /// Entry points seeded
    pub entries: usize,
    /// Work items popped and expanded
    pub tasks_processed: usize,
    /// Resolver calls
    pub dependencies_resolved: usize,
    /// Dependencies the resolver reported as having no effect
    pub no_effect_dependencies: usize,
    /// Edges without imported names that hit an already reached module
    pub skipped_edges: usize,
    /// Times a module's root block was scheduled
    pub modules_expanded: usize,
    /// Side-effect-free modules reached with nothing used
    pub modules_pruned: usize,
    /// Modules reachable at the end of the run
    pub modules_reached: usize,
}

/// The usage flagging pass
#[derive(Debug, Clone, Default)]
pub struct DependencyUsagePass {
    settings: FlagSettings,
}

impl DependencyUsagePass {
    pub fn new(settings: FlagSettings) -> Self {
        Self { settings }
    }

    pub fn name(&self) -> &'static str {
        "flag-dependency-usage"
    }

    /// Run the analysis to its fixed point.
    ///
    /// Resolver failures and dangling module ids abort the run; whatever was
    /// already written to `table` stays there as a valid lower bound.
    pub fn run<R>(
        &self,
        graph: &ModuleGraph,
        entries: &[EntryPoint],
        resolver: &R,
        table: &mut UsageTable,
    ) -> Result<FlagStats, FlagError>
    where
        R: ReferenceResolver + ?Sized,
    {
        info!(
            pass = self.name(),
            modules = graph.len(),
            entries = entries.len(),
            "Starting dependency usage flagging"
        );

        table.sync(graph);
        table.reset_reachable();

        let mut engine = Engine::new(graph, resolver, table, &self.settings);
        for entry in entries {
            engine.seed(entry)?;
        }
        let stats = engine.run()?;

        info!(
            tasks = stats.tasks_processed,
            reached = stats.modules_reached,
            pruned = stats.modules_pruned,
            "Finished dependency usage flagging"
        );
        Ok(stats)
    }
}

/// Run the pass with default settings
pub fn flag_dependency_usage<R>(
    graph: &ModuleGraph,
    entries: &[EntryPoint],
    resolver: &R,
    table: &mut UsageTable,
) -> Result<FlagStats, FlagError>
where
    R: ReferenceResolver + ?Sized,
{
    DependencyUsagePass::default().run(graph, entries, resolver, table)
}
