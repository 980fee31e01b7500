//! Elimination report
//!
//! Turns a usage table into the list of things the downstream elimination
//! step may strip: whole modules nothing reached, and exports of reached
//! modules nothing imports.

use serde::Serialize;
use treeshake_graph::{ModuleGraph, ModuleId};
use treeshake_usage::{ExportName, UsedExports};

use crate::UsageTable;

/// A single strippable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShakeWarning {
    /// Machine-readable code (W-SHAKE-001, W-SHAKE-002)
    pub code: &'static str,
    pub message: String,
    pub module: ModuleId,
    /// The unused export, for W-SHAKE-002
    pub export: Option<ExportName>,
}

/// Unreachable modules and unused exports after a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub unreachable_modules: Vec<ModuleId>,
    pub unused_exports: Vec<(ModuleId, ExportName)>,
    pub warnings: Vec<ShakeWarning>,
}

impl UsageReport {
    /// Build a report from the state left by the last run.
    ///
    /// Unused exports are only listed for modules whose provided exports
    /// are known and whose usage is not `All`.
    pub fn build(graph: &ModuleGraph, table: &UsageTable) -> Self {
        let mut report = Self::default();

        for module in graph.modules() {
            let Some(record) = table.get(module.id) else {
                report.push_unreachable(module.id, &module.identifier);
                continue;
            };

            if !record.reachable {
                report.push_unreachable(module.id, &module.identifier);
                continue;
            }

            let Some(provided) = &module.provided_exports else {
                continue;
            };
            if matches!(record.used, UsedExports::All) {
                continue;
            }

            for export in provided {
                if !record.used.uses(export) {
                    report.warnings.push(ShakeWarning {
                        code: "W-SHAKE-002",
                        message: format!(
                            "Unused export '{}' in module '{}'",
                            export, module.identifier
                        ),
                        module: module.id,
                        export: Some(export.clone()),
                    });
                    report.unused_exports.push((module.id, export.clone()));
                }
            }
        }

        report
    }

    fn push_unreachable(&mut self, module: ModuleId, identifier: &str) {
        self.warnings.push(ShakeWarning {
            code: "W-SHAKE-001",
            message: format!("Unreachable module '{}'", identifier),
            module,
            export: None,
        });
        self.unreachable_modules.push(module);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flag_dependency_usage, DeclaredResolver};
    use treeshake_graph::{Dependency, EntryPoint};

    #[test]
    fn test_report_lists_unreachable_and_unused() {
        let mut graph = ModuleGraph::new();
        let main = graph.add_module("main", false).unwrap();
        let lib = graph.add_module("lib", false).unwrap();
        let orphan = graph.add_module("orphan", false).unwrap();
        graph.set_provided_exports(lib, ["used", "unused"]).unwrap();
        let root = graph.root_block(main).unwrap();
        graph
            .add_dependency(root, Dependency::importing("./lib", lib, ["used"]))
            .unwrap();

        let mut table = UsageTable::for_graph(&graph);
        let entry = EntryPoint::for_module(&graph, main).unwrap();
        flag_dependency_usage(&graph, &[entry], &DeclaredResolver, &mut table).unwrap();

        let report = UsageReport::build(&graph, &table);
        assert_eq!(report.unreachable_modules, vec![orphan]);
        assert_eq!(report.unused_exports, vec![(lib, "unused".to_string())]);
        assert!(report.warnings.iter().any(|w| w.code == "W-SHAKE-001"));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.code == "W-SHAKE-002" && w.message.contains("unused")));
    }

    #[test]
    fn test_fully_used_module_has_no_unused_exports() {
        let mut graph = ModuleGraph::new();
        let main = graph.add_module("main", false).unwrap();
        graph.set_provided_exports(main, ["a", "b"]).unwrap();

        let mut table = UsageTable::for_graph(&graph);
        let entry = EntryPoint::for_module(&graph, main).unwrap();
        flag_dependency_usage(&graph, &[entry], &DeclaredResolver, &mut table).unwrap();

        assert!(UsageReport::build(&graph, &table).is_empty());
    }
}
