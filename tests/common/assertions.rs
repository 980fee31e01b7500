use treeshake_flag::UsageTable;
use treeshake_graph::{ModuleGraph, ModuleId};
use treeshake_usage::UsedExports;

/// Look up a module id by identifier
pub fn id(graph: &ModuleGraph, identifier: &str) -> ModuleId {
    graph
        .id_of(identifier)
        .unwrap_or_else(|| panic!("Expected module: {}", identifier))
}

/// Assert a module is reachable with the given usage
pub fn assert_used(graph: &ModuleGraph, table: &UsageTable, identifier: &str, expected: UsedExports) {
    let module = id(graph, identifier);
    assert!(
        table.is_reachable(module),
        "Expected module {} to be reachable",
        identifier
    );
    assert_eq!(
        table.used_exports(module),
        expected,
        "Unexpected usage for module {}",
        identifier
    );
}

/// Assert a module was not reached
pub fn assert_unreachable(graph: &ModuleGraph, table: &UsageTable, identifier: &str) {
    assert!(
        !table.is_reachable(id(graph, identifier)),
        "Expected module {} to be unreachable",
        identifier
    );
}

/// Assert the entry points owning `export` of a module, in order
pub fn assert_owners(
    graph: &ModuleGraph,
    table: &UsageTable,
    identifier: &str,
    export: &str,
    expected: &[&str],
) {
    let record = table
        .get(id(graph, identifier))
        .unwrap_or_else(|| panic!("No usage record for {}", identifier));
    let owners: Vec<&str> = record
        .owners_of(export)
        .map(|set| set.iter().map(|e| e.as_str()).collect())
        .unwrap_or_default();
    assert_eq!(
        owners, expected,
        "Unexpected owners of {} in {}",
        export, identifier
    );
}
