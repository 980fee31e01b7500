use std::fs;
use std::path::Path;

use serde::Deserialize;
use treeshake_graph::{EntryPoint, ModuleGraph};

/// A module graph plus its entry points, as stored in tests/fixtures/
#[derive(Debug, Deserialize)]
pub struct GraphFixture {
    pub graph: ModuleGraph,
    pub entries: Vec<EntryPoint>,
}

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load and index a graph fixture
pub fn load_graph(name: &str) -> GraphFixture {
    let source = load_fixture(name);
    let mut fixture: GraphFixture = serde_json::from_str(&source)
        .unwrap_or_else(|e| panic!("Invalid graph fixture {}: {}", name, e));
    fixture
        .graph
        .reindex()
        .unwrap_or_else(|e| panic!("Invalid graph fixture {}: {}", name, e));
    fixture
}
