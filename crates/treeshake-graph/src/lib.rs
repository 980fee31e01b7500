//! treeshake-graph: module graph arena
//!
//! Modules, their dependency blocks (root and nested), and entry points,
//! stored in index-addressed arenas. The graph is built by an external
//! stage and is read-only while usage flagging runs.
//!
//! # Example
//!
//! ```
//! use treeshake_graph::{Dependency, EntryPoint, ModuleGraph};
//!
//! let mut graph = ModuleGraph::new();
//! let main = graph.add_module("./main.js", false).unwrap();
//! let util = graph.add_module("./util.js", true).unwrap();
//! let root = graph.root_block(main).unwrap();
//! graph
//!     .add_dependency(root, Dependency::importing("./util", util, ["format"]))
//!     .unwrap();
//!
//! let entry = EntryPoint::for_module(&graph, main).unwrap();
//! assert_eq!(entry.id.as_str(), "./main.js");
//! ```

mod block;
mod error;
mod graph;
mod ids;

pub use block::{Dependency, DependencyBlock, VariableDependencies};
pub use error::GraphError;
pub use graph::{EntryPoint, Module, ModuleGraph};
pub use ids::{BlockId, ModuleId};
