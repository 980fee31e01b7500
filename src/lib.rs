//! treeshake - reachability and export usage flagging for module graphs
//!
//! This is the root workspace crate that hosts the integration tests.
//! The implementation lives in the workspace member crates.

// Re-export main crates for convenience
pub use treeshake_flag as flag;
pub use treeshake_graph as graph;
pub use treeshake_usage as usage;
