//! Error types for usage flagging

use thiserror::Error;
use treeshake_graph::{GraphError, ModuleId};

/// Boxed error returned by a [`crate::ReferenceResolver`]
pub type BoxedResolverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a flagging run
#[derive(Debug, Error)]
pub enum FlagError {
    /// E-FLAG-001: The resolver failed on a dependency
    #[error("failed to resolve '{request}' from {module}: {source}")]
    Resolver {
        /// Module owning the dependency
        module: ModuleId,
        request: String,
        #[source]
        source: BoxedResolverError,
    },

    /// E-FLAG-002: The graph, an entry point or a resolved reference is inconsistent
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// E-FLAG-003: The configured task budget was exhausted
    #[error("task limit of {limit} exceeded")]
    TaskLimit { limit: usize },
}

impl FlagError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            FlagError::Resolver { .. } => "E-FLAG-001",
            FlagError::Graph(_) => "E-FLAG-002",
            FlagError::TaskLimit { .. } => "E-FLAG-003",
        }
    }
}
