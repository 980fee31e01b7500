//! Error types for module graph construction and lookup

use thiserror::Error;

use crate::{BlockId, ModuleId};

/// Errors from building or querying a [`crate::ModuleGraph`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// E-GRAPH-001: Two modules share an identifier
    #[error("duplicate module identifier: {identifier}")]
    DuplicateModule { identifier: String },

    /// E-GRAPH-002: A module id that is not in the graph
    #[error("unknown module: {0}")]
    UnknownModule(ModuleId),

    /// E-GRAPH-003: A block id that is not in the graph
    #[error("unknown dependency block: {0}")]
    UnknownBlock(BlockId),

    /// E-GRAPH-004: A module stored at an index other than its id
    #[error("module {id} stored at index {index}")]
    MisplacedModule { index: usize, id: ModuleId },

    /// E-GRAPH-005: A block stored at an index other than its id
    #[error("dependency block {id} stored at index {index}")]
    MisplacedBlock { index: usize, id: BlockId },

    /// E-GRAPH-006: A block reached from a module it does not belong to
    #[error("dependency block {block} belongs to {found}, reached from {expected}")]
    ForeignBlock {
        block: BlockId,
        expected: ModuleId,
        found: ModuleId,
    },

    /// E-GRAPH-007: Nested blocks that do not form a tree under a module root
    #[error("dependency block {0} is not nested as a tree under its module root")]
    InvalidNesting(BlockId),
}

impl GraphError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::DuplicateModule { .. } => "E-GRAPH-001",
            GraphError::UnknownModule(_) => "E-GRAPH-002",
            GraphError::UnknownBlock(_) => "E-GRAPH-003",
            GraphError::MisplacedModule { .. } => "E-GRAPH-004",
            GraphError::MisplacedBlock { .. } => "E-GRAPH-005",
            GraphError::ForeignBlock { .. } => "E-GRAPH-006",
            GraphError::InvalidNesting(_) => "E-GRAPH-007",
        }
    }
}
