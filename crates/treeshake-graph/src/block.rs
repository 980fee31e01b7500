//! Dependency edges and the blocks that group them

use serde::{Deserialize, Serialize};
use treeshake_usage::UsedExports;

use crate::{BlockId, ModuleId};

/// An edge from an owning module to a possibly-absent target.
///
/// What the edge actually pulls in is decided by a resolver. Graphs that
/// already know their edges can declare the target and imported names here;
/// `treeshake_flag::DeclaredResolver` reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Import specifier as written by the importer (e.g. "./util")
    pub request: String,
    /// Declared target module, if known
    #[serde(default)]
    pub target: Option<ModuleId>,
    /// Declared imported names; `None` means the edge carries no refinement
    #[serde(default)]
    pub imported_names: Option<UsedExports>,
}

impl Dependency {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            target: None,
            imported_names: None,
        }
    }

    /// Edge to `target` without imported-name refinement (side-effect import)
    pub fn to(request: impl Into<String>, target: ModuleId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(request)
        }
    }

    /// Edge to `target` importing the given names
    pub fn importing<I, S>(request: impl Into<String>, target: ModuleId, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: Some(target),
            imported_names: Some(UsedExports::named(names)),
            ..Self::new(request)
        }
    }

    /// Edge to `target` that uses every export (namespace import, re-export all)
    pub fn importing_all(request: impl Into<String>, target: ModuleId) -> Self {
        Self {
            target: Some(target),
            imported_names: Some(UsedExports::All),
            ..Self::new(request)
        }
    }
}

/// Dependencies scoped to one injected variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDependencies {
    pub name: String,
    pub dependencies: Vec<Dependency>,
}

/// Ordered edges originating from one point in a module.
///
/// Nested blocks are conditionally evaluated or lazily loaded sub-graphs
/// (e.g. a dynamic import); they refer back into the graph's block arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyBlock {
    pub id: BlockId,
    /// Module that owns this block
    pub module: ModuleId,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub variables: Vec<VariableDependencies>,
    #[serde(default)]
    pub blocks: Vec<BlockId>,
}

impl DependencyBlock {
    pub fn new(id: BlockId, module: ModuleId) -> Self {
        Self {
            id,
            module,
            dependencies: Vec::new(),
            variables: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Direct and variable-scoped dependencies, in processing order
    pub fn all_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .chain(self.variables.iter().flat_map(|v| v.dependencies.iter()))
    }
}
