//! Reference resolution contract
//!
//! Resolving an import to a concrete module and the names it pulls in is
//! the host's job. The engine only consumes the answer.

use treeshake_graph::{Dependency, ModuleGraph, ModuleId};
use treeshake_usage::UsedExports;

use crate::error::BoxedResolverError;

/// What a dependency edge pulls in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Target module
    pub module: ModuleId,
    /// Names imported through the edge; `None` carries no refinement
    pub imported_names: Option<UsedExports>,
}

impl Reference {
    pub fn new(module: ModuleId, imported_names: Option<UsedExports>) -> Self {
        Self {
            module,
            imported_names,
        }
    }
}

/// Maps a dependency of `module` to the module and names it references.
///
/// `Ok(None)` means the dependency has no module-level effect. An `Err`
/// aborts the whole run.
pub trait ReferenceResolver {
    fn resolve(
        &self,
        graph: &ModuleGraph,
        module: ModuleId,
        dependency: &Dependency,
    ) -> Result<Option<Reference>, BoxedResolverError>;
}

impl<F> ReferenceResolver for F
where
    F: Fn(&ModuleGraph, ModuleId, &Dependency) -> Result<Option<Reference>, BoxedResolverError>,
{
    fn resolve(
        &self,
        graph: &ModuleGraph,
        module: ModuleId,
        dependency: &Dependency,
    ) -> Result<Option<Reference>, BoxedResolverError> {
        self(graph, module, dependency)
    }
}

/// Resolves each dependency to the target and names declared on it
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredResolver;

impl ReferenceResolver for DeclaredResolver {
    fn resolve(
        &self,
        _graph: &ModuleGraph,
        _module: ModuleId,
        dependency: &Dependency,
    ) -> Result<Option<Reference>, BoxedResolverError> {
        Ok(dependency
            .target
            .map(|target| Reference::new(target, dependency.imported_names.clone())))
    }
}
