//! Module graph data structure

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use treeshake_usage::{EntryId, ExportName};

use crate::{BlockId, Dependency, DependencyBlock, GraphError, ModuleId, VariableDependencies};

/// A build unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Assigned on insertion
    pub id: ModuleId,
    /// Stable identifier (usually the resolved path)
    pub identifier: String,
    /// Evaluating the module has no effect beyond its exports
    #[serde(default)]
    pub side_effect_free: bool,
    /// Root of this module's dependency blocks
    pub root: BlockId,
    /// Names the module is known to export, if the graph builder knows them
    #[serde(default)]
    pub provided_exports: Option<Vec<ExportName>>,
}

/// A root module reachability is seeded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub id: EntryId,
    pub module: ModuleId,
}

impl EntryPoint {
    pub fn new(id: impl Into<EntryId>, module: ModuleId) -> Self {
        Self {
            id: id.into(),
            module,
        }
    }

    /// Entry point named after its root module's identifier
    pub fn for_module(graph: &ModuleGraph, module: ModuleId) -> Result<Self, GraphError> {
        let identifier = graph.module(module)?.identifier.clone();
        Ok(Self::new(identifier, module))
    }
}

/// Arena of modules and dependency blocks.
///
/// Modules and blocks refer to each other by index only, so circular
/// dependencies need no special ownership handling.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ModuleGraph {
    modules: Vec<Module>,
    blocks: Vec<DependencyBlock>,
    #[serde(skip)]
    by_identifier: HashMap<String, ModuleId>,
}

impl ModuleGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a module with an empty root block
    pub fn add_module(
        &mut self,
        identifier: impl Into<String>,
        side_effect_free: bool,
    ) -> Result<ModuleId, GraphError> {
        let identifier = identifier.into();
        if self.by_identifier.contains_key(&identifier) {
            return Err(GraphError::DuplicateModule { identifier });
        }

        let id = ModuleId(self.modules.len() as u32);
        let root = self.push_block(id);
        self.by_identifier.insert(identifier.clone(), id);
        self.modules.push(Module {
            id,
            identifier,
            side_effect_free,
            root,
            provided_exports: None,
        });
        Ok(id)
    }

    /// Record the names a module exports
    pub fn set_provided_exports<I, S>(&mut self, module: ModuleId, names: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ExportName>,
    {
        let module = self.module_mut(module)?;
        module.provided_exports = Some(names.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Create a block nested under `parent`, owned by the same module
    pub fn add_nested_block(&mut self, parent: BlockId) -> Result<BlockId, GraphError> {
        let owner = self.block(parent)?.module;
        let id = self.push_block(owner);
        self.block_mut(parent)?.blocks.push(id);
        Ok(id)
    }

    /// Append a direct dependency to a block
    pub fn add_dependency(&mut self, block: BlockId, dependency: Dependency) -> Result<(), GraphError> {
        self.check_target(&dependency)?;
        self.block_mut(block)?.dependencies.push(dependency);
        Ok(())
    }

    /// Append a variable-scoped dependency group to a block
    pub fn add_variable(
        &mut self,
        block: BlockId,
        name: impl Into<String>,
        dependencies: Vec<Dependency>,
    ) -> Result<(), GraphError> {
        for dependency in &dependencies {
            self.check_target(dependency)?;
        }
        self.block_mut(block)?.variables.push(VariableDependencies {
            name: name.into(),
            dependencies,
        });
        Ok(())
    }

    /// Get a module by ID
    pub fn module(&self, id: ModuleId) -> Result<&Module, GraphError> {
        self.modules
            .get(id.index())
            .ok_or(GraphError::UnknownModule(id))
    }

    fn module_mut(&mut self, id: ModuleId) -> Result<&mut Module, GraphError> {
        self.modules
            .get_mut(id.index())
            .ok_or(GraphError::UnknownModule(id))
    }

    /// Get a block by ID
    pub fn block(&self, id: BlockId) -> Result<&DependencyBlock, GraphError> {
        self.blocks.get(id.index()).ok_or(GraphError::UnknownBlock(id))
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut DependencyBlock, GraphError> {
        self.blocks
            .get_mut(id.index())
            .ok_or(GraphError::UnknownBlock(id))
    }

    /// Root block of a module
    pub fn root_block(&self, module: ModuleId) -> Result<BlockId, GraphError> {
        Ok(self.module(module)?.root)
    }

    /// Get the ID for a module identifier
    pub fn id_of(&self, identifier: &str) -> Option<ModuleId> {
        self.by_identifier.get(identifier).copied()
    }

    /// Check if a module id belongs to this graph
    pub fn contains(&self, id: ModuleId) -> bool {
        id.index() < self.modules.len()
    }

    /// Iterate over all modules
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Rebuild the identifier index and validate the arena, e.g. after
    /// deserializing
    pub fn reindex(&mut self) -> Result<(), GraphError> {
        self.validate()?;
        self.by_identifier.clear();
        for module in &self.modules {
            if self
                .by_identifier
                .insert(module.identifier.clone(), module.id)
                .is_some()
            {
                return Err(GraphError::DuplicateModule {
                    identifier: module.identifier.clone(),
                });
            }
        }
        Ok(())
    }

    /// Check that ids match arena positions, every reference points into the
    /// arena, and each module's blocks form a tree under its root.
    ///
    /// Graphs built through the `add_*` helpers always pass.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (index, module) in self.modules.iter().enumerate() {
            if module.id.index() != index {
                return Err(GraphError::MisplacedModule { index, id: module.id });
            }
        }
        for (index, block) in self.blocks.iter().enumerate() {
            if block.id.index() != index {
                return Err(GraphError::MisplacedBlock { index, id: block.id });
            }
            for dependency in block.all_dependencies() {
                self.check_target(dependency)?;
            }
        }

        let mut visited = vec![false; self.blocks.len()];
        let mut pending = Vec::new();
        for module in &self.modules {
            pending.push(module.root);
            while let Some(id) = pending.pop() {
                let block = self.block(id)?;
                if block.module != module.id {
                    return Err(GraphError::ForeignBlock {
                        block: id,
                        expected: module.id,
                        found: block.module,
                    });
                }
                if std::mem::replace(&mut visited[id.index()], true) {
                    return Err(GraphError::InvalidNesting(id));
                }
                pending.extend(block.blocks.iter().copied());
            }
        }

        // Nesting outside every root's tree (shared with a reached block, or
        // a detached loop) is never walked but still malformed
        for block in self.blocks.iter().filter(|b| !visited[b.id.index()]) {
            if let Some(&nested) = block.blocks.first() {
                self.block(nested)?;
                return Err(GraphError::InvalidNesting(nested));
            }
        }
        Ok(())
    }

    fn push_block(&mut self, module: ModuleId) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(DependencyBlock::new(id, module));
        id
    }

    fn check_target(&self, dependency: &Dependency) -> Result<(), GraphError> {
        match dependency.target {
            Some(target) if !self.contains(target) => Err(GraphError::UnknownModule(target)),
            _ => Ok(()),
        }
    }
}
