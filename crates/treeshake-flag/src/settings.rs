//! Pass configuration

use serde::{Deserialize, Serialize};
use treeshake_usage::ApplyOptions;

/// Settings for [`crate::DependencyUsagePass`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSettings {
    /// Do not expand side-effect-free modules whose exports are unused
    pub side_effect_pruning: bool,
    /// Keep attributing exports to entry points after a module is fully used
    pub attribute_after_full_use: bool,
    /// Abort once this many work items have been processed
    pub max_tasks: Option<usize>,
}

impl Default for FlagSettings {
    fn default() -> Self {
        Self {
            side_effect_pruning: true,
            attribute_after_full_use: false,
            max_tasks: None,
        }
    }
}

impl FlagSettings {
    pub(crate) fn apply_options(&self) -> ApplyOptions {
        ApplyOptions {
            prune_side_effect_free: self.side_effect_pruning,
            attribute_after_full_use: self.attribute_after_full_use,
        }
    }
}
