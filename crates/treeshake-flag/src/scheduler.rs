//! LIFO work stack driving the propagation to a fixed point

use treeshake_graph::{BlockId, ModuleId};
use treeshake_usage::{EntryId, UsedExports};

/// A pending block expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Module owning the block
    pub module: ModuleId,
    pub block: BlockId,
    /// Usage that reached this block
    pub usage: UsedExports,
    pub entry: EntryId,
}

/// Pending work for one run. Not shared between runs.
#[derive(Debug, Default)]
pub struct WorkStack {
    items: Vec<WorkItem>,
}

impl WorkStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: WorkItem) {
        self.items.push(item);
    }

    /// Most recently pushed item first
    pub fn pop(&mut self) -> Option<WorkItem> {
        self.items.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(block: u32) -> WorkItem {
        WorkItem {
            module: ModuleId(0),
            block: BlockId(block),
            usage: UsedExports::All,
            entry: EntryId::from("main"),
        }
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = WorkStack::new();
        stack.push(item(1));
        stack.push(item(2));
        stack.push(item(3));

        assert_eq!(stack.pop().map(|i| i.block), Some(BlockId(3)));
        assert_eq!(stack.pop().map(|i| i.block), Some(BlockId(2)));
        stack.push(item(4));
        assert_eq!(stack.pop().map(|i| i.block), Some(BlockId(4)));
        assert_eq!(stack.pop().map(|i| i.block), Some(BlockId(1)));
        assert!(stack.pop().is_none());
    }
}
