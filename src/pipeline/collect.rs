//! Tree collector - Merge meta info across a component subtree.
//!
//! Walks depth-first, pre-order, children in mount order. Each declaring
//! component's resolved fields overwrite the accumulator key by key, so a
//! descendant always beats its ancestors. Components without a declaration
//! pass the accumulator through untouched.

use tracing::{debug, trace};

use crate::engine::ComponentTree;
use crate::error::{MetaError, Result};
use crate::types::MetaInfo;

/// Merged meta info for `root` and all of its descendants.
pub fn collect(tree: &ComponentTree, root: usize) -> Result<MetaInfo> {
    collect_into(tree, root, MetaInfo::new())
}

/// Like [`collect`], starting from a caller-supplied accumulator.
pub fn collect_into(tree: &ComponentTree, root: usize, base: MetaInfo) -> Result<MetaInfo> {
    collect_with(tree, root, base, |_| {})
}

/// Like [`collect_into`], reporting every visited index in traversal order.
///
/// The first failing field aborts the walk and is returned as-is.
pub fn collect_with(
    tree: &ComponentTree,
    root: usize,
    base: MetaInfo,
    mut on_visit: impl FnMut(usize),
) -> Result<MetaInfo> {
    if !tree.is_mounted(root) {
        return Err(MetaError::UnknownComponent(root));
    }

    let mut info = base;
    let mut visited = 0usize;
    // Explicit stack so deep trees cannot overflow the call stack
    let mut stack = vec![root];

    while let Some(index) = stack.pop() {
        on_visit(index);
        visited += 1;

        if let (Some(meta), Some(scope)) = (tree.meta(index), tree.scope(index)) {
            let id = tree.get_id(index).unwrap_or_default();
            let resolved = meta.resolve(scope, id)?;
            trace!(index, id, fields = resolved.len(), "merging meta info");
            info.merge(resolved);
        }

        // Reversed so the first child is popped first
        stack.extend(tree.children(index).iter().rev());
    }

    debug!(root, visited, fields = info.len(), "collected meta info");
    Ok(info)
}
