//! Component Registry - The live component tree.
//!
//! Manages the lifecycle of component indices:
//! - ID ↔ Index bidirectional mapping
//! - Free index pool for O(1) reuse
//! - Ordered child lists (insertion order)
//! - Mount hooks, destroy callbacks, plugin guard
//!
//! Children are kept in the order they were mounted, and traversal follows
//! that order. Two siblings declaring the same meta field still conflict: the
//! later-mounted one wins, which callers should not lean on.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::{MetaError, Result};
use crate::primitives::{Component, MetaDeclaration, Scope};
use super::lifecycle::{DestroyCallback, HookId, MountHook, Plugin};

// =============================================================================
// Node
// =============================================================================

struct Node {
    id: String,
    parent: Option<usize>,
    children: Vec<usize>,
    scope: Scope,
    meta: Option<MetaDeclaration>,
}

// =============================================================================
// Component Tree
// =============================================================================

/// Arena of mounted components, one per application.
#[derive(Default)]
pub struct ComponentTree {
    nodes: Vec<Option<Node>>,
    id_to_index: HashMap<String, usize>,
    /// Pool of freed indices for reuse.
    free_indices: Vec<usize>,
    /// Counter for generating unique IDs.
    id_counter: usize,
    /// Parentless components, in mount order.
    roots: Vec<usize>,
    mount_hooks: Vec<(HookId, MountHook)>,
    next_hook_id: u64,
    destroy_callbacks: HashMap<usize, Vec<DestroyCallback>>,
    plugins: HashSet<&'static str>,
}

impl ComponentTree {
    /// Empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mount / Unmount
    // =========================================================================

    /// Mount a component under `parent` (or as a root) and fire mount hooks.
    ///
    /// The component stays mounted even if a hook fails; the hook's error is
    /// returned after every earlier hook has run.
    pub fn mount(&mut self, parent: Option<usize>, component: Component) -> Result<usize> {
        if let Some(parent) = parent {
            if !self.is_mounted(parent) {
                return Err(MetaError::UnknownComponent(parent));
            }
        }

        let id = match component.id {
            Some(id) => {
                if self.id_to_index.contains_key(&id) {
                    return Err(MetaError::DuplicateId(id));
                }
                id
            }
            None => self.generate_id(),
        };

        // Reuse free index or allocate new
        let index = match self.free_indices.pop() {
            Some(index) => index,
            None => {
                self.nodes.push(None);
                self.nodes.len() - 1
            }
        };

        self.id_to_index.insert(id.clone(), index);
        self.nodes[index] = Some(Node {
            id,
            parent,
            children: Vec::new(),
            scope: Scope::new(component.props),
            meta: component.meta,
        });

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.node_mut(p) {
                    parent_node.children.push(index);
                }
            }
            None => self.roots.push(index),
        }

        trace!(index, ?parent, "component mounted");
        self.fire_mounted(index)?;
        Ok(index)
    }

    /// Unmount a component and, first, all of its descendants.
    ///
    /// Returns false if nothing was mounted at `index`.
    pub fn unmount(&mut self, index: usize) -> bool {
        if !self.is_mounted(index) {
            return false;
        }

        // Explicit worklist: pre-order reversed is a post-order where every
        // child precedes its parent
        let mut subtree = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            subtree.push(current);
            stack.extend(self.children(current).iter().copied());
        }

        for current in subtree.into_iter().rev() {
            self.release(current);
        }

        // Everything gone: drop the arena instead of keeping a pool of holes
        if self.id_to_index.is_empty() {
            self.nodes.clear();
            self.free_indices.clear();
        }
        true
    }

    /// Release one component whose children are already gone.
    fn release(&mut self, index: usize) {
        self.run_destroy_callbacks(index);

        let Some(node) = self.nodes.get_mut(index).and_then(Option::take) else {
            return;
        };
        match node.parent {
            Some(p) => {
                if let Some(parent_node) = self.node_mut(p) {
                    parent_node.children.retain(|&c| c != index);
                }
            }
            None => self.roots.retain(|&r| r != index),
        }
        self.id_to_index.remove(&node.id);
        self.free_indices.push(index);
        trace!(index, id = %node.id, "component unmounted");
    }

    fn generate_id(&mut self) -> String {
        loop {
            let id = format!("c{}", self.id_counter);
            self.id_counter += 1;
            if !self.id_to_index.contains_key(&id) {
                return id;
            }
        }
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Register a callback fired after every mount. Hooks run in registration order.
    pub fn on_mount(
        &mut self,
        hook: impl FnMut(&ComponentTree, usize) -> Result<()> + 'static,
    ) -> HookId {
        let id = HookId(self.next_hook_id);
        self.next_hook_id += 1;
        self.mount_hooks.push((id, Box::new(hook)));
        id
    }

    /// Deregister a mount hook. Returns false if it was not registered.
    pub fn off_mount(&mut self, id: HookId) -> bool {
        let before = self.mount_hooks.len();
        self.mount_hooks.retain(|(hook_id, _)| *hook_id != id);
        self.mount_hooks.len() != before
    }

    /// Register a callback to run when the component at `index` is unmounted.
    ///
    /// Returns false (and drops the callback) if nothing is mounted at `index`.
    pub fn on_destroy(&mut self, index: usize, callback: impl FnOnce() + 'static) -> bool {
        if !self.is_mounted(index) {
            return false;
        }
        self.destroy_callbacks
            .entry(index)
            .or_default()
            .push(Box::new(callback));
        true
    }

    fn fire_mounted(&mut self, index: usize) -> Result<()> {
        // Hooks only see `&self`, so they cannot register or remove hooks mid-dispatch
        let mut hooks = std::mem::take(&mut self.mount_hooks);
        let result = {
            let tree: &ComponentTree = self;
            hooks.iter_mut().try_for_each(|(_, hook)| hook(tree, index))
        };
        self.mount_hooks = hooks;
        result
    }

    fn run_destroy_callbacks(&mut self, index: usize) {
        if let Some(callbacks) = self.destroy_callbacks.remove(&index) {
            for callback in callbacks {
                callback();
            }
        }
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    /// Install a plugin once. Returns `Ok(false)` if it was already installed.
    pub fn use_plugin<P: Plugin>(&mut self, plugin: P) -> Result<bool> {
        if !self.plugins.insert(P::NAME) {
            debug!(plugin = P::NAME, "plugin already installed");
            return Ok(false);
        }
        if let Err(e) = plugin.install(self) {
            self.plugins.remove(P::NAME);
            return Err(e);
        }
        Ok(true)
    }

    /// Forget an installed plugin so it can be installed again.
    ///
    /// Whatever the plugin registered stays; removing it is the plugin's job.
    pub fn remove_plugin(&mut self, name: &str) -> bool {
        self.plugins.remove(name)
    }

    /// Whether a plugin with this name is installed.
    pub fn is_installed(&self, name: &str) -> bool {
        self.plugins.contains(name)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index).and_then(Option::as_mut)
    }

    /// The application root: the first parentless component still mounted.
    pub fn root(&self) -> Option<usize> {
        self.roots.first().copied()
    }

    /// Parent index, None for roots.
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.node(index).and_then(|n| n.parent)
    }

    /// Children in mount order (empty if not mounted).
    pub fn children(&self, index: usize) -> &[usize] {
        self.node(index)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Get index for a component ID.
    pub fn get_index(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// Get ID for an index.
    pub fn get_id(&self, index: usize) -> Option<&str> {
        self.node(index).map(|n| n.id.as_str())
    }

    /// Check if an index is currently mounted.
    pub fn is_mounted(&self, index: usize) -> bool {
        self.node(index).is_some()
    }

    /// Count of currently mounted components.
    pub fn len(&self) -> usize {
        self.id_to_index.len()
    }

    /// Check if nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.id_to_index.is_empty()
    }

    /// A component's props and state.
    pub fn scope(&self, index: usize) -> Option<&Scope> {
        self.node(index).map(|n| &n.scope)
    }

    /// Mutable access to a component's props and state.
    pub fn scope_mut(&mut self, index: usize) -> Option<&mut Scope> {
        self.node_mut(index).map(|n| &mut n.scope)
    }

    /// A component's meta declaration, if any.
    pub fn meta(&self, index: usize) -> Option<&MetaDeclaration> {
        self.node(index).and_then(|n| n.meta.as_ref())
    }

    /// Replace a component's meta declaration. Does not fire mount hooks.
    pub fn set_meta(&mut self, index: usize, meta: Option<MetaDeclaration>) -> Result<()> {
        let node = self
            .node_mut(index)
            .ok_or(MetaError::UnknownComponent(index))?;
        node.meta = meta;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_mount_allocates_indices() {
        let mut tree = ComponentTree::new();

        let idx1 = tree.mount(None, Component::new()).unwrap();
        let idx2 = tree.mount(Some(idx1), Component::new()).unwrap();
        let idx3 = tree.mount(Some(idx1), Component::new().with_id("my_box")).unwrap();

        assert_eq!((idx1, idx2, idx3), (0, 1, 2));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(), Some(0));
        assert_eq!(tree.children(0), &[1, 2]);
        assert_eq!(tree.parent(2), Some(0));
        assert!(!tree.is_mounted(3));
    }

    #[test]
    fn test_id_mapping() {
        let mut tree = ComponentTree::new();

        let generated = tree.mount(None, Component::new()).unwrap();
        let named = tree
            .mount(Some(generated), Component::new().with_id("test_component"))
            .unwrap();

        assert_eq!(tree.get_id(generated), Some("c0"));
        assert_eq!(tree.get_index("test_component"), Some(named));
        assert_eq!(tree.get_id(named), Some("test_component"));
    }

    #[test]
    fn test_generated_id_skips_taken() {
        let mut tree = ComponentTree::new();

        let root = tree.mount(None, Component::new().with_id("c0")).unwrap();
        let child = tree.mount(Some(root), Component::new()).unwrap();

        assert_eq!(tree.get_id(child), Some("c1"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut tree = ComponentTree::new();
        tree.mount(None, Component::new().with_id("app")).unwrap();

        let err = tree.mount(None, Component::new().with_id("app")).unwrap_err();
        assert!(matches!(err, MetaError::DuplicateId(id) if id == "app"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut tree = ComponentTree::new();
        let err = tree.mount(Some(7), Component::new()).unwrap_err();
        assert!(matches!(err, MetaError::UnknownComponent(7)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_unmount_and_reuse() {
        let mut tree = ComponentTree::new();

        let root = tree.mount(None, Component::new()).unwrap();
        let a = tree.mount(Some(root), Component::new()).unwrap();
        let b = tree.mount(Some(root), Component::new()).unwrap();

        assert!(tree.unmount(a));
        assert!(!tree.is_mounted(a));
        assert_eq!(tree.children(root), &[b]);

        // Should reuse the freed index
        let c = tree.mount(Some(root), Component::new()).unwrap();
        assert_eq!(c, a);
        assert_eq!(tree.children(root), &[b, c]);
    }

    #[test]
    fn test_unmount_is_recursive_and_runs_destroy_callbacks() {
        let mut tree = ComponentTree::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let root = tree.mount(None, Component::new()).unwrap();
        let child = tree.mount(Some(root), Component::new()).unwrap();
        let grandchild = tree.mount(Some(child), Component::new()).unwrap();

        for index in [root, child, grandchild] {
            let order = order.clone();
            tree.on_destroy(index, move || order.borrow_mut().push(index));
        }

        assert!(tree.unmount(root));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        // Children go first
        assert_eq!(*order.borrow(), vec![grandchild, child, root]);
        assert!(!tree.unmount(root));
    }

    #[test]
    fn test_unmount_deep_chain() {
        let mut tree = ComponentTree::new();
        let root = tree.mount(None, Component::new()).unwrap();
        let mut parent = root;
        for _ in 0..50_000 {
            parent = tree.mount(Some(parent), Component::new()).unwrap();
        }

        let released = Rc::new(Cell::new(false));
        let flag = released.clone();
        assert!(tree.on_destroy(parent, move || flag.set(true)));

        assert!(tree.unmount(root));
        assert!(tree.is_empty());
        assert!(released.get());
    }

    #[test]
    fn test_unmount_subtree_keeps_siblings() {
        let mut tree = ComponentTree::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let root = tree.mount(None, Component::new()).unwrap();
        let a = tree.mount(Some(root), Component::new()).unwrap();
        let a1 = tree.mount(Some(a), Component::new()).unwrap();
        let a2 = tree.mount(Some(a), Component::new()).unwrap();
        let b = tree.mount(Some(root), Component::new()).unwrap();

        for index in [a, a1, a2] {
            let order = order.clone();
            tree.on_destroy(index, move || order.borrow_mut().push(index));
        }

        assert!(tree.unmount(a));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);
        // Parent goes last
        assert_eq!(order.borrow().last(), Some(&a));
        assert_eq!(order.borrow().len(), 3);
    }

    #[test]
    fn test_on_destroy_ignores_unmounted_index() {
        let mut tree = ComponentTree::new();
        let fired = Rc::new(Cell::new(false));

        let root = tree.mount(None, Component::new()).unwrap();
        let flag = fired.clone();
        assert!(!tree.on_destroy(5, move || flag.set(true)));

        // Fill index 1..=5 and release index 5; the stale callback must not fire
        let mut last = root;
        for _ in 0..5 {
            last = tree.mount(Some(root), Component::new()).unwrap();
        }
        assert_eq!(last, 5);
        tree.unmount(last);

        assert!(!fired.get());
    }

    #[test]
    fn test_mount_hooks_fire_in_order() {
        let mut tree = ComponentTree::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        tree.on_mount(move |tree, index| {
            first.borrow_mut().push(format!("a:{}", tree.get_id(index).unwrap_or("?")));
            Ok(())
        });
        let second = seen.clone();
        tree.on_mount(move |_, index| {
            second.borrow_mut().push(format!("b:{index}"));
            Ok(())
        });

        tree.mount(None, Component::new().with_id("app")).unwrap();
        assert_eq!(*seen.borrow(), vec!["a:app".to_string(), "b:0".to_string()]);
    }

    #[test]
    fn test_mount_hook_error_propagates() {
        let mut tree = ComponentTree::new();
        tree.on_mount(|_, _| Err(MetaError::custom("hook failed")));

        let err = tree.mount(None, Component::new()).unwrap_err();
        assert_eq!(err.to_string(), "hook failed");
        // The component itself did mount
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_off_mount() {
        let mut tree = ComponentTree::new();
        let count = Rc::new(Cell::new(0));

        let counter = count.clone();
        let id = tree.on_mount(move |_, _| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        let root = tree.mount(None, Component::new()).unwrap();
        assert!(tree.off_mount(id));
        assert!(!tree.off_mount(id));
        tree.mount(Some(root), Component::new()).unwrap();

        assert_eq!(count.get(), 1);
    }

    struct CountingPlugin(Rc<Cell<usize>>);

    impl Plugin for CountingPlugin {
        const NAME: &'static str = "counting";

        fn install(self, _tree: &mut ComponentTree) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_plugin_installs_once() {
        let mut tree = ComponentTree::new();
        let installs = Rc::new(Cell::new(0));

        assert!(tree.use_plugin(CountingPlugin(installs.clone())).unwrap());
        assert!(!tree.use_plugin(CountingPlugin(installs.clone())).unwrap());

        assert_eq!(installs.get(), 1);
        assert!(tree.is_installed("counting"));

        assert!(tree.remove_plugin("counting"));
        assert!(tree.use_plugin(CountingPlugin(installs.clone())).unwrap());
        assert_eq!(installs.get(), 2);
    }

    #[test]
    fn test_set_meta_unknown_component() {
        let mut tree = ComponentTree::new();
        assert!(matches!(
            tree.set_meta(3, None),
            Err(MetaError::UnknownComponent(3))
        ));
    }
}
