//! Lifecycle hooks and plugin installation.

use crate::error::Result;
use super::registry::ComponentTree;

/// Callback fired after a component mounts, with the tree and the new index.
///
/// Returning an error fails the mount call that triggered it.
pub type MountHook = Box<dyn FnMut(&ComponentTree, usize) -> Result<()>>;

/// Callback fired when a component is unmounted.
pub type DestroyCallback = Box<dyn FnOnce()>;

/// Handle for deregistering a mount hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(pub(crate) u64);

/// Something that hooks itself into a [`ComponentTree`].
///
/// A tree installs each plugin (by [`Plugin::NAME`]) at most once.
pub trait Plugin {
    const NAME: &'static str;

    fn install(self, tree: &mut ComponentTree) -> Result<()>;
}
