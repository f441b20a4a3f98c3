//! Meta manager - Resolve meta info from the application root and apply the title.
//!
//! One [`MetaManager`] exists per application. [`MetaPlugin`] creates it and
//! hooks it into the tree so that every mount refreshes the title.
//!
//! # Example
//!
//! ```ignore
//! use spark_meta::{ComponentTree, Component, MetaFields, MetaPlugin, MemoryTitle};
//!
//! let title = MemoryTitle::new();
//! let plugin = MetaPlugin::new(title.clone());
//! let meta = plugin.manager();
//!
//! let mut tree = ComponentTree::new();
//! tree.use_plugin(plugin)?;
//!
//! let app = tree.mount(None, Component::new().with_meta(MetaFields::new().title_template("%s | App")))?;
//! tree.mount(Some(app), Component::new().with_meta(MetaFields::new().title("Dashboard")))?;
//!
//! assert_eq!(title.get().as_deref(), Some("Dashboard | App"));
//!
//! // After changing state outside of a mount, refresh by hand
//! meta.update_meta_info(&tree)?;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::MetaConfig;
use crate::engine::{ComponentTree, HookId, Plugin};
use crate::error::Result;
use crate::renderer::TitleSink;
use crate::types::MetaInfo;
use super::collect::collect;
use super::title::{apply_title_template, resolved_title};

// =============================================================================
// Meta Manager
// =============================================================================

/// Per-application meta info API.
pub struct MetaManager {
    config: MetaConfig,
    sink: RefCell<Box<dyn TitleSink>>,
    /// Id of the root this manager collects from, bound on first use.
    root: RefCell<Option<String>>,
    /// Mount hook registered by [`MetaPlugin`], if installed.
    installed: Cell<Option<HookId>>,
}

impl MetaManager {
    /// Manager writing to `sink`, not yet bound to a root.
    pub fn new(config: MetaConfig, sink: impl TitleSink + 'static) -> Self {
        Self {
            config,
            sink: RefCell::new(Box::new(sink)),
            root: RefCell::new(None),
            installed: Cell::new(None),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &MetaConfig {
        &self.config
    }

    /// Id of the bound root, if one has been bound yet.
    pub fn bound_root(&self) -> Option<String> {
        self.root.borrow().clone()
    }

    /// Current sink title.
    pub fn current_title(&self) -> Option<String> {
        self.sink.borrow().title()
    }

    /// Bind to the tree root on first use. If the bound root has since been
    /// unmounted, bind again to whatever the root is now.
    ///
    /// The bound id only counts while it names a parentless component; an id
    /// reused further down the tree triggers a rebind.
    fn root_index(&self, tree: &ComponentTree) -> Option<usize> {
        let mut bound = self.root.borrow_mut();
        let cached = bound
            .as_deref()
            .and_then(|id| tree.get_index(id))
            .filter(|&index| tree.parent(index).is_none());
        if let Some(index) = cached {
            return Some(index);
        }

        let index = tree.root()?;
        *bound = tree.get_id(index).map(str::to_string);
        debug!(index, root = ?bound.as_deref(), "meta manager bound to root");
        Some(index)
    }

    /// Merged meta info for the whole application, title template applied.
    ///
    /// An empty tree yields empty meta info.
    pub fn get_meta_info(&self, tree: &ComponentTree) -> Result<MetaInfo> {
        let Some(root) = self.root_index(tree) else {
            return Ok(MetaInfo::new());
        };

        let mut info = collect(tree, root)?;
        apply_title_template(&mut info, &self.config)?;
        Ok(info)
    }

    /// Resolve meta info and write the title to the sink.
    ///
    /// A missing or falsy title leaves the sink as it was. Returns the
    /// title that was written.
    pub fn update_meta_info(&self, tree: &ComponentTree) -> Result<Option<String>> {
        let info = self.get_meta_info(tree)?;

        let Some(title) = resolved_title(&info, &self.config) else {
            debug!("no title resolved, keeping current title");
            return Ok(None);
        };

        self.sink.borrow_mut().set_title(&title)?;
        debug!(title = %title, "title updated");
        Ok(Some(title))
    }

    /// Refresh the title after every mount in `tree`.
    pub fn attach(self: &Rc<Self>, tree: &mut ComponentTree) -> HookId {
        let manager = Rc::clone(self);
        tree.on_mount(move |tree, _| manager.update_meta_info(tree).map(|_| ()))
    }

    /// Stop refreshing on mount.
    pub fn detach(&self, tree: &mut ComponentTree, hook: HookId) -> bool {
        tree.off_mount(hook)
    }

    /// Remove the hook installed by [`MetaPlugin`] and release the plugin
    /// slot so the tree can install it again. Returns false if not installed.
    pub fn uninstall(&self, tree: &mut ComponentTree) -> bool {
        let Some(hook) = self.installed.take() else {
            return false;
        };
        tree.remove_plugin(MetaPlugin::NAME);
        info!("meta plugin uninstalled");
        self.detach(tree, hook)
    }

    /// Whether this manager is currently installed through [`MetaPlugin`].
    pub fn is_installed(&self) -> bool {
        self.installed.get().is_some()
    }
}

// =============================================================================
// Plugin
// =============================================================================

/// Installs a [`MetaManager`] into a tree.
pub struct MetaPlugin {
    manager: Rc<MetaManager>,
}

impl MetaPlugin {
    /// Plugin with the default configuration.
    pub fn new(sink: impl TitleSink + 'static) -> Self {
        Self::with_config(MetaConfig::default(), sink)
    }

    /// Plugin with a custom configuration.
    pub fn with_config(config: MetaConfig, sink: impl TitleSink + 'static) -> Self {
        Self {
            manager: Rc::new(MetaManager::new(config, sink)),
        }
    }

    /// Handle to the manager, for manual refreshes after the plugin is installed.
    pub fn manager(&self) -> Rc<MetaManager> {
        Rc::clone(&self.manager)
    }
}

impl Plugin for MetaPlugin {
    const NAME: &'static str = "spark-meta";

    fn install(self, tree: &mut ComponentTree) -> Result<()> {
        let hook = self.manager.attach(tree);
        self.manager.installed.set(Some(hook));
        info!("meta plugin installed");
        Ok(())
    }
}
