//! Engine - The component tree and its lifecycle.
//!
//! - Registry: index allocation, ID mapping, ordered children
//! - Lifecycle: mount hooks, destroy callbacks, plugin installation
//!
//! # Architecture
//!
//! Components are indices into an arena owned by one [`ComponentTree`] per
//! application:
//!
//! ```text
//! Index 0: app       (parent=None, children=[1, 2], meta={titleTemplate})
//! Index 1: sidebar   (parent=0,    children=[],     meta=None)
//! Index 2: dashboard (parent=0,    children=[],     meta={title})
//! ```

mod lifecycle;
mod registry;

pub use lifecycle::*;
pub use registry::*;
