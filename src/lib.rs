//! # spark-meta
//!
//! Component meta info for spark-tui style component trees.
//!
//! Components declare meta info (a title, a title template, any other
//! fields) as literals, [spark-signals](https://github.com/RLabs-Inc/spark-signals)
//! signals, or functions of their own props and state. Whenever a component
//! mounts, the declarations of the whole tree are merged (deeper components
//! win) and the resulting title is written to the application's title sink.
//!
//! ## Architecture
//!
//! ```text
//! ComponentTree::mount → mount hook → collect → title template → TitleSink
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Component tree, lifecycle hooks, plugin installation
//! - [`primitives`] - Components, scopes, meta field declarations
//! - [`pipeline`] - Tree collector, title template, meta manager
//! - [`renderer`] - Title sinks (in-memory, terminal)
//! - [`types`] - Merged meta info
//!
//! ## Logging
//!
//! Emits `tracing` events (`trace` per visited component, `debug` per title
//! update). Install a subscriber in the application to see them.

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::MetaConfig;
pub use error::{MetaError, Result};

pub use engine::{ComponentTree, HookId, MountHook, Plugin};

pub use primitives::{Component, MetaDeclaration, MetaField, MetaFields, Scope};

pub use pipeline::{
    apply_title_template, collect, collect_into, collect_with, resolved_title, MetaManager,
    MetaPlugin,
};

pub use renderer::{MemoryTitle, TerminalTitle, TitleSink};
