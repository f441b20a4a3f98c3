//! Meta Pipeline
//!
//! Connects the component tree to the title sink.
//!
//! # Pipeline Architecture
//!
//! ```text
//! mount event → collect (tree walk + merge) → title template → title sink
//! ```
//!
//! ## Data Flow
//!
//! 1. **collect** - Pre-order walk from the root, resolving and merging each declaration
//! 2. **title** - Rewrites `title` through `titleTemplate`
//! 3. **manager** - Writes a truthy title to the sink; falsy titles leave it alone
//!
//! Nothing is cached: every mount recomputes the merged meta info from scratch.

pub mod collect;
pub mod manager;
pub mod title;

pub use collect::{collect, collect_into, collect_with};
pub use manager::{MetaManager, MetaPlugin};
pub use title::{apply_title_template, resolved_title};
