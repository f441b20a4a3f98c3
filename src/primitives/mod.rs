//! Component building blocks.
//!
//! - [`Component`] - What gets mounted: id, props, meta declaration
//! - [`Scope`] - A mounted component's props and reactive state
//! - [`MetaField`] / [`MetaFields`] / [`MetaDeclaration`] - Meta info declarations
//!
//! # Reactivity
//!
//! Fields can be:
//! - Literals: `.title("Home")`
//! - Signals: `.signal("title", title_signal)` (read at every resolution)
//! - Computed: `.computed("title", |scope| ...)` (evaluated against the component's scope)

mod meta_field;
mod types;

pub use meta_field::*;
pub use types::*;
