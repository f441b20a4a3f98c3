//! Component types - Construction props and per-instance scope.
//!
//! A [`Component`] is what callers hand to [`ComponentTree::mount`]. Once
//! mounted, its props and state live in a [`Scope`], which is what computed
//! meta fields are evaluated against.
//!
//! [`ComponentTree::mount`]: crate::engine::ComponentTree::mount

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use spark_signals::{signal, Signal};

use super::meta_field::MetaDeclaration;

// =============================================================================
// Component
// =============================================================================

/// Properties for mounting a component.
///
/// # Example
///
/// ```ignore
/// use spark_meta::{Component, MetaFields};
///
/// let page = Component {
///     id: Some("dashboard".to_string()),
///     meta: Some(MetaFields::new().title("Dashboard").into()),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Default)]
pub struct Component {
    /// Optional component ID for lookup. Generated when absent.
    pub id: Option<String>,

    /// Initial props, readable from computed fields.
    pub props: Map<String, Value>,

    /// Meta info declaration, if this component contributes any.
    pub meta: Option<MetaDeclaration>,
}

impl Component {
    /// Empty component with a generated id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the component ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an initial prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Attach a meta info declaration.
    pub fn with_meta(mut self, meta: impl Into<MetaDeclaration>) -> Self {
        self.meta = Some(meta.into());
        self
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("props", &self.props)
            .field("meta", &self.meta)
            .finish()
    }
}

// =============================================================================
// Scope
// =============================================================================

/// A mounted component's own props and reactive state.
///
/// State cells are signals, so a computed field that reads one sees the
/// latest value every time it is resolved.
#[derive(Clone, Default)]
pub struct Scope {
    props: Map<String, Value>,
    state: HashMap<String, Signal<Value>>,
}

impl Scope {
    /// Scope with the given props and no state.
    pub fn new(props: Map<String, Value>) -> Self {
        Self {
            props,
            state: HashMap::new(),
        }
    }

    /// Get a prop.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// All props.
    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    /// Set or replace a prop.
    pub fn set_prop(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(key.into(), value.into());
    }

    /// Current value of a state cell.
    pub fn state(&self, key: &str) -> Option<Value> {
        self.state.get(key).map(|cell| cell.get())
    }

    /// The signal behind a state cell, for wiring into [`MetaField::Signal`].
    ///
    /// [`MetaField::Signal`]: super::MetaField::Signal
    pub fn state_signal(&self, key: &str) -> Option<Signal<Value>> {
        self.state.get(key).cloned()
    }

    /// Set a state cell, creating it on first write.
    pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.state.get(&key) {
            Some(cell) => {
                cell.set(value);
            }
            None => {
                self.state.insert(key, signal(value));
            }
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.state.keys().collect();
        keys.sort();
        f.debug_struct("Scope")
            .field("props", &self.props)
            .field("state", &keys)
            .finish()
    }
}
