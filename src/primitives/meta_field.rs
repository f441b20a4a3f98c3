//! Meta field declarations.
//!
//! A component declares its meta info either field by field ([`MetaFields`])
//! or as one function of its scope returning the whole object. Each field is
//! a literal, a signal, or a computed closure, in the same spirit as a prop
//! value being static, a signal or a getter.
//!
//! ```ignore
//! use spark_meta::{MetaFields, MetaField};
//!
//! let meta = MetaFields::new()
//!     .title_template("%s | App")
//!     .computed("title", |scope| {
//!         Ok(scope.prop("name").cloned().unwrap_or_default())
//!     });
//! ```

use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use spark_signals::Signal;

use crate::error::{MetaError, Result};
use crate::types::MetaInfo;
use super::types::Scope;

/// Closure evaluated against the declaring component's scope.
pub type ComputedField = Rc<dyn Fn(&Scope) -> Result<Value>>;

/// Closure producing a component's whole meta info from its scope.
pub type ComputedMeta = Rc<dyn Fn(&Scope) -> Result<MetaInfo>>;

/// Field name reported when a whole-object declaration fails.
const WHOLE_DECLARATION: &str = "*";

// =============================================================================
// MetaField
// =============================================================================

/// One declared meta field.
#[derive(Clone)]
pub enum MetaField {
    /// Used as-is.
    Literal(Value),
    /// Read at resolution time.
    Signal(Signal<Value>),
    /// Evaluated against the component's scope on every resolution.
    Computed(ComputedField),
}

impl MetaField {
    pub fn computed(f: impl Fn(&Scope) -> Result<Value> + 'static) -> Self {
        MetaField::Computed(Rc::new(f))
    }

    /// Resolve to a concrete value. Nothing is cached.
    pub fn resolve(&self, scope: &Scope) -> Result<Value> {
        match self {
            MetaField::Literal(v) => Ok(v.clone()),
            MetaField::Signal(s) => Ok(s.get()),
            MetaField::Computed(f) => f(scope),
        }
    }
}

impl fmt::Debug for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaField::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            MetaField::Signal(_) => f.write_str("Signal(..)"),
            MetaField::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for MetaField {
    fn from(value: Value) -> Self {
        MetaField::Literal(value)
    }
}

impl From<&str> for MetaField {
    fn from(value: &str) -> Self {
        MetaField::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for MetaField {
    fn from(value: String) -> Self {
        MetaField::Literal(Value::String(value))
    }
}

impl From<Signal<Value>> for MetaField {
    fn from(signal: Signal<Value>) -> Self {
        MetaField::Signal(signal)
    }
}

// =============================================================================
// MetaFields builder
// =============================================================================

/// Field-by-field declaration, kept in declaration order.
#[derive(Clone, Debug, Default)]
pub struct MetaFields {
    fields: Vec<(String, MetaField)>,
}

impl MetaFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Declaring the same name twice keeps the latest.
    pub fn field(mut self, key: impl Into<String>, field: impl Into<MetaField>) -> Self {
        let key = key.into();
        let field = field.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((key, field)),
        }
        self
    }

    pub fn title(self, title: impl Into<MetaField>) -> Self {
        self.field("title", title)
    }

    pub fn title_template(self, template: impl Into<MetaField>) -> Self {
        self.field("titleTemplate", template)
    }

    pub fn signal(self, key: impl Into<String>, signal: Signal<Value>) -> Self {
        self.field(key, MetaField::Signal(signal))
    }

    pub fn computed(
        self,
        key: impl Into<String>,
        f: impl Fn(&Scope) -> Result<Value> + 'static,
    ) -> Self {
        self.field(key, MetaField::computed(f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaField)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }
}

// =============================================================================
// MetaDeclaration
// =============================================================================

/// A component's meta info declaration.
#[derive(Clone)]
pub enum MetaDeclaration {
    Fields(MetaFields),
    Computed(ComputedMeta),
}

impl MetaDeclaration {
    /// Declare the whole meta object as a function of the scope.
    pub fn from_fn(f: impl Fn(&Scope) -> Result<MetaInfo> + 'static) -> Self {
        MetaDeclaration::Computed(Rc::new(f))
    }

    /// Resolve every field against `scope`.
    ///
    /// Failures are wrapped with the component id and the failing field name.
    pub fn resolve(&self, scope: &Scope, component_id: &str) -> Result<MetaInfo> {
        match self {
            MetaDeclaration::Fields(fields) => {
                let mut info = MetaInfo::new();
                for (key, field) in fields.iter() {
                    let value = field
                        .resolve(scope)
                        .map_err(|e| resolve_error(component_id, key, e))?;
                    info.insert(key, value);
                }
                Ok(info)
            }
            MetaDeclaration::Computed(f) => {
                f(scope).map_err(|e| resolve_error(component_id, WHOLE_DECLARATION, e))
            }
        }
    }
}

fn resolve_error(component: &str, field: &str, source: MetaError) -> MetaError {
    MetaError::Resolve {
        component: component.to_string(),
        field: field.to_string(),
        source: Box::new(source),
    }
}

impl Default for MetaDeclaration {
    fn default() -> Self {
        MetaDeclaration::Fields(MetaFields::default())
    }
}

impl From<MetaFields> for MetaDeclaration {
    fn from(fields: MetaFields) -> Self {
        MetaDeclaration::Fields(fields)
    }
}

impl From<MetaInfo> for MetaDeclaration {
    fn from(info: MetaInfo) -> Self {
        let fields = info
            .into_iter()
            .fold(MetaFields::new(), |fields, (k, v)| fields.field(k, v));
        MetaDeclaration::Fields(fields)
    }
}

impl fmt::Debug for MetaDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaDeclaration::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            MetaDeclaration::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
