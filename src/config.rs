//! Meta manager configuration.
//!
//! Field names and the template placeholder are configurable so that trees
//! which already use `title` for something else can opt into other keys.
//!
//! ```ignore
//! let config = MetaConfig::default().with_placeholder("{}");
//! let config: MetaConfig = serde_json::from_str(r#"{ "titleKey": "name" }"#)?;
//! ```

use serde::{Deserialize, Serialize};

/// Keys and placeholder used when resolving the title.
///
/// Missing fields in serialized form fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaConfig {
    /// Field written to the title sink.
    pub title_key: String,
    /// Field holding the title template.
    pub template_key: String,
    /// Token in the template replaced by the title (first occurrence only).
    pub placeholder: String,
    /// Text substituted into the template when no title was declared.
    pub missing_title: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            title_key: "title".to_string(),
            template_key: "titleTemplate".to_string(),
            placeholder: "%s".to_string(),
            missing_title: "undefined".to_string(),
        }
    }
}

impl MetaConfig {
    /// Use another field as the title.
    pub fn with_title_key(mut self, key: impl Into<String>) -> Self {
        self.title_key = key.into();
        self
    }

    /// Use another field as the title template.
    pub fn with_template_key(mut self, key: impl Into<String>) -> Self {
        self.template_key = key.into();
        self
    }

    /// Change the token replaced in the template.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Change the text inserted when no title was declared.
    pub fn with_missing_title(mut self, text: impl Into<String>) -> Self {
        self.missing_title = text.into();
        self
    }
}
