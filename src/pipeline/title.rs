//! Title template resolution.

use serde_json::Value;
use tracing::warn;

use crate::config::MetaConfig;
use crate::error::{MetaError, Result};
use crate::types::{MetaInfo, display_text, is_truthy};

/// Rewrite the title through the title template, if one is set.
///
/// Only the first placeholder is replaced. A falsy template is ignored; a
/// truthy non-string template is an error. With no title to insert, the
/// configured `missing_title` text goes in its place.
pub fn apply_title_template(info: &mut MetaInfo, config: &MetaConfig) -> Result<()> {
    let template = match info.get(&config.template_key) {
        Some(Value::String(t)) if !t.is_empty() => t.clone(),
        Some(other) if is_truthy(other) => {
            return Err(MetaError::InvalidTemplate(other.to_string()));
        }
        _ => return Ok(()),
    };

    let title = match info.get(&config.title_key) {
        Some(value) => display_text(value),
        None => {
            warn!(
                template = %template,
                "title template set without a title, substituting `{}`",
                config.missing_title
            );
            config.missing_title.clone()
        }
    };

    let resolved = template.replacen(&config.placeholder, &title, 1);
    info.insert(config.title_key.clone(), resolved);
    Ok(())
}

/// The title to write, or None when it is missing or falsy.
pub fn resolved_title(info: &MetaInfo, config: &MetaConfig) -> Option<String> {
    info.get(&config.title_key)
        .filter(|value| is_truthy(value))
        .map(display_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(pairs: &[(&str, Value)]) -> MetaInfo {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    #[test]
    fn test_template_wraps_title() {
        let mut meta = info(&[("title", json!("Home")), ("titleTemplate", json!("%s — Site"))]);
        apply_title_template(&mut meta, &MetaConfig::default()).unwrap();
        assert_eq!(meta.get_str("title"), Some("Home — Site"));
    }

    #[test]
    fn test_only_first_placeholder_replaced() {
        let mut meta = info(&[("title", json!("Home")), ("titleTemplate", json!("%s | %s"))]);
        apply_title_template(&mut meta, &MetaConfig::default()).unwrap();
        assert_eq!(meta.get_str("title"), Some("Home | %s"));
    }

    #[test]
    fn test_no_template_leaves_title() {
        let mut meta = info(&[("title", json!("Home"))]);
        apply_title_template(&mut meta, &MetaConfig::default()).unwrap();
        assert_eq!(meta.get_str("title"), Some("Home"));

        let mut meta = info(&[("title", json!("Home")), ("titleTemplate", json!(""))]);
        apply_title_template(&mut meta, &MetaConfig::default()).unwrap();
        assert_eq!(meta.get_str("title"), Some("Home"));
    }

    #[test]
    fn test_missing_title_substitutes_placeholder_text() {
        let mut meta = info(&[("titleTemplate", json!("%s | App"))]);
        apply_title_template(&mut meta, &MetaConfig::default()).unwrap();
        assert_eq!(meta.get_str("title"), Some("undefined | App"));

        let mut meta = info(&[("titleTemplate", json!("%s | App"))]);
        let config = MetaConfig::default().with_missing_title("Untitled");
        apply_title_template(&mut meta, &config).unwrap();
        assert_eq!(meta.get_str("title"), Some("Untitled | App"));
    }

    #[test]
    fn test_non_string_template_rejected() {
        let mut meta = info(&[("title", json!("Home")), ("titleTemplate", json!(5))]);
        let err = apply_title_template(&mut meta, &MetaConfig::default()).unwrap_err();
        assert!(matches!(err, MetaError::InvalidTemplate(found) if found == "5"));
    }

    #[test]
    fn test_custom_keys_and_placeholder() {
        let config = MetaConfig::default()
            .with_title_key("name")
            .with_template_key("nameTemplate")
            .with_placeholder("{}");
        let mut meta = info(&[("name", json!("Docs")), ("nameTemplate", json!("{} · Wiki"))]);

        apply_title_template(&mut meta, &config).unwrap();
        assert_eq!(resolved_title(&meta, &config).as_deref(), Some("Docs · Wiki"));
    }

    #[test]
    fn test_resolved_title_skips_falsy() {
        let config = MetaConfig::default();
        assert_eq!(resolved_title(&info(&[("title", json!(""))]), &config), None);
        assert_eq!(resolved_title(&info(&[("title", Value::Null)]), &config), None);
        assert_eq!(resolved_title(&MetaInfo::new(), &config), None);
        assert_eq!(
            resolved_title(&info(&[("title", json!(404))]), &config).as_deref(),
            Some("404")
        );
    }
}
