//! Title Example - Meta info driving the terminal title
//!
//! This example demonstrates:
//! - Installing the meta plugin with the terminal as title sink
//! - A root title template and a child page title
//! - A computed title reading component state, refreshed by hand
//!
//! Run with: cargo run --example title

use serde_json::Value;
use spark_meta::{Component, ComponentTree, MetaFields, MetaPlugin, TerminalTitle};

fn main() -> spark_meta::Result<()> {
    println!("=== spark-meta Title Example ===\n");

    let plugin = MetaPlugin::new(TerminalTitle::stdout());
    let meta = plugin.manager();

    let mut tree = ComponentTree::new();
    tree.use_plugin(plugin)?;

    // Root declares the template
    let app = tree.mount(
        None,
        Component::new()
            .with_id("app")
            .with_meta(MetaFields::new().title("Home").title_template("%s | spark-meta")),
    )?;
    println!("After app mount:   {:?}", meta.current_title());

    // Child page overrides the title from its own state
    let inbox = tree.mount(
        Some(app),
        Component::new().with_id("inbox").with_meta(MetaFields::new().computed(
            "title",
            |scope| {
                let unread = scope.state("unread").and_then(|v| v.as_u64()).unwrap_or(0);
                Ok(Value::String(format!("Inbox ({unread})")))
            },
        )),
    )?;
    println!("After inbox mount: {:?}", meta.current_title());

    if let Some(scope) = tree.scope_mut(inbox) {
        scope.set_state("unread", 3);
    }
    meta.update_meta_info(&tree)?;
    println!("After new mail:    {:?}", meta.current_title());

    println!("\nMerged meta info:");
    let info = meta.get_meta_info(&tree)?;
    for (key, value) in info.iter() {
        println!("  {key}: {value}");
    }

    Ok(())
}
