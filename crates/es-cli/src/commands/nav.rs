use es_core::environment::FeatureFlags;
use es_core::navigation::{all_items, categories, feature_status, search_items, NavigationItem};
use serde_json::json;

use super::{print_json, Context};

fn item_line(item: &NavigationItem, flags: &FeatureFlags) -> String {
    let mut line = format!("{} {:<24} {}", item.icon, item.label, item.path);
    if let Some(shortcut) = item.shortcut {
        line.push_str(&format!("  [{shortcut}]"));
    }
    if !item.is_visible(flags) {
        line.push_str("  (unavailable)");
    } else if !item.is_enabled(flags) {
        line.push_str("  (disabled)");
    }
    line
}

/// Print items grouped by category.
///
/// Disabled items are shown only when the `show_disabled_features`
/// preference is on. `all` also lists items hidden in this environment.
pub fn list(ctx: &Context, all: bool, json_output: bool) -> anyhow::Result<()> {
    let flags = ctx.flags();
    let prefs = ctx.preferences().load();
    let keep = |item: &NavigationItem| {
        all || (item.is_visible(&flags)
            && (prefs.show_disabled_features || item.is_enabled(&flags)))
    };

    if json_output {
        let items: Vec<_> = all_items()
            .iter()
            .filter(|item| keep(item))
            .map(|item| {
                json!({
                    "item": item,
                    "visible": item.is_visible(&flags),
                    "enabled": item.is_enabled(&flags),
                })
            })
            .collect();
        return print_json(&items);
    }

    for category in categories() {
        let items: Vec<_> = all_items()
            .iter()
            .filter(|item| item.category == category.id && keep(item))
            .collect();
        if items.is_empty() {
            continue;
        }
        println!("{} {}", category.icon, category.label);
        for item in items {
            println!("  {}", item_line(item, &flags));
            if prefs.show_tooltips {
                println!("      {}", item.description);
            }
        }
    }
    Ok(())
}

fn category_rows() -> Vec<String> {
    categories()
        .into_iter()
        .map(|c| format!("{} {:<12} {}", c.icon, c.label, c.description))
        .collect()
}

/// Print categories in display order.
pub fn list_categories() {
    for row in category_rows() {
        println!("{row}");
    }
}

pub fn search(ctx: &Context, query: &str, json_output: bool) -> anyhow::Result<()> {
    let flags = ctx.flags();
    let results = search_items(query, &flags);
    if json_output {
        return print_json(&results);
    }
    if results.is_empty() {
        println!("No features match {query:?} in {}", ctx.environment);
        return Ok(());
    }
    for item in results {
        println!("{}", item_line(item, &flags));
    }
    Ok(())
}

/// Print the availability of one item; unknown ids are reported, not errors.
pub fn status(ctx: &Context, id: &str, json_output: bool) -> anyhow::Result<()> {
    let status = feature_status(id, &ctx.flags(), ctx.environment);
    if json_output {
        return print_json(&status);
    }
    let state = match (status.available, status.enabled) {
        (true, true) => "available",
        (true, false) => "disabled",
        _ => "unavailable",
    };
    println!("{id}: {state} in {}", status.environment);
    if let Some(reason) = &status.reason {
        println!("  {reason}");
    }
    Ok(())
}
