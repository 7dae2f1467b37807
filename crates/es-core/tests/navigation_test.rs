use es_core::environment::{config_for, EnvironmentName, FeatureFlags};
use es_core::navigation::{
    all_items, categories, feature_status, items_by_category, search_items, visible_items,
    NavigationCategory, NavigationItem,
};

fn ids(items: &[&NavigationItem]) -> Vec<&'static str> {
    items.iter().map(|i| i.id).collect()
}

fn flags_for(env: EnvironmentName) -> FeatureFlags {
    config_for(env).features
}

/// Every combination of the six flags.
fn all_flag_sets() -> Vec<FeatureFlags> {
    (0u8..64)
        .map(|bits| FeatureFlags {
            debug_panel: bits & 1 != 0,
            analytics: bits & 2 != 0,
            supabase: bits & 4 != 0,
            dashboard: bits & 8 != 0,
            performance_metrics: bits & 16 != 0,
            advanced_metrics: bits & 32 != 0,
        })
        .collect()
}

// ===========================================================================
// Catalog
// ===========================================================================

#[test]
fn catalog_has_ten_items_in_declaration_order() {
    let ids: Vec<_> = all_items().iter().map(|i| i.id).collect();
    assert_eq!(
        ids,
        vec![
            "journal",
            "dashboard",
            "learning-hub",
            "tutorials",
            "environment-comparison",
            "running-services",
            "performance-metrics",
            "debug-panel",
            "analytics",
            "database",
        ]
    );
}

#[test]
fn categories_sorted_by_order() {
    let cats = categories();
    let orders: Vec<_> = cats.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    assert_eq!(cats[0].id, NavigationCategory::Core);
    assert_eq!(cats[4].id, NavigationCategory::Debug);
}

// ===========================================================================
// Visibility
// ===========================================================================

#[test]
fn visible_items_is_ordered_subset() {
    for flags in all_flag_sets() {
        let visible = visible_items(&flags);
        let expected: Vec<_> = all_items()
            .iter()
            .filter(|i| i.is_visible(&flags))
            .map(|i| i.id)
            .collect();
        assert_eq!(ids(&visible), expected);
    }
}

#[test]
fn prod_hides_debug_and_shows_database() {
    let visible = ids(&visible_items(&flags_for(EnvironmentName::Prod)));
    assert!(!visible.contains(&"debug-panel"));
    assert!(visible.contains(&"database"));
    assert!(visible.contains(&"analytics"));
}

#[test]
fn local_shows_debug_and_hides_database() {
    let visible = ids(&visible_items(&flags_for(EnvironmentName::Local)));
    assert!(visible.contains(&"debug-panel"));
    assert!(!visible.contains(&"database"));
    assert!(!visible.contains(&"analytics"));
    assert_eq!(visible.len(), 8);
}

#[test]
fn items_by_category_filters_visible() {
    let flags = flags_for(EnvironmentName::Local);
    let analytics = ids(&items_by_category(NavigationCategory::Analytics, &flags));
    assert_eq!(analytics, vec!["dashboard", "performance-metrics"]);

    let learning = ids(&items_by_category(NavigationCategory::Learning, &flags));
    assert_eq!(learning, vec!["learning-hub", "tutorials", "environment-comparison"]);

    let none = FeatureFlags::default();
    assert!(items_by_category(NavigationCategory::Debug, &none).is_empty());
}

// ===========================================================================
// Search
// ===========================================================================

#[test]
fn blank_search_equals_visible() {
    for flags in all_flag_sets() {
        assert_eq!(search_items("", &flags), visible_items(&flags));
        assert_eq!(search_items("   \t", &flags), visible_items(&flags));
    }
}

#[test]
fn search_is_subset_of_visible() {
    for flags in all_flag_sets() {
        let visible = ids(&visible_items(&flags));
        for q in ["a", "METRIC", "learn", "debug", "zzz"] {
            for id in ids(&search_items(q, &flags)) {
                assert!(visible.contains(&id), "{q} -> {id}");
            }
        }
    }
}

#[test]
fn search_matches_label_description_and_category() {
    let flags = flags_for(EnvironmentName::Dev);
    assert_eq!(ids(&search_items("JOURNAL", &flags)), vec!["journal"]);
    // description only
    assert_eq!(ids(&search_items("step-by-step", &flags)), vec!["tutorials"]);
    // category name or description
    assert_eq!(
        ids(&search_items("development", &flags)),
        vec!["running-services", "debug-panel"]
    );
    assert!(search_items("nothing matches this", &flags).is_empty());
}

#[test]
fn search_never_returns_hidden_items() {
    let flags = flags_for(EnvironmentName::Local);
    assert!(search_items("database", &flags)
        .iter()
        .all(|i| i.id != "database"));
}

// ===========================================================================
// Feature status
// ===========================================================================

#[test]
fn unknown_feature_is_not_found() {
    let status = feature_status("teleporter", &FeatureFlags::default(), EnvironmentName::Dev);
    assert!(!status.available);
    assert!(!status.enabled);
    assert_eq!(status.reason.as_deref(), Some("Feature not found"));
    assert_eq!(status.id, "teleporter");
}

#[test]
fn hidden_feature_reports_unavailable() {
    let env = EnvironmentName::Prod;
    let status = feature_status("debug-panel", &flags_for(env), env);
    assert!(!status.available);
    assert!(!status.enabled);
    assert_eq!(
        status.reason.as_deref(),
        Some("Feature not available in prod environment")
    );
}

#[test]
fn visible_feature_has_no_reason() {
    let env = EnvironmentName::Prod;
    let status = feature_status("database", &flags_for(env), env);
    assert!(status.available);
    assert!(status.enabled);
    assert!(status.reason.is_none());
    assert_eq!(status.environment, EnvironmentName::Prod);
}
