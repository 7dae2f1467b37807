use es_core::environment::{
    config_for, environment_comparison, resolve_environment_from, EnvironmentName, Feature,
    FeatureFlags,
};

fn flags(
    debug_panel: bool,
    analytics: bool,
    supabase: bool,
    dashboard: bool,
    performance_metrics: bool,
    advanced_metrics: bool,
) -> FeatureFlags {
    FeatureFlags {
        debug_panel,
        analytics,
        supabase,
        dashboard,
        performance_metrics,
        advanced_metrics,
    }
}

// ===========================================================================
// Flag table
// ===========================================================================

#[test]
fn local_flags() {
    assert_eq!(
        config_for(EnvironmentName::Local).features,
        flags(true, false, false, true, true, false)
    );
}

#[test]
fn dev_flags() {
    assert_eq!(
        config_for(EnvironmentName::Dev).features,
        flags(true, false, false, true, true, true)
    );
}

#[test]
fn test_flags() {
    assert_eq!(
        config_for(EnvironmentName::Test).features,
        flags(true, false, false, true, true, true)
    );
}

#[test]
fn prod_flags() {
    assert_eq!(
        config_for(EnvironmentName::Prod).features,
        flags(false, true, true, true, true, false)
    );
}

#[test]
fn display_names_and_banners() {
    let expected = [
        (EnvironmentName::Local, "LOCAL", "blue"),
        (EnvironmentName::Dev, "DEVELOPMENT", "green"),
        (EnvironmentName::Test, "TEST", "yellow"),
        (EnvironmentName::Prod, "PRODUCTION", "red"),
    ];
    for (env, name, colour) in expected {
        let cfg = config_for(env);
        assert_eq!(cfg.display_name, name);
        assert_eq!(cfg.banner.color, format!("text-{colour}-800"));
        assert_eq!(cfg.banner.background, format!("bg-{colour}-100"));
        assert_eq!(cfg.banner.border_color, format!("border-{colour}-300"));
    }
}

// ===========================================================================
// Resolution
// ===========================================================================

#[test]
fn unset_resolves_to_local() {
    let env = resolve_environment_from(None);
    assert_eq!(env, EnvironmentName::Local);
    let cfg = config_for(env);
    assert_eq!(cfg.display_name, "LOCAL");
    assert!(cfg.features.debug_panel);
    assert!(!cfg.features.analytics);
}

#[test]
fn invalid_values_resolve_to_local() {
    for raw in ["", "production", "PROD", "staging", "local ", "dev\n"] {
        assert_eq!(resolve_environment_from(Some(raw)), EnvironmentName::Local, "{raw:?}");
    }
}

#[test]
fn valid_values_pass_through() {
    for env in EnvironmentName::ALL {
        assert_eq!(resolve_environment_from(Some(env.as_str())), env);
    }
}

#[test]
fn prod_scenario() {
    let features = config_for(resolve_environment_from(Some("prod"))).features;
    assert!(!features.debug_panel);
    assert!(features.analytics);
    assert!(features.supabase);
}

// ===========================================================================
// Comparison
// ===========================================================================

#[test]
fn comparison_covers_every_feature_and_environment() {
    let rows = environment_comparison();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[2].feature, Feature::Supabase);
    assert_eq!(rows[2].label, "Database");

    for row in &rows {
        for (env, value) in row.values {
            assert_eq!(config_for(env).features.is_enabled(row.feature), value);
        }
    }

    let advanced = rows
        .iter()
        .find(|r| r.feature == Feature::AdvancedMetrics)
        .unwrap();
    let on: Vec<_> = advanced
        .values
        .iter()
        .filter(|(_, v)| *v)
        .map(|(e, _)| *e)
        .collect();
    assert_eq!(on, vec![EnvironmentName::Dev, EnvironmentName::Test]);
}
