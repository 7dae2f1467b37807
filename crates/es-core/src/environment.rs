//! Build-time environment selection and the static per-environment
//! configuration table.
//!
//! The environment is chosen once from the `APP_ENV` variable. Anything
//! other than one of the four known names falls back to [`EnvironmentName::Local`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Variable holding the environment name.
pub const ENV_VAR: &str = "APP_ENV";
/// Variable holding the product display name.
pub const APP_NAME_VAR: &str = "APP_NAME";
/// Display name used when `APP_NAME` is unset.
pub const DEFAULT_APP_NAME: &str = "Env Stamp";

// ---------------------------------------------------------------------------
// EnvironmentName
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentName {
    #[default]
    Local,
    Dev,
    Test,
    Prod,
}

impl EnvironmentName {
    pub const ALL: [EnvironmentName; 4] = [
        EnvironmentName::Local,
        EnvironmentName::Dev,
        EnvironmentName::Test,
        EnvironmentName::Prod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentName::Local => "local",
            EnvironmentName::Dev => "dev",
            EnvironmentName::Test => "test",
            EnvironmentName::Prod => "prod",
        }
    }

    /// Exact, case-sensitive match against the four known names.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.as_str() == raw)
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Feature flags
// ---------------------------------------------------------------------------

/// One named boolean in [`FeatureFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    DebugPanel,
    Analytics,
    Supabase,
    Dashboard,
    PerformanceMetrics,
    AdvancedMetrics,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::DebugPanel,
        Feature::Analytics,
        Feature::Supabase,
        Feature::Dashboard,
        Feature::PerformanceMetrics,
        Feature::AdvancedMetrics,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::DebugPanel => "Debug Panel",
            Feature::Analytics => "Analytics",
            Feature::Supabase => "Database",
            Feature::Dashboard => "Dashboard",
            Feature::PerformanceMetrics => "Performance Metrics",
            Feature::AdvancedMetrics => "Advanced Metrics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub debug_panel: bool,
    pub analytics: bool,
    pub supabase: bool,
    pub dashboard: bool,
    pub performance_metrics: bool,
    pub advanced_metrics: bool,
}

impl FeatureFlags {
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::DebugPanel => self.debug_panel,
            Feature::Analytics => self.analytics,
            Feature::Supabase => self.supabase,
            Feature::Dashboard => self.dashboard,
            Feature::PerformanceMetrics => self.performance_metrics,
            Feature::AdvancedMetrics => self.advanced_metrics,
        }
    }

    /// `true` when every listed feature is on. An empty list is always satisfied.
    pub fn all_enabled(&self, required: &[Feature]) -> bool {
        required.iter().all(|f| self.is_enabled(*f))
    }
}

// ---------------------------------------------------------------------------
// EnvironmentConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerStyle {
    pub color: &'static str,
    pub background: &'static str,
    pub border_color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub name: EnvironmentName,
    pub display_name: &'static str,
    pub banner: BannerStyle,
    pub features: FeatureFlags,
}

static CONFIGS: [EnvironmentConfig; 4] = [
    EnvironmentConfig {
        name: EnvironmentName::Local,
        display_name: "LOCAL",
        banner: BannerStyle {
            color: "text-blue-800",
            background: "bg-blue-100",
            border_color: "border-blue-300",
        },
        features: FeatureFlags {
            debug_panel: true,
            analytics: false,
            supabase: false,
            dashboard: true,
            performance_metrics: true,
            advanced_metrics: false,
        },
    },
    EnvironmentConfig {
        name: EnvironmentName::Dev,
        display_name: "DEVELOPMENT",
        banner: BannerStyle {
            color: "text-green-800",
            background: "bg-green-100",
            border_color: "border-green-300",
        },
        features: FeatureFlags {
            debug_panel: true,
            analytics: false,
            supabase: false,
            dashboard: true,
            performance_metrics: true,
            advanced_metrics: true,
        },
    },
    EnvironmentConfig {
        name: EnvironmentName::Test,
        display_name: "TEST",
        banner: BannerStyle {
            color: "text-yellow-800",
            background: "bg-yellow-100",
            border_color: "border-yellow-300",
        },
        features: FeatureFlags {
            debug_panel: true,
            analytics: false,
            supabase: false,
            dashboard: true,
            performance_metrics: true,
            advanced_metrics: true,
        },
    },
    EnvironmentConfig {
        name: EnvironmentName::Prod,
        display_name: "PRODUCTION",
        banner: BannerStyle {
            color: "text-red-800",
            background: "bg-red-100",
            border_color: "border-red-300",
        },
        features: FeatureFlags {
            debug_panel: false,
            analytics: true,
            supabase: true,
            dashboard: true,
            performance_metrics: true,
            advanced_metrics: false,
        },
    },
];

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Normalise a raw environment value. Unknown or missing values become `local`.
pub fn resolve_environment_from(raw: Option<&str>) -> EnvironmentName {
    raw.and_then(EnvironmentName::parse).unwrap_or_default()
}

/// Read `APP_ENV` and normalise it.
pub fn resolve_environment() -> EnvironmentName {
    let raw = std::env::var(ENV_VAR).ok();
    let env = resolve_environment_from(raw.as_deref());
    if let Some(raw) = raw.as_deref() {
        if env.as_str() != raw {
            tracing::debug!(value = raw, "unrecognised environment, using local");
        }
    }
    env
}

pub fn config_for(name: EnvironmentName) -> &'static EnvironmentConfig {
    match name {
        EnvironmentName::Local => &CONFIGS[0],
        EnvironmentName::Dev => &CONFIGS[1],
        EnvironmentName::Test => &CONFIGS[2],
        EnvironmentName::Prod => &CONFIGS[3],
    }
}

pub fn current_config() -> &'static EnvironmentConfig {
    config_for(resolve_environment())
}

pub fn feature_flags() -> FeatureFlags {
    current_config().features
}

/// Display name from `APP_NAME`, or the product default when unset or blank.
pub fn app_display_name() -> String {
    app_display_name_from(std::env::var(APP_NAME_VAR).ok().as_deref())
}

pub fn app_display_name_from(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_APP_NAME.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// One feature's value across every environment, in [`EnvironmentName::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureComparison {
    pub feature: Feature,
    pub label: &'static str,
    pub values: [(EnvironmentName, bool); 4],
}

pub fn environment_comparison() -> Vec<FeatureComparison> {
    Feature::ALL
        .iter()
        .map(|&feature| FeatureComparison {
            feature,
            label: feature.label(),
            values: EnvironmentName::ALL
                .map(|env| (env, config_for(env).features.is_enabled(feature))),
        })
        .collect()
}
