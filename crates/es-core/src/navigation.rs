use serde::{Deserialize, Serialize};

use crate::environment::{EnvironmentName, Feature, FeatureFlags};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationCategory {
    Core,
    Development,
    Analytics,
    Learning,
    Debug,
}

impl NavigationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationCategory::Core => "core",
            NavigationCategory::Development => "development",
            NavigationCategory::Analytics => "analytics",
            NavigationCategory::Learning => "learning",
            NavigationCategory::Debug => "debug",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        CATEGORIES
            .iter()
            .map(|c| c.id)
            .find(|c| c.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryConfig {
    pub id: NavigationCategory,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub order: u8,
}

static CATEGORIES: [CategoryConfig; 5] = [
    CategoryConfig {
        id: NavigationCategory::Core,
        label: "Core Features",
        icon: "🏠",
        description: "Essential application features",
        order: 1,
    },
    CategoryConfig {
        id: NavigationCategory::Development,
        label: "Development",
        icon: "🔧",
        description: "Development tools and utilities",
        order: 2,
    },
    CategoryConfig {
        id: NavigationCategory::Analytics,
        label: "Analytics",
        icon: "📊",
        description: "Performance and usage analytics",
        order: 3,
    },
    CategoryConfig {
        id: NavigationCategory::Learning,
        label: "Learning",
        icon: "📚",
        description: "Tutorials and educational content",
        order: 4,
    },
    CategoryConfig {
        id: NavigationCategory::Debug,
        label: "Debug Tools",
        icon: "🛠️",
        description: "Debugging and diagnostic tools",
        order: 5,
    },
];

/// Categories sorted by `order`. The sort is stable, so equal orders keep
/// declaration order.
pub fn categories() -> Vec<&'static CategoryConfig> {
    let mut sorted: Vec<&'static CategoryConfig> = CATEGORIES.iter().collect();
    sorted.sort_by_key(|c| c.order);
    sorted
}

fn category_config(category: NavigationCategory) -> &'static CategoryConfig {
    match category {
        NavigationCategory::Core => &CATEGORIES[0],
        NavigationCategory::Development => &CATEGORIES[1],
        NavigationCategory::Analytics => &CATEGORIES[2],
        NavigationCategory::Learning => &CATEGORIES[3],
        NavigationCategory::Debug => &CATEGORIES[4],
    }
}

pub fn category_icon(category: NavigationCategory) -> &'static str {
    category_config(category).icon
}

pub fn category_label(category: NavigationCategory) -> &'static str {
    category_config(category).label
}

pub fn category_description(category: NavigationCategory) -> &'static str {
    category_config(category).description
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// One entry of the feature catalog.
///
/// Visibility and enablement are declared as feature lists rather than
/// closures; an item is visible when every feature in `visible_when` is on
/// and enabled when every feature in `enabled_when` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
    pub category: NavigationCategory,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<&'static str>,
    pub visible_when: &'static [Feature],
    pub enabled_when: &'static [Feature],
}

impl NavigationItem {
    pub fn is_visible(&self, flags: &FeatureFlags) -> bool {
        flags.all_enabled(self.visible_when)
    }

    pub fn is_enabled(&self, flags: &FeatureFlags) -> bool {
        flags.all_enabled(self.enabled_when)
    }

    fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.as_str().contains(needle)
    }
}

static ITEMS: [NavigationItem; 10] = [
    NavigationItem {
        id: "journal",
        label: "Journal",
        icon: "📝",
        path: "/journal",
        category: NavigationCategory::Core,
        description: "Write and manage journal entries across environments",
        shortcut: Some("J"),
        visible_when: &[],
        enabled_when: &[],
    },
    NavigationItem {
        id: "dashboard",
        label: "Dashboard",
        icon: "📈",
        path: "/dashboard",
        category: NavigationCategory::Analytics,
        description: "Performance metrics and system overview",
        shortcut: Some("D"),
        visible_when: &[Feature::Dashboard],
        enabled_when: &[Feature::Dashboard],
    },
    NavigationItem {
        id: "learning-hub",
        label: "Learning Hub",
        icon: "🎓",
        path: "/learning",
        category: NavigationCategory::Learning,
        description: "Interactive tutorials and environment guides",
        shortcut: Some("L"),
        visible_when: &[],
        enabled_when: &[],
    },
    NavigationItem {
        id: "tutorials",
        label: "Tutorials",
        icon: "📖",
        path: "/learning/tutorials",
        category: NavigationCategory::Learning,
        description: "Step-by-step learning guides",
        shortcut: None,
        visible_when: &[],
        enabled_when: &[],
    },
    NavigationItem {
        id: "environment-comparison",
        label: "Environment Comparison",
        icon: "🔍",
        path: "/learning/comparison",
        category: NavigationCategory::Learning,
        description: "Compare features across different environments",
        shortcut: None,
        visible_when: &[],
        enabled_when: &[],
    },
    NavigationItem {
        id: "running-services",
        label: "Running Services",
        icon: "⚡",
        path: "/services",
        category: NavigationCategory::Development,
        description: "Monitor and manage running services",
        shortcut: None,
        visible_when: &[],
        enabled_when: &[],
    },
    NavigationItem {
        id: "performance-metrics",
        label: "Performance Metrics",
        icon: "📊",
        path: "/metrics",
        category: NavigationCategory::Analytics,
        description: "Detailed performance analytics and monitoring",
        shortcut: None,
        visible_when: &[Feature::PerformanceMetrics],
        enabled_when: &[Feature::PerformanceMetrics],
    },
    NavigationItem {
        id: "debug-panel",
        label: "Debug Panel",
        icon: "🐛",
        path: "/debug",
        category: NavigationCategory::Debug,
        description: "Development debugging tools and system information",
        shortcut: Some("Shift+D"),
        visible_when: &[Feature::DebugPanel],
        enabled_when: &[Feature::DebugPanel],
    },
    NavigationItem {
        id: "analytics",
        label: "Analytics",
        icon: "📈",
        path: "/analytics",
        category: NavigationCategory::Analytics,
        description: "User analytics and tracking dashboard",
        shortcut: None,
        visible_when: &[Feature::Analytics],
        enabled_when: &[Feature::Analytics],
    },
    NavigationItem {
        id: "database",
        label: "Database",
        icon: "🗄️",
        path: "/database",
        category: NavigationCategory::Development,
        description: "Database management and monitoring",
        shortcut: None,
        visible_when: &[Feature::Supabase],
        enabled_when: &[Feature::Supabase],
    },
];

/// The whole catalog in declaration order.
pub fn all_items() -> &'static [NavigationItem] {
    &ITEMS
}

pub fn item_by_id(id: &str) -> Option<&'static NavigationItem> {
    ITEMS.iter().find(|item| item.id == id)
}

pub fn visible_items(flags: &FeatureFlags) -> Vec<&'static NavigationItem> {
    ITEMS.iter().filter(|item| item.is_visible(flags)).collect()
}

pub fn items_by_category(
    category: NavigationCategory,
    flags: &FeatureFlags,
) -> Vec<&'static NavigationItem> {
    visible_items(flags)
        .into_iter()
        .filter(|item| item.category == category)
        .collect()
}

/// Case-insensitive substring search over label, description and category
/// of the visible items. A blank query returns every visible item.
pub fn search_items(query: &str, flags: &FeatureFlags) -> Vec<&'static NavigationItem> {
    if query.trim().is_empty() {
        return visible_items(flags);
    }
    let needle = query.to_lowercase();
    visible_items(flags)
        .into_iter()
        .filter(|item| item.matches(&needle))
        .collect()
}

// ---------------------------------------------------------------------------
// Feature status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureStatus {
    pub id: String,
    pub enabled: bool,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub environment: EnvironmentName,
}

pub fn feature_status(
    item_id: &str,
    flags: &FeatureFlags,
    environment: EnvironmentName,
) -> FeatureStatus {
    resolve_status(item_id, item_by_id(item_id), flags, environment)
}

fn resolve_status(
    item_id: &str,
    item: Option<&NavigationItem>,
    flags: &FeatureFlags,
    environment: EnvironmentName,
) -> FeatureStatus {
    let Some(item) = item else {
        return FeatureStatus {
            id: item_id.to_string(),
            enabled: false,
            available: false,
            reason: Some("Feature not found".to_string()),
            environment,
        };
    };

    let available = item.is_visible(flags);
    let enabled = item.is_enabled(flags);
    let reason = if !available {
        Some(format!("Feature not available in {environment} environment"))
    } else if !enabled {
        Some(format!("Feature disabled in {environment} environment"))
    } else {
        None
    };

    FeatureStatus {
        id: item_id.to_string(),
        enabled,
        available,
        reason,
        environment,
    }
}
