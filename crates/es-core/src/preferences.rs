use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{read_json, write_json, KeyValueStore, PREFERENCES_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreferredView {
    Grid,
    #[default]
    List,
}

/// Navigation preferences.
///
/// Every field falls back to its default when missing from the stored blob,
/// so blobs written by older builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationPreferences {
    pub sidebar_collapsed: bool,
    pub show_tooltips: bool,
    pub show_disabled_features: bool,
    pub preferred_view: PreferredView,
    pub completed_onboarding: bool,
}

impl Default for NavigationPreferences {
    fn default() -> Self {
        Self {
            sidebar_collapsed: false,
            show_tooltips: true,
            show_disabled_features: true,
            preferred_view: PreferredView::List,
            completed_onboarding: false,
        }
    }
}

/// A partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub sidebar_collapsed: Option<bool>,
    pub show_tooltips: Option<bool>,
    pub show_disabled_features: Option<bool>,
    pub preferred_view: Option<PreferredView>,
    pub completed_onboarding: Option<bool>,
}

impl NavigationPreferences {
    pub fn apply(&mut self, update: &PreferencesUpdate) {
        if let Some(v) = update.sidebar_collapsed {
            self.sidebar_collapsed = v;
        }
        if let Some(v) = update.show_tooltips {
            self.show_tooltips = v;
        }
        if let Some(v) = update.show_disabled_features {
            self.show_disabled_features = v;
        }
        if let Some(v) = update.preferred_view {
            self.preferred_view = v;
        }
        if let Some(v) = update.completed_onboarding {
            self.completed_onboarding = v;
        }
    }
}

/// Persists [`NavigationPreferences`] under a single key.
pub struct PreferencesStore<S> {
    store: S,
}

impl<S: KeyValueStore> PreferencesStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored preferences merged over the defaults. Unreadable blobs yield
    /// the defaults.
    pub fn load(&self) -> NavigationPreferences {
        match read_json::<NavigationPreferences, _>(&self.store, PREFERENCES_KEY) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => NavigationPreferences::default(),
            Err(e) => {
                warn!(error = %e, "failed to load navigation preferences");
                NavigationPreferences::default()
            }
        }
    }

    /// Merge `update` over the current preferences and persist the result.
    /// Write failures are logged, not returned.
    pub fn save(&self, update: &PreferencesUpdate) -> NavigationPreferences {
        let mut prefs = self.load();
        prefs.apply(update);
        if let Err(e) = write_json(&self.store, PREFERENCES_KEY, &prefs) {
            warn!(error = %e, "failed to save navigation preferences");
        }
        prefs
    }

    pub fn reset(&self) {
        if let Err(e) = self.store.remove(PREFERENCES_KEY) {
            warn!(error = %e, "failed to reset navigation preferences");
        }
    }
}
