use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress through a single tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialProgress {
    pub tutorial_id: String,
    pub current_step_index: usize,
    /// Completed step ids in completion order, never duplicated.
    #[serde(default)]
    pub completed_steps: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TutorialProgress {
    pub fn new(tutorial_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            tutorial_id: tutorial_id.into(),
            current_step_index: 0,
            completed_steps: Vec::new(),
            started_at: now,
            last_accessed_at: now,
            completed: false,
            completed_at: None,
        }
    }

    pub fn has_completed_step(&self, step_id: &str) -> bool {
        self.completed_steps.iter().any(|s| s == step_id)
    }
}

/// Everything the tracker persists.
///
/// `completed_tutorials` holds exactly the ids whose progress record has
/// `completed == true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningProgress {
    pub completed_tutorials: Vec<String>,
    pub in_progress_tutorials: HashMap<String, TutorialProgress>,
    /// Reserved; nothing accumulates into it yet.
    pub total_time_spent: u64,
    /// Reserved; no badges are awarded yet.
    pub achieved_badges: Vec<String>,
    pub last_activity_at: DateTime<Utc>,
}

impl Default for LearningProgress {
    fn default() -> Self {
        Self {
            completed_tutorials: Vec::new(),
            in_progress_tutorials: HashMap::new(),
            total_time_spent: 0,
            achieved_badges: Vec::new(),
            last_activity_at: Utc::now(),
        }
    }
}

impl LearningProgress {
    pub fn is_completed(&self, tutorial_id: &str) -> bool {
        self.completed_tutorials.iter().any(|id| id == tutorial_id)
    }

    /// Ids of tutorials started but not yet completed, sorted.
    pub fn active_tutorials(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .in_progress_tutorials
            .values()
            .filter(|p| !p.completed)
            .map(|p| p.tutorial_id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}
