use chrono::Utc;
use tracing::{debug, warn};

use super::catalog::Tutorial;
use super::progress::{LearningProgress, TutorialProgress};
use crate::storage::{read_json, write_json, KeyValueStore, LEARNING_PROGRESS_KEY};

/// What [`ProgressTracker::record_step`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tutorial was never started; nothing changed.
    NotStarted,
    /// The step had already been recorded.
    AlreadyCompleted,
    StepCompleted,
    /// The step was the last outstanding one and the tutorial is now complete.
    TutorialCompleted,
}

/// Tutorial progress persisted under a single storage key.
///
/// Storage failures never escape: a failed read behaves like an empty
/// progress blob and a failed write is logged and dropped.
pub struct ProgressTracker<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> LearningProgress {
        match read_json::<LearningProgress, _>(&self.store, LEARNING_PROGRESS_KEY) {
            Ok(Some(progress)) => progress,
            Ok(None) => LearningProgress::default(),
            Err(e) => {
                warn!(error = %e, "failed to load learning progress");
                LearningProgress::default()
            }
        }
    }

    fn save(&self, progress: &LearningProgress) {
        if let Err(e) = write_json(&self.store, LEARNING_PROGRESS_KEY, progress) {
            warn!(error = %e, "failed to save learning progress");
        }
    }

    /// Load, apply `f` to the tutorial's record if it exists, and persist when
    /// `f` reports a change.
    fn update<R>(
        &self,
        tutorial_id: &str,
        f: impl FnOnce(&mut TutorialProgress, &mut Vec<String>) -> Option<R>,
    ) -> Option<R> {
        let mut progress = self.load();
        let LearningProgress {
            in_progress_tutorials,
            completed_tutorials,
            ..
        } = &mut progress;
        let record = in_progress_tutorials.get_mut(tutorial_id)?;
        let result = f(record, completed_tutorials)?;
        progress.last_activity_at = Utc::now();
        self.save(&progress);
        Some(result)
    }

    // -- State transitions ---------------------------------------------------

    /// Begin a tutorial, or just touch `last_accessed_at` if it already has a
    /// record. Completed tutorials stay completed.
    pub fn start(&self, tutorial_id: &str) {
        let mut progress = self.load();
        let now = Utc::now();
        progress
            .in_progress_tutorials
            .entry(tutorial_id.to_string())
            .and_modify(|p| p.last_accessed_at = now)
            .or_insert_with(|| TutorialProgress::new(tutorial_id));
        progress.last_activity_at = now;
        self.save(&progress);
        debug!(tutorial = tutorial_id, "tutorial started");
    }

    /// Overwrite the current step index. The index is not checked against
    /// the tutorial's length.
    pub fn set_current_step(&self, tutorial_id: &str, index: usize) {
        self.update(tutorial_id, |record, _| {
            record.current_step_index = index;
            record.last_accessed_at = Utc::now();
            Some(())
        });
    }

    /// Record `step_id` as completed. Returns `false` when the tutorial was
    /// never started or the step was already recorded.
    pub fn complete_step(&self, tutorial_id: &str, step_id: &str) -> bool {
        self.update(tutorial_id, |record, _| {
            if record.has_completed_step(step_id) {
                return None;
            }
            record.completed_steps.push(step_id.to_string());
            record.last_accessed_at = Utc::now();
            Some(())
        })
        .is_some()
    }

    /// Mark the tutorial completed. Returns `false` when it was never started.
    pub fn complete_tutorial(&self, tutorial_id: &str) -> bool {
        let done = self
            .update(tutorial_id, |record, completed| {
                let now = Utc::now();
                record.completed = true;
                record.completed_at = Some(now);
                record.last_accessed_at = now;
                if !completed.iter().any(|id| id == tutorial_id) {
                    completed.push(tutorial_id.to_string());
                }
                Some(())
            })
            .is_some();
        if done {
            debug!(tutorial = tutorial_id, "tutorial completed");
        }
        done
    }

    /// Complete a step of `tutorial` and, once every step is recorded,
    /// complete the tutorial itself.
    pub fn record_step(&self, tutorial: &Tutorial, step_id: &str) -> StepOutcome {
        let Some(record) = self.progress_for(tutorial.id) else {
            return StepOutcome::NotStarted;
        };
        if record.has_completed_step(step_id) {
            return StepOutcome::AlreadyCompleted;
        }
        self.complete_step(tutorial.id, step_id);
        if record.completed {
            return StepOutcome::StepCompleted;
        }
        if record.completed_steps.len() + 1 >= tutorial.steps.len() {
            self.complete_tutorial(tutorial.id);
            StepOutcome::TutorialCompleted
        } else {
            StepOutcome::StepCompleted
        }
    }

    /// Move to the next step, staying on the last one. Returns the new index.
    pub fn next_step(&self, tutorial: &Tutorial) -> Option<usize> {
        let current = self.progress_for(tutorial.id)?.current_step_index;
        let last = tutorial.steps.len().saturating_sub(1);
        let next = (current + 1).min(last);
        self.set_current_step(tutorial.id, next);
        Some(next)
    }

    /// Move to the previous step, staying on the first one. Returns the new index.
    ///
    /// A stored index past the end is clamped to the last step first.
    pub fn previous_step(&self, tutorial: &Tutorial) -> Option<usize> {
        let current = self.progress_for(tutorial.id)?.current_step_index;
        let last = tutorial.steps.len().saturating_sub(1);
        let prev = current.min(last).saturating_sub(1);
        self.set_current_step(tutorial.id, prev);
        Some(prev)
    }

    // -- Queries -------------------------------------------------------------

    pub fn progress_for(&self, tutorial_id: &str) -> Option<TutorialProgress> {
        self.load().in_progress_tutorials.remove(tutorial_id)
    }

    pub fn overall_progress(&self) -> LearningProgress {
        self.load()
    }

    /// 0 when never started, 100 once completed, otherwise the rounded
    /// share of completed steps.
    pub fn completion_percentage(&self, tutorial: &Tutorial) -> u8 {
        match self.progress_for(tutorial.id) {
            None => 0,
            Some(p) if p.completed => 100,
            Some(p) => percentage(p.completed_steps.len(), tutorial.steps.len()),
        }
    }

    // -- Bulk ----------------------------------------------------------------

    /// Wipe all progress. Irreversible.
    pub fn reset_all(&self) {
        if let Err(e) = self.store.remove(LEARNING_PROGRESS_KEY) {
            warn!(error = %e, "failed to clear learning progress");
        }
    }

    /// Pretty-printed snapshot of all progress.
    pub fn export_all(&self) -> String {
        serde_json::to_string_pretty(&self.load()).unwrap_or_else(|e| {
            warn!(error = %e, "failed to export learning progress");
            "{}".to_string()
        })
    }

    /// Replace all progress with `data`. Only JSON syntax is checked; on a
    /// parse error nothing is written and `false` is returned.
    pub fn import_all(&self, data: &str) -> bool {
        let parsed: serde_json::Value = match serde_json::from_str(data) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to import learning progress");
                return false;
            }
        };
        match write_json(&self.store, LEARNING_PROGRESS_KEY, &parsed) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save imported learning progress");
                false
            }
        }
    }
}

/// `round(100 * done / total)` in integer arithmetic, half rounding up,
/// capped at 100.
fn percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * done + total) / (2 * total);
    rounded.min(100) as u8
}
