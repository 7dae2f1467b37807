//! Interactive tutorials: the static catalog and per-tutorial progress.
//!
//! Progress for every tutorial lives in one [`LearningProgress`] blob which
//! is read, modified and written back on every mutating call. Each tutorial
//! moves `not started -> in progress -> completed`; completion is always an
//! explicit call, never inferred from the step count.

mod catalog;
mod progress;
mod tracker;

pub use catalog::{
    all_tutorials, tutorial_by_id, tutorials_by_category, tutorials_by_difficulty, Command,
    StepType, Tutorial, TutorialCategory, TutorialDifficulty, TutorialStep, ValidationKind,
    ValidationRule,
};
pub use progress::{LearningProgress, TutorialProgress};
pub use tracker::{ProgressTracker, StepOutcome};
