use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::environment::EnvironmentName;
use crate::storage::{read_json, write_json, KeyValueStore, StorageError, JOURNAL_KEY};

/// Longest accepted entry, counted in characters.
pub const MAX_ENTRY_LENGTH: usize = 2000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An immutable journal entry stamped with the environment it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub environment: EnvironmentName,
}

impl JournalEntry {
    pub fn new(content: impl Into<String>, environment: EnvironmentName) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            timestamp: Utc::now(),
            environment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub entry_count: usize,
    /// Size in bytes of the serialized entry list.
    pub total_size: usize,
    pub is_available: bool,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("Please enter some content")]
    EmptyContent,
    #[error("Entry too long. Maximum {max} characters allowed.")]
    ContentTooLong { len: usize, max: usize },
    #[error("Failed to save journal entry")]
    Save(#[source] StorageError),
    #[error("Failed to delete journal entry")]
    Delete(#[source] StorageError),
    #[error("Failed to clear journal entries")]
    Clear(#[source] StorageError),
    #[error("Failed to export journal entries")]
    Export(#[source] serde_json::Error),
}

/// Check `content` against the length bound and return it trimmed.
///
/// The bound applies to the text as submitted, surrounding whitespace included.
pub fn validate_content(content: &str) -> Result<&str, JournalError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(JournalError::EmptyContent);
    }
    let len = content.chars().count();
    if len > MAX_ENTRY_LENGTH {
        return Err(JournalError::ContentTooLong {
            len,
            max: MAX_ENTRY_LENGTH,
        });
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// JournalStore
// ---------------------------------------------------------------------------

/// Journal entries kept newest-first under one storage key.
///
/// Reads never fail: an unreadable list is logged and treated as empty.
/// Writes surface [`JournalError`].
pub struct JournalStore<S> {
    store: S,
}

impl<S: KeyValueStore> JournalStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate, stamp and prepend a new entry.
    pub fn save_entry(
        &self,
        content: &str,
        environment: EnvironmentName,
    ) -> Result<JournalEntry, JournalError> {
        let content = validate_content(content)?;
        let entry = JournalEntry::new(content, environment);
        self.insert(entry.clone())?;
        debug!(id = %entry.id, env = %environment, "journal entry saved");
        Ok(entry)
    }

    /// Prepend an already-built entry.
    pub fn insert(&self, entry: JournalEntry) -> Result<(), JournalError> {
        let mut entries = self.all_entries();
        entries.insert(0, entry);
        write_json(&self.store, JOURNAL_KEY, &entries).map_err(JournalError::Save)
    }

    pub fn all_entries(&self) -> Vec<JournalEntry> {
        match read_json::<Vec<JournalEntry>, _>(&self.store, JOURNAL_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "failed to load journal entries");
                Vec::new()
            }
        }
    }

    /// Remove the entry with `id`. Returns whether an entry was removed.
    pub fn delete_entry(&self, id: Uuid) -> Result<bool, JournalError> {
        let mut entries = self.all_entries();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        write_json(&self.store, JOURNAL_KEY, &entries).map_err(JournalError::Delete)?;
        Ok(removed)
    }

    pub fn clear_all(&self) -> Result<(), JournalError> {
        self.store.remove(JOURNAL_KEY).map_err(JournalError::Clear)
    }

    pub fn storage_info(&self) -> StorageInfo {
        let entries = self.all_entries();
        let total_size = serde_json::to_string(&entries)
            .map(|s| s.len())
            .unwrap_or(0);
        StorageInfo {
            entry_count: entries.len(),
            total_size,
            is_available: self.store.is_available(),
        }
    }

    /// Pretty-printed JSON document of every entry, suitable for download.
    pub fn export_json(&self) -> Result<String, JournalError> {
        serde_json::to_string_pretty(&self.all_entries()).map_err(JournalError::Export)
    }
}

/// File name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("env-stamp-backup-{}.json", date.format("%Y-%m-%d"))
}
