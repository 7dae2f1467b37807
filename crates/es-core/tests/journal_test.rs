use es_core::environment::EnvironmentName;
use es_core::journal::{JournalError, JournalStore, MAX_ENTRY_LENGTH};
use es_core::storage::{FileStore, KeyValueStore, MemoryStore, StorageError, JOURNAL_KEY};

/// A store whose writes always fail.
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }
}

// ===========================================================================
// Save and list
// ===========================================================================

#[test]
fn saved_entry_is_listed_first() {
    let journal = JournalStore::new(MemoryStore::new());
    journal.save_entry("first", EnvironmentName::Local).unwrap();
    let entry = journal
        .save_entry("  Testing prod  ", EnvironmentName::Prod)
        .unwrap();

    assert_eq!(entry.content, "Testing prod");
    assert_eq!(entry.environment, EnvironmentName::Prod);

    let entries = journal.all_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entry);
    assert_eq!(entries[1].content, "first");
}

#[test]
fn ids_are_unique() {
    let journal = JournalStore::new(MemoryStore::new());
    for i in 0..20 {
        journal.save_entry(&format!("entry {i}"), EnvironmentName::Dev).unwrap();
    }
    let mut ids: Vec<_> = journal.all_entries().iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn stored_json_uses_wire_field_names() {
    let mem = MemoryStore::new();
    let journal = JournalStore::new(&mem);
    journal.save_entry("hello", EnvironmentName::Test).unwrap();

    let raw = mem.get(JOURNAL_KEY).unwrap().unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &v[0];
    assert_eq!(first["content"], "hello");
    assert_eq!(first["environment"], "test");
    assert!(first["id"].is_string());
    assert!(first["timestamp"].is_string());
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn blank_content_is_rejected() {
    let mem = MemoryStore::new();
    let journal = JournalStore::new(&mem);
    let err = journal.save_entry(" \n\t ", EnvironmentName::Local).unwrap_err();
    assert!(matches!(err, JournalError::EmptyContent));
    assert_eq!(err.to_string(), "Please enter some content");
    assert!(mem.is_empty());
}

#[test]
fn overlong_content_is_rejected_before_write() {
    let mem = MemoryStore::new();
    let journal = JournalStore::new(&mem);
    let content = "x".repeat(MAX_ENTRY_LENGTH + 1);

    let err = journal.save_entry(&content, EnvironmentName::Local).unwrap_err();
    assert!(matches!(
        err,
        JournalError::ContentTooLong { len: 2001, max: 2000 }
    ));
    assert!(mem.is_empty());
    assert!(journal.all_entries().is_empty());
}

#[test]
fn surrounding_whitespace_counts_toward_limit() {
    let mem = MemoryStore::new();
    let journal = JournalStore::new(&mem);
    let content = format!("{} ", "x".repeat(MAX_ENTRY_LENGTH));

    let err = journal.save_entry(&content, EnvironmentName::Local).unwrap_err();
    assert!(matches!(err, JournalError::ContentTooLong { len: 2001, .. }));
    assert!(mem.is_empty());
}

#[test]
fn content_at_limit_is_stored_trimmed() {
    let journal = JournalStore::new(MemoryStore::new());
    let content = format!(" {} ", "x".repeat(MAX_ENTRY_LENGTH - 2));
    let entry = journal.save_entry(&content, EnvironmentName::Local).unwrap();
    assert_eq!(entry.content.chars().count(), MAX_ENTRY_LENGTH - 2);
}

// ===========================================================================
// Delete and clear
// ===========================================================================

#[test]
fn delete_removes_exactly_one_and_keeps_order() {
    let journal = JournalStore::new(MemoryStore::new());
    let a = journal.save_entry("a", EnvironmentName::Local).unwrap();
    let b = journal.save_entry("b", EnvironmentName::Dev).unwrap();
    let c = journal.save_entry("c", EnvironmentName::Test).unwrap();

    assert!(journal.delete_entry(b.id).unwrap());

    let ids: Vec<_> = journal.all_entries().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);
}

#[test]
fn delete_unknown_id_is_not_an_error() {
    let journal = JournalStore::new(MemoryStore::new());
    journal.save_entry("a", EnvironmentName::Local).unwrap();
    assert!(!journal.delete_entry(uuid::Uuid::new_v4()).unwrap());
    assert_eq!(journal.all_entries().len(), 1);
}

#[test]
fn clear_all_empties_journal() {
    let journal = JournalStore::new(MemoryStore::new());
    journal.save_entry("a", EnvironmentName::Local).unwrap();
    journal.save_entry("b", EnvironmentName::Local).unwrap();
    journal.clear_all().unwrap();
    assert!(journal.all_entries().is_empty());
    assert_eq!(journal.storage_info().entry_count, 0);
}

// ===========================================================================
// Failure modes
// ===========================================================================

#[test]
fn corrupt_list_reads_as_empty() {
    let mem = MemoryStore::new();
    mem.set(JOURNAL_KEY, "not json at all").unwrap();
    let journal = JournalStore::new(&mem);
    assert!(journal.all_entries().is_empty());

    // Saving replaces the corrupt value.
    journal.save_entry("fresh", EnvironmentName::Local).unwrap();
    assert_eq!(journal.all_entries().len(), 1);
}

#[test]
fn write_failures_surface_as_errors() {
    let journal = JournalStore::new(ReadOnlyStore(MemoryStore::new()));

    let err = journal.save_entry("hello", EnvironmentName::Local).unwrap_err();
    assert!(matches!(err, JournalError::Save(_)));
    assert_eq!(err.to_string(), "Failed to save journal entry");

    let err = journal.delete_entry(uuid::Uuid::new_v4()).unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete journal entry");

    let err = journal.clear_all().unwrap_err();
    assert_eq!(err.to_string(), "Failed to clear journal entries");

    assert!(!journal.storage_info().is_available);
}

// ===========================================================================
// Info and export
// ===========================================================================

#[test]
fn storage_info_reports_count_and_size() {
    let journal = JournalStore::new(MemoryStore::new());
    let empty = journal.storage_info();
    assert_eq!(empty.entry_count, 0);
    assert_eq!(empty.total_size, 2); // "[]"
    assert!(empty.is_available);

    journal.save_entry("hello", EnvironmentName::Local).unwrap();
    let info = journal.storage_info();
    assert_eq!(info.entry_count, 1);
    assert!(info.total_size > empty.total_size);
}

#[test]
fn export_is_pretty_json_array() {
    let journal = JournalStore::new(MemoryStore::new());
    journal.save_entry("one", EnvironmentName::Local).unwrap();
    journal.save_entry("two", EnvironmentName::Prod).unwrap();

    let exported = journal.export_json().unwrap();
    assert!(exported.contains('\n'));
    let v: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[0]["content"], "two");
}

#[test]
fn entries_persist_across_file_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let saved = JournalStore::new(FileStore::new(dir.path()))
        .save_entry("persisted", EnvironmentName::Dev)
        .unwrap();

    let reopened = JournalStore::new(FileStore::new(dir.path()));
    assert_eq!(reopened.all_entries(), vec![saved]);
}
