//! Leaderboard persistence tests
//!
//! Verifies the JSON storage contract: append preserves order, absent or
//! corrupt files behave as empty, clear is idempotent, and corruption is
//! recovered silently instead of surfacing to the caller.

use tempfile::TempDir;
use voiceoff::leaderboard::LeaderboardStore;
use voiceoff::VoiceoffError;

fn store() -> (LeaderboardStore, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LeaderboardStore::new(dir.path().join("leaderboard.json"));
    (store, dir)
}

#[test]
fn test_absent_file_reads_empty() {
    let (store, _dir) = store();
    assert!(store.read_all().is_empty());
}

#[test]
fn test_append_then_read() {
    let (store, _dir) = store();

    store.append("Alice", 1, 2).unwrap();
    let entries = store.read_all();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Alice");
    assert_eq!(entries[0].correct, 1);
    assert_eq!(entries[0].total, 2);
}

#[test]
fn test_append_preserves_order() {
    let (store, _dir) = store();

    store.append("Alice", 1, 1).unwrap();
    store.append("Bob", 0, 1).unwrap();
    store.append("Alice", 2, 3).unwrap();

    let entries = store.read_all();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].name, "Alice");
    assert_eq!(entries[1].name, "Bob");
    assert_eq!(entries[2].name, "Alice");
    assert_eq!(entries[2].total, 3);
}

#[test]
fn test_corrupt_file_reads_empty() {
    let (store, _dir) = store();

    std::fs::write(store.path(), "[{\"name\": \"trunc").unwrap();
    assert!(store.read_all().is_empty());
}

#[test]
fn test_corrupt_file_is_recovered_by_append() {
    let (store, _dir) = store();

    // Truncated JSON: prior entries are lost, but the store keeps working
    std::fs::write(store.path(), "[{\"name\": \"Bob\", \"correct\":").unwrap();

    store.append("Alice", 3, 5).unwrap();
    let entries = store.read_all();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Alice");
    assert_eq!(entries[0].correct, 3);
    assert_eq!(entries[0].total, 5);
}

#[test]
fn test_clear_empties_store() {
    let (store, _dir) = store();

    store.append("Alice", 1, 1).unwrap();
    store.clear().unwrap();
    assert!(store.read_all().is_empty());

    // Idempotent: clearing an already-empty store succeeds
    store.clear().unwrap();
    assert!(store.read_all().is_empty());

    // And appends still work afterwards
    store.append("Bob", 0, 1).unwrap();
    assert_eq!(store.read_all().len(), 1);
}

#[test]
fn test_empty_name_is_rejected() {
    let (store, _dir) = store();

    assert!(matches!(store.append("", 1, 1), Err(VoiceoffError::Input(_))));
    assert!(matches!(store.append("   ", 1, 1), Err(VoiceoffError::Input(_))));
    assert!(store.read_all().is_empty());
}

#[test]
fn test_name_is_trimmed() {
    let (store, _dir) = store();

    store.append("  Alice  ", 1, 1).unwrap();
    assert_eq!(store.read_all()[0].name, "Alice");
}

#[test]
fn test_stored_format_is_a_json_array() {
    let (store, _dir) = store();

    store.append("Alice", 3, 5).unwrap();
    let content = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    let array = value.as_array().expect("top-level JSON array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["name"], "Alice");
    assert_eq!(array[0]["correct"], 3);
    assert_eq!(array[0]["total"], 5);
}
