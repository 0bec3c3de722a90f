use std::fs;

use chrono::{TimeZone, Utc};
use task_cli::error::TaskError;
use task_cli::models::{Status, Task};
use task_cli::storage::{load_tasks, save_tasks};
use tempfile::tempdir;

fn sample_tasks() -> Vec<Task> {
    let created = Utc.with_ymd_and_hms(2026, 1, 5, 15, 0, 0).unwrap();
    let updated = Utc.with_ymd_and_hms(2026, 1, 6, 9, 30, 15).unwrap();
    vec![
        Task {
            id: 1,
            description: "Buy milk".into(),
            status: Status::Done,
            created_at: created,
            updated_at: updated,
        },
        Task {
            id: 3,
            description: "Walk dog".into(),
            status: Status::InProgress,
            created_at: created,
            updated_at: created,
        },
    ]
}

#[test]
fn test_missing_file_is_empty_collection() {
    let dir = tempdir().unwrap();
    let tasks = load_tasks(&dir.path().join("tasks.json")).unwrap();
    assert!(tasks.is_empty());
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let tasks = sample_tasks();

    save_tasks(&path, &tasks).unwrap();
    let loaded = load_tasks(&path).unwrap();

    assert_eq!(loaded, tasks);
}

#[test]
fn test_round_trip_keeps_subsecond_timestamps() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let tasks = vec![Task::new(1, "Now".into())];

    save_tasks(&path, &tasks).unwrap();

    assert_eq!(load_tasks(&path).unwrap(), tasks);
}

#[test]
fn test_saved_file_is_pretty_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    save_tasks(&path, &sample_tasks()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n  {\n    \"id\": 1,\n    \"description\": \"Buy milk\","));
    assert!(raw.contains("\"status\": \"in-progress\""));
    assert!(raw.contains("\"created_at\": \"2026-01-05T15:00:00Z\""));
}

#[test]
fn test_save_empty_writes_empty_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    save_tasks(&path, &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn test_save_replaces_previous_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    save_tasks(&path, &sample_tasks()).unwrap();
    save_tasks(&path, &sample_tasks()[..1]).unwrap();

    let loaded = load_tasks(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 1);
}

#[test]
fn test_invalid_json_is_deserialize_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_tasks(&path).unwrap_err();
    assert!(matches!(err, TaskError::Deserialize { .. }));
}

#[test]
fn test_unknown_status_is_deserialize_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(
        &path,
        r#"[{"id":1,"description":"x","status":"blocked","created_at":"2026-01-05T15:00:00Z","updated_at":"2026-01-05T15:00:00Z"}]"#,
    )
    .unwrap();

    assert!(matches!(load_tasks(&path), Err(TaskError::Deserialize { .. })));
}

#[test]
fn test_unreadable_path_is_io_error() {
    let dir = tempdir().unwrap();
    // A directory exists but cannot be read as a file.
    let err = load_tasks(dir.path()).unwrap_err();
    assert!(matches!(err, TaskError::Io { .. }));
}

#[test]
fn test_write_into_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("tasks.json");
    let err = save_tasks(&path, &sample_tasks()).unwrap_err();
    assert!(matches!(err, TaskError::Io { .. }));
}
