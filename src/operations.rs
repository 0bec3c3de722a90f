//! In-memory operations over a loaded task collection.
//!
//! Nothing here touches the filesystem. A failing operation leaves the
//! collection exactly as it was.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::TaskError;
use crate::models::{Status, Task};

/// Header row of the CSV projection.
pub const CSV_HEADER: &str = "ID,Description,Status,CreatedAt,UpdatedAt";

/// Outcome of [`set_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Changed,
    /// The task already had the requested status; nothing was modified.
    Unchanged,
}

fn validate_description(description: &str) -> Result<&str, TaskError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(TaskError::Validation(
            "task description cannot be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// Appends a new `todo` task and returns its id.
///
/// The id is one past the highest id in the collection, so a hand-edited or
/// reordered file can never yield a duplicate.
pub fn add_task(tasks: &mut Vec<Task>, description: &str) -> Result<u64, TaskError> {
    let description = validate_description(description)?;
    let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    let next_id = max_id.checked_add(1).ok_or(TaskError::IdExhausted(max_id))?;
    tasks.push(Task::new(next_id, description.to_string()));
    Ok(next_id)
}

/// Returns the position of the first task with the given id.
pub fn find_task_index(tasks: &[Task], id: u64) -> Result<usize, TaskError> {
    tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))
}

/// Replaces a task's description and refreshes its `updated_at`.
pub fn update_task(tasks: &mut [Task], id: u64, description: &str) -> Result<(), TaskError> {
    let description = validate_description(description)?;
    let idx = find_task_index(tasks, id)?;
    let task = &mut tasks[idx];
    task.description = description.to_string();
    task.touch();
    Ok(())
}

/// Removes a task, keeping the remaining tasks in their relative order.
pub fn delete_task(tasks: &mut Vec<Task>, id: u64) -> Result<Task, TaskError> {
    let idx = find_task_index(tasks, id)?;
    Ok(tasks.remove(idx))
}

/// Moves a task to `status`.
///
/// Setting the status a task already has is a no-op that leaves
/// `updated_at` alone and reports [`StatusChange::Unchanged`].
pub fn set_status(tasks: &mut [Task], id: u64, status: Status) -> Result<StatusChange, TaskError> {
    let idx = find_task_index(tasks, id)?;
    let task = &mut tasks[idx];
    if task.status == status {
        return Ok(StatusChange::Unchanged);
    }
    task.status = status;
    task.touch();
    Ok(StatusChange::Changed)
}

/// Returns tasks matching `filter` (all tasks when `None`), sorted by id.
pub fn list_tasks(tasks: &[Task], filter: Option<Status>) -> Vec<&Task> {
    let mut listed: Vec<&Task> = tasks
        .iter()
        .filter(|t| filter.map_or(true, |s| t.status == s))
        .collect();
    listed.sort_by_key(|t| t.id);
    listed
}

/// Returns tasks whose description contains `keyword`, ignoring case.
///
/// Results keep collection order.
pub fn search_tasks<'a>(tasks: &'a [Task], keyword: &str) -> Vec<&'a Task> {
    let keyword = keyword.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.description.to_lowercase().contains(&keyword))
        .collect()
}

fn csv_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders the collection as CSV, in collection order.
///
/// Commas inside descriptions become semicolons; no other quoting is done.
pub fn export_csv(tasks: &[Task]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for t in tasks {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            t.id,
            t.description.replace(',', ";"),
            t.status,
            csv_timestamp(&t.created_at),
            csv_timestamp(&t.updated_at),
        ));
    }
    out
}
