use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use log::info;

use crate::error::TaskError;
use crate::models::{Status, Task};
use crate::operations::{
    add_task, delete_task, export_csv, list_tasks, search_tasks, set_status, update_task,
    StatusChange,
};
use crate::storage::{load_tasks, save_tasks};

fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Yellow,
        Status::InProgress => Color::Cyan,
        Status::Done => Color::Green,
    }
}

fn short_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%m/%d %H:%M").to_string()
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn task_table(tasks: &[&Task], with_times: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if with_times {
        table.set_header(header(&["ID", "Description", "Status", "Created", "Updated"]));
    } else {
        table.set_header(header(&["ID", "Description", "Status"]));
    }

    for t in tasks {
        let mut row = vec![
            Cell::new(t.id),
            Cell::new(&t.description),
            Cell::new(t.status.as_str().to_uppercase()).fg(status_color(t.status)),
        ];
        if with_times {
            row.push(Cell::new(short_time(&t.created_at)));
            row.push(Cell::new(short_time(&t.updated_at)));
        }
        table.add_row(row);
    }
    table
}

/// Adds a new task and returns its id.
pub fn cmd_add(path: &Path, description: &str) -> Result<u64, TaskError> {
    let mut tasks = load_tasks(path)?;
    let id = add_task(&mut tasks, description)?;
    save_tasks(path, &tasks)?;
    info!("added task {}", id);
    println!("Task added successfully (ID: {})", id);
    Ok(id)
}

/// Replaces the description of an existing task.
pub fn cmd_update(path: &Path, id: u64, description: &str) -> Result<(), TaskError> {
    let mut tasks = load_tasks(path)?;
    update_task(&mut tasks, id, description)?;
    save_tasks(path, &tasks)?;
    info!("updated task {}", id);
    println!("Task {} updated.", id);
    Ok(())
}

/// Removes a task by id.
pub fn cmd_delete(path: &Path, id: u64) -> Result<(), TaskError> {
    let mut tasks = load_tasks(path)?;
    delete_task(&mut tasks, id)?;
    save_tasks(path, &tasks)?;
    info!("deleted task {}", id);
    println!("Task {} deleted.", id);
    Ok(())
}

/// Moves a task to `status`. Nothing is saved when the status is unchanged.
pub fn cmd_mark(path: &Path, id: u64, status: Status) -> Result<StatusChange, TaskError> {
    let mut tasks = load_tasks(path)?;
    let change = set_status(&mut tasks, id, status)?;
    match change {
        StatusChange::Unchanged => {
            println!("Task {} is already '{}'.", id, status);
        }
        StatusChange::Changed => {
            save_tasks(path, &tasks)?;
            info!("task {} moved to {}", id, status);
            println!("Task {} marked as {}.", id, status);
        }
    }
    Ok(change)
}

/// Lists tasks sorted by id, optionally restricted to one status.
pub fn cmd_list(path: &Path, filter: Option<Status>) -> Result<(), TaskError> {
    let tasks = load_tasks(path)?;
    let listed = list_tasks(&tasks, filter);
    if listed.is_empty() {
        match filter {
            Some(s) => println!("No tasks with status '{}' found.", s),
            None => println!("No tasks found."),
        }
        return Ok(());
    }
    println!("{}", task_table(&listed, true));
    println!("Total: {}", listed.len());
    Ok(())
}

/// Prints tasks whose description contains `keyword`, ignoring case.
pub fn cmd_search(path: &Path, keyword: &str) -> Result<(), TaskError> {
    let tasks = load_tasks(path)?;
    let found = search_tasks(&tasks, keyword);
    if found.is_empty() {
        println!("No tasks matching '{}' found.", keyword);
        return Ok(());
    }
    println!("Found {} task(s):", found.len());
    println!("{}", task_table(&found, false));
    Ok(())
}

/// Writes the CSV projection to `output`, or to stdout when `None`.
pub fn cmd_export_csv(path: &Path, output: Option<&Path>) -> Result<(), TaskError> {
    let tasks = load_tasks(path)?;
    if tasks.is_empty() {
        eprintln!("No tasks to export.");
        return Ok(());
    }
    let csv = export_csv(&tasks);
    match output {
        Some(out) => {
            fs::write(out, csv).map_err(|source| TaskError::Io {
                path: out.to_path_buf(),
                source,
            })?;
            info!("exported {} tasks to {}", tasks.len(), out.display());
            println!("Exported {} task(s) to {}", tasks.len(), out.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
