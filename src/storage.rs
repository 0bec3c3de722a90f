use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::debug;

use crate::error::TaskError;
use crate::models::Task;

/// Default backing file, relative to the current directory.
pub const DEFAULT_DB_FILE: &str = "tasks.json";

/// Loads all tasks from the backing file at `path`.
///
/// A missing file is an empty collection, not an error. Any other read
/// failure is an [`TaskError::Io`]; unparseable contents are a
/// [`TaskError::Deserialize`].
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, TaskError> {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist, starting with no tasks", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(TaskError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let tasks: Vec<Task> = serde_json::from_str(&s).map_err(|source| TaskError::Deserialize {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// Saves the given tasks to the backing file at `path`.
///
/// Overwrites the existing file with pretty-printed JSON. There is no
/// locking and no temp-file swap: a crash mid-write can leave the file
/// truncated, and two overlapping invocations race with the last save
/// winning.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), TaskError> {
    let s = serde_json::to_string_pretty(tasks).map_err(TaskError::Serialize)?;
    let io_err = |source| TaskError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(io_err)?;
    f.write_all(s.as_bytes()).map_err(io_err)?;
    debug!("saved {} tasks to {}", tasks.len(), path.display());
    Ok(())
}
