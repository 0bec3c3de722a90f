use std::path::PathBuf;

use thiserror::Error;

/// Every failure the store and the task operations can report.
///
/// Nothing is recovered internally; the caller decides how to report it.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("{0}")]
    Validation(String),
    #[error("no task ID left after {0}")]
    IdExhausted(u64),
    #[error("task with ID {0} not found")]
    NotFound(u64),
}
