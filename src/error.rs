use std::path::PathBuf;
use thiserror::Error;

/// Problems found while loading a dataset. All of them surface before the first layout pass.
#[derive(Debug, Error)]
pub enum DataValidationError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset syntax: {message}")]
    Syntax { message: String },

    #[error("task {task:?}: invalid {field} date {value:?} (expected YYYY-MM or YYYY-MM-DD)")]
    InvalidDate {
        task: String,
        field: &'static str,
        value: String,
    },

    #[error("task {task:?} in category {category:?} has no phases")]
    EmptyPhases { category: String, task: String },

    #[error("task {task:?}: unknown phase {value:?}")]
    UnknownPhase { task: String, value: String },

    #[error("category {category:?}: unknown group type {value:?} (expected customer or transfer)")]
    UnknownGroupKind { category: String, value: String },

    #[error("task {task:?}: unknown milestone type {value:?}")]
    UnknownMilestoneKind { task: String, value: String },

    #[error("task {task:?} ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        task: String,
        start: String,
        end: String,
    },
}
