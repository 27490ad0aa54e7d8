// Import/export of the task list as a portable JSON document

use chrono::NaiveDate;
use eyre::{Context, Result};
use serde_json::Value;
use thiserror::Error;

use crate::models::Task;

/// Failures raised when reading a task document
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("document is not valid JSON: {0}")]
    MalformedJson(serde_json::Error),

    #[error("document is not a JSON array of tasks")]
    NotAnArray,

    #[error("task at index {index} is not valid: {source}")]
    InvalidTask {
        index: usize,
        source: serde_json::Error,
    },
}

/// Serialize the whole list as a pretty-printed JSON array, in store
/// order. Lossless: importing the result reproduces every field.
pub fn export_document(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).context("Failed to serialize task list")
}

/// File name for a dated export: `tasks-<YYYY-MM-DD>.json`
pub fn export_filename(today: NaiveDate) -> String {
    format!("tasks-{}.json", today.format("%Y-%m-%d"))
}

/// Parse a portable document into a task sequence.
///
/// Validates shape only as far as the task type requires: the document
/// must be a JSON array, and each element must deserialize as a task
/// (missing optional fields default; a wrong-typed value or a missing
/// id/text rejects that element). The caller replaces the store only on
/// `Ok`, so a failed import leaves existing state untouched.
pub fn import_document(raw: &str) -> std::result::Result<Vec<Task>, ImportError> {
    let value: Value = serde_json::from_str(raw).map_err(ImportError::MalformedJson)?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ImportError::NotAnArray),
    };

    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let task =
            serde_json::from_value(item).map_err(|source| ImportError::InvalidTask { index, source })?;
        tasks.push(task);
    }
    Ok(tasks)
}
