// Persistence backends for the task list
//
// The whole list is persisted as one JSON document under a fixed name;
// there is no partial or incremental persistence.

use eyre::{Context, Result};
use fs2::FileExt;
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::Task;

/// Fixed document name inside the store directory
pub const STORE_FILE: &str = "tasks.json";

/// Persistence capability injected into the store.
///
/// `load` fails soft: a missing or unreadable document yields an empty
/// list, never an error surfaced at startup. `save` is best effort with
/// no retry policy.
pub trait Storage {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// File-backed storage holding the whole list in one JSON document
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    /// Open or create storage rooted at the given directory
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create store directory")?;
        Ok(Self { dir })
    }

    /// Default per-user location for the store directory
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskpad")
    }

    /// Path of the persisted document
    pub fn document_path(&self) -> PathBuf {
        self.dir.join(STORE_FILE)
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> Result<Vec<Task>> {
        let path = self.document_path();
        if !path.exists() {
            debug!(path = ?path, "No store document yet, starting empty");
            return Ok(Vec::new());
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = ?path, error = ?e, "Failed to read store document, starting empty");
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                warn!(path = ?path, error = ?e, "Failed to parse store document, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks).context("Failed to serialize task list")?;

        // Write a sibling temp file and rename it over the document, so
        // an interrupted save never truncates the previous good state.
        let tmp_path = self.dir.join(format!("{}.tmp", STORE_FILE));
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .context("Failed to open store document for writing")?;

        // Acquire exclusive lock before writing
        file.lock_exclusive().context("Failed to acquire file lock")?;

        use std::io::Write;
        file.write_all(json.as_bytes())?;
        writeln!(file)?;
        file.sync_all()?;

        // Lock is automatically released when file is dropped
        drop(file);

        fs::rename(&tmp_path, self.document_path()).context("Failed to replace store document")?;
        debug!(count = tasks.len(), "Persisted task list");
        Ok(())
    }
}

/// In-memory backend for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tasks: RefCell<Vec<Task>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.borrow().clone())
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        *self.tasks.borrow_mut() = tasks.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use tempfile::TempDir;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new(1, "First", "09:00", "2024-01-01", Priority::High),
            Task::new(2, "Second", "", "", Priority::Low),
        ]
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("store");

        let storage = JsonStorage::open(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(storage.document_path(), dir.join("tasks.json"));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::open(temp.path()).unwrap();

        let tasks = sample_tasks();
        storage.save(&tasks).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_save_writes_pretty_document() {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::open(temp.path()).unwrap();

        storage.save(&sample_tasks()).unwrap();

        let raw = fs::read_to_string(storage.document_path()).unwrap();
        // Pretty-printed array, one field per line.
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("\"createdAt\""));
        // No temp file left behind.
        assert!(!temp.path().join("tasks.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_document_is_empty() {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::open(temp.path()).unwrap();

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_document_is_empty() {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::open(temp.path()).unwrap();

        fs::write(storage.document_path(), "{not json").unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::open(temp.path()).unwrap();

        fs::write(storage.document_path(), r#"{"tasks":[]}"#).unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::open(temp.path()).unwrap();

        storage.save(&sample_tasks()).unwrap();
        storage.save(&[]).unwrap();

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_memory_storage_round_trips() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_empty());

        let tasks = sample_tasks();
        storage.save(&tasks).unwrap();
        assert_eq!(storage.load().unwrap(), tasks);
    }
}
