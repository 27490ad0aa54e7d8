// Canonical task list and the persistent store wrapper

use eyre::Result;
use tracing::{debug, info};

use crate::models::{Priority, Task, now_ms};
use crate::storage::Storage;

/// Candidate values for editing a task.
///
/// `None` leaves a field alone. For `time` and `date`, an empty string
/// also leaves the field unchanged (no replacement supplied). A `text`
/// candidate that trims to empty rejects the whole patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub time: Option<String>,
    pub date: Option<String>,
    pub priority: Option<Priority>,
}

/// The canonical ordered task list
///
/// Insertion order is the persisted order; the displayed order is a
/// projection computed elsewhere. Pure state transitions only: callers
/// own persistence and rendering. Every mutation either fully applies or
/// fully no-ops, and reports which.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    last_id: i64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted or imported sequence, wholesale
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self { tasks, last_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fresh id: creation time in milliseconds, bumped past every id
    /// already handed out so same-millisecond adds stay distinct.
    fn next_id(&mut self) -> i64 {
        let id = now_ms().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    // ========================================================================
    // Mutation operations
    // ========================================================================

    /// Append a new task. Returns `None` if the text trims to empty.
    pub fn add(&mut self, text: &str, time: &str, date: &str, priority: Priority) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Rejected task with empty text");
            return None;
        }

        let id = self.next_id();
        self.tasks.push(Task::new(id, text, time, date, priority));
        self.tasks.last()
    }

    /// First task matching the id
    pub fn find(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Set the completion flag on the matching task
    pub fn toggle(&mut self, id: i64, completed: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }

    /// Apply an edit patch to the matching task.
    ///
    /// Rejected as a whole when the text candidate trims to empty; the
    /// task is never partially updated in that case.
    pub fn edit(&mut self, id: i64, patch: &TaskPatch) -> bool {
        if patch.text.as_ref().is_some_and(|t| t.trim().is_empty()) {
            debug!(id, "Rejected edit with empty text");
            return false;
        }

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };

        let mut changed = false;
        if let Some(text) = &patch.text {
            task.text = text.trim().to_string();
            changed = true;
        }
        if let Some(time) = &patch.time {
            if !time.is_empty() {
                task.time = time.clone();
                changed = true;
            }
        }
        if let Some(date) = &patch.date {
            if !date.is_empty() {
                task.date = date.clone();
                changed = true;
            }
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
            changed = true;
        }
        changed
    }

    /// Remove the matching task
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove every completed task, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    /// Replace the whole list (import path), re-deriving the id watermark
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        self.tasks = tasks;
    }

    // ========================================================================
    // Counts
    // ========================================================================

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

/// Persistent task store: the canonical list plus a storage backend.
///
/// Every mutation that changes the list is followed by a save of the full
/// list; a no-op mutation does not write.
pub struct Store<S: Storage> {
    list: TaskList,
    storage: S,
}

impl<S: Storage> Store<S> {
    /// Open a store, loading whatever the backend holds
    pub fn open(storage: S) -> Result<Self> {
        let tasks = storage.load()?;
        info!(count = tasks.len(), "Loaded task list");
        Ok(Self {
            list: TaskList::from_tasks(tasks),
            storage,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.list.active_count()
    }

    pub fn completed_count(&self) -> usize {
        self.list.completed_count()
    }

    pub fn find(&self, id: i64) -> Option<&Task> {
        self.list.find(id)
    }

    pub fn add(&mut self, text: &str, time: &str, date: &str, priority: Priority) -> Result<Option<Task>> {
        let task = self.list.add(text, time, date, priority).cloned();
        if task.is_some() {
            self.persist()?;
        }
        Ok(task)
    }

    pub fn toggle(&mut self, id: i64, completed: bool) -> Result<bool> {
        let applied = self.list.toggle(id, completed);
        if applied {
            self.persist()?;
        }
        Ok(applied)
    }

    pub fn edit(&mut self, id: i64, patch: &TaskPatch) -> Result<bool> {
        let applied = self.list.edit(id, patch);
        if applied {
            self.persist()?;
        }
        Ok(applied)
    }

    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let applied = self.list.remove(id);
        if applied {
            self.persist()?;
        }
        Ok(applied)
    }

    pub fn clear_completed(&mut self) -> Result<usize> {
        let removed = self.list.clear_completed();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Wholesale replacement from an imported document. Returns the
    /// number of tasks now in the store.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<usize> {
        self.list.replace_all(tasks);
        self.persist()?;
        Ok(self.list.len())
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(self.list.tasks())
    }
}
