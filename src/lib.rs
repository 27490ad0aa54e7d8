// Taskpad - local task list with wholesale JSON persistence

pub mod exchange;
pub mod filter;
pub mod models;
pub mod storage;
pub mod store;
pub mod ui;

// Re-export main types for convenience
pub use exchange::{ImportError, export_document, export_filename, import_document};
pub use filter::{Filter, project};
pub use models::{Priority, Task, now_iso, now_ms};
pub use storage::{JsonStorage, MemoryStorage, Storage};
pub use store::{Store, TaskList, TaskPatch};
