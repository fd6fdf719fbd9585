use crate::io::storage::Storage;
use crate::model::task::Task;

/// Storage key the serialized task list lives under
pub const STORAGE_KEY: &str = "todos";

/// Error type for store persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },
    #[error("could not serialize task list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The authoritative task collection and its only mutation entry points.
///
/// Every mutation is expected to be followed by `save()` and a re-render,
/// in that order, within the same event turn. The view only reads
/// `tasks()` and calls back into these methods.
pub struct TaskListStore {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
    next_id: u64,
}

impl TaskListStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        TaskListStore {
            tasks: Vec::new(),
            storage,
            next_id: 1,
        }
    }

    /// Replace the collection with whatever storage holds.
    ///
    /// Absent or unparsable data resets to an empty list; load never fails.
    /// Reseeds the id counter past the highest loaded id.
    pub fn load(&mut self) {
        self.tasks = self
            .storage
            .get(STORAGE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        self.next_id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    }

    /// Serialize the full collection and overwrite the stored value.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.tasks)?;
        self.storage
            .set(STORAGE_KEY, &raw)
            .map_err(|source| StoreError::Write {
                key: STORAGE_KEY.to_string(),
                source,
            })
    }

    /// Append a new open task. Whitespace-only text is a silent no-op.
    /// Returns the assigned id.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task::new(id, text.to_string()));
        Some(id)
    }

    /// Flip the completed flag on the matching task.
    /// Returns whether a task matched.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove the matching task. Returns whether a task matched.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Count of tasks not yet completed
    pub fn open_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// Read-only snapshot for the view
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
