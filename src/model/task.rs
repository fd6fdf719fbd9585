use serde::{Deserialize, Serialize};

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the collection
    pub id: u64,
    /// Non-empty, pre-trimmed task text
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Create an open task with the given id and text
    pub fn new(id: u64, text: String) -> Self {
        Task {
            id,
            text,
            completed: false,
        }
    }

    /// The character shown inside the checkbox `[ ]`
    pub fn checkbox_char(&self) -> char {
        if self.completed { 'x' } else { ' ' }
    }
}
