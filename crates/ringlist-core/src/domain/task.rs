//! Task Entity
//!
//! A single to-do item with a description and a completion flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::task_list::ListId;

/// Store-assigned task identifier
pub type TaskId = u32;

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: TaskId,
    /// Description text
    pub task: String,
    /// Completion status (the only mutable field)
    pub completed: bool,
    /// Owning list (None for the single-list variant)
    #[serde(default)]
    pub list_id: Option<ListId>,
    /// Declared in the schema but never set
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn belongs_to(&self, list_id: ListId) -> bool {
        self.list_id == Some(list_id)
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Fields supplied when inserting a task; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task: String,
    pub list_id: Option<ListId>,
}

impl NewTask {
    pub fn new(task: impl Into<String>, list_id: Option<ListId>) -> Self {
        Self { task: task.into(), list_id }
    }

    /// Materialize the stored record
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            task: self.task,
            completed: false,
            list_id: self.list_id,
            date: None,
        }
    }
}
