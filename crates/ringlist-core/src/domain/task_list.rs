//! TaskList Entity
//!
//! A named grouping of tasks. Only the multi-list board uses lists.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Store-assigned list identifier
pub type ListId = u32;

/// A named to-do list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Unique identifier, assigned by the store
    pub id: ListId,
    /// Display name
    pub name: String,
}

impl TaskList {
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl Entity for TaskList {
    type Id = ListId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
