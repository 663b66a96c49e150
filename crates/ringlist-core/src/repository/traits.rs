//! Repository Layer - Core Traits
//!
//! Defines the abstract storage engine interface.
//! Implementations can use SQLite, in-memory vectors, browser storage, etc.

use async_trait::async_trait;
use crate::domain::{DomainResult, ListId, NewTask, Task, TaskId, TaskList};

/// Storage engine for lists and tasks
///
/// All operations are async to support various backends.
/// Engines do not validate input and do not enforce the list reference of a task.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a list, returning its new id
    async fn insert_list(&self, name: &str) -> DomainResult<ListId>;

    /// Insert an incomplete task, returning its new id
    async fn insert_task(&self, task: &NewTask) -> DomainResult<TaskId>;

    /// Set the completion flag; returns false when no task has this id
    async fn set_task_completed(&self, id: TaskId, completed: bool) -> DomainResult<bool>;

    /// Delete one task; missing ids are not an error
    async fn delete_task(&self, id: TaskId) -> DomainResult<()>;

    /// Delete one list record, leaving its tasks in place
    async fn delete_list(&self, id: ListId) -> DomainResult<()>;

    /// Delete every task referencing `list_id`, returning how many went
    async fn delete_tasks_in_list(&self, list_id: ListId) -> DomainResult<usize>;

    /// Delete a list together with its tasks as one atomic step
    async fn delete_list_with_tasks(&self, id: ListId) -> DomainResult<usize>;

    /// Find task by ID
    async fn find_task(&self, id: TaskId) -> DomainResult<Option<Task>>;

    /// All lists in insertion order
    async fn lists(&self) -> DomainResult<Vec<TaskList>>;

    /// All tasks in insertion order
    async fn tasks(&self) -> DomainResult<Vec<Task>>;

    /// Tasks referencing `list_id`
    async fn tasks_in_list(&self, list_id: ListId) -> DomainResult<Vec<Task>> {
        let mut tasks = self.tasks().await?;
        tasks.retain(|task| task.belongs_to(list_id));
        Ok(tasks)
    }

    /// Release the engine; later calls fail with `DomainError::Closed`
    async fn close(&self) -> DomainResult<()>;
}
