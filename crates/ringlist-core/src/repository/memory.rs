//! In-Memory Store
//!
//! Insertion-ordered vectors behind an async mutex. The whole state can be
//! exported as a [`StoreSnapshot`], which is how browser engines persist it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, ListId, NewTask, Task, TaskId, TaskList};
use super::traits::TodoStore;

/// Serializable contents of a memory store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub lists: Vec<TaskList>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Next id handed out; ids are never reused
    pub next_list_id: ListId,
    pub next_task_id: TaskId,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            tasks: Vec::new(),
            next_list_id: 1,
            next_task_id: 1,
        }
    }
}

impl StoreSnapshot {
    pub fn to_json(&self) -> DomainResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        let mut snapshot: StoreSnapshot = serde_json::from_str(json)?;
        snapshot.repair_counters()?;
        Ok(snapshot)
    }

    /// Keep counters ahead of every stored id (hand-edited or truncated snapshots)
    fn repair_counters(&mut self) -> DomainResult<()> {
        if let Some(max) = self.lists.iter().map(|l| l.id).max() {
            self.next_list_id = self.next_list_id.max(successor(max, "list")?);
        }
        if let Some(max) = self.tasks.iter().map(|t| t.id).max() {
            self.next_task_id = self.next_task_id.max(successor(max, "task")?);
        }
        Ok(())
    }

    pub(crate) fn insert_list(&mut self, name: &str) -> DomainResult<ListId> {
        let id = self.next_list_id;
        self.next_list_id = successor(id, "list")?;
        self.lists.push(TaskList::new(id, name));
        Ok(id)
    }

    pub(crate) fn insert_task(&mut self, task: &NewTask) -> DomainResult<TaskId> {
        let id = self.next_task_id;
        self.next_task_id = successor(id, "task")?;
        self.tasks.push(task.clone().into_task(id));
        Ok(id)
    }

    pub(crate) fn set_task_completed(&mut self, id: TaskId, completed: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }

    pub(crate) fn delete_task(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
    }

    pub(crate) fn delete_list(&mut self, id: ListId) {
        self.lists.retain(|l| l.id != id);
    }

    pub(crate) fn delete_tasks_in_list(&mut self, list_id: ListId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.belongs_to(list_id));
        before - self.tasks.len()
    }

    pub(crate) fn find_task(&self, id: TaskId) -> Option<Task> {
        self.tasks.iter().find(|t| t.id == id).cloned()
    }
}

/// Id following `id`; the id space is exhausted at `u32::MAX`
fn successor(id: u32, kind: &str) -> DomainResult<u32> {
    id.checked_add(1)
        .ok_or_else(|| DomainError::InvalidInput(format!("{} ids exhausted", kind)))
}

/// Volatile store, also the core of the browser engine
pub struct MemoryStore {
    state: Mutex<Option<StoreSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self { state: Mutex::new(Some(snapshot)) }
    }

    /// Copy of the current contents
    pub async fn snapshot(&self) -> DomainResult<StoreSnapshot> {
        let guard = self.state.lock().await;
        guard.clone().ok_or(DomainError::Closed)
    }

    async fn write<T>(&self, f: impl FnOnce(&mut StoreSnapshot) -> DomainResult<T>) -> DomainResult<T> {
        let mut guard = self.state.lock().await;
        f(guard.as_mut().ok_or(DomainError::Closed)?)
    }

    async fn read<T>(&self, f: impl FnOnce(&StoreSnapshot) -> T) -> DomainResult<T> {
        let guard = self.state.lock().await;
        Ok(f(guard.as_ref().ok_or(DomainError::Closed)?))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_list(&self, name: &str) -> DomainResult<ListId> {
        self.write(|state| state.insert_list(name)).await
    }

    async fn insert_task(&self, task: &NewTask) -> DomainResult<TaskId> {
        self.write(|state| state.insert_task(task)).await
    }

    async fn set_task_completed(&self, id: TaskId, completed: bool) -> DomainResult<bool> {
        self.write(|state| Ok(state.set_task_completed(id, completed))).await
    }

    async fn delete_task(&self, id: TaskId) -> DomainResult<()> {
        self.write(|state| {
            state.delete_task(id);
            Ok(())
        })
        .await
    }

    async fn delete_list(&self, id: ListId) -> DomainResult<()> {
        self.write(|state| {
            state.delete_list(id);
            Ok(())
        })
        .await
    }

    async fn delete_tasks_in_list(&self, list_id: ListId) -> DomainResult<usize> {
        self.write(|state| Ok(state.delete_tasks_in_list(list_id))).await
    }

    async fn delete_list_with_tasks(&self, id: ListId) -> DomainResult<usize> {
        // Single lock scope: no reader sees the list gone but its tasks present
        self.write(|state| {
            state.delete_list(id);
            Ok(state.delete_tasks_in_list(id))
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> DomainResult<Option<Task>> {
        self.read(|state| state.find_task(id)).await
    }

    async fn lists(&self) -> DomainResult<Vec<TaskList>> {
        self.read(|state| state.lists.clone()).await
    }

    async fn tasks(&self) -> DomainResult<Vec<Task>> {
        self.read(|state| state.tasks.clone()).await
    }

    async fn close(&self) -> DomainResult<()> {
        self.state.lock().await.take();
        Ok(())
    }
}
