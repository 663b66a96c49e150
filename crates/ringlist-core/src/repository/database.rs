//! Database Handle
//!
//! `TodoDb` wraps a storage engine with an explicit open/close lifecycle and
//! publishes a change notification after every committed write. Clones share
//! the same engine.

use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{StoreConfig, StoreLocation};
use crate::domain::{DomainError, DomainResult, ListId, NewTask, Task, TaskId, TaskList};
use super::live_query::{ChangeHub, Collection, LiveQuery};
use super::traits::TodoStore;

struct Inner {
    name: String,
    store: Arc<dyn TodoStore>,
    hub: ChangeHub,
    closed: AtomicBool,
}

/// Shared handle to an opened to-do database
#[derive(Clone)]
pub struct TodoDb {
    inner: Arc<Inner>,
}

impl TodoDb {
    /// Open the engine described by `config`
    pub fn open(config: &StoreConfig) -> DomainResult<Self> {
        config.validate()?;
        let store = open_engine(&config.location)?;
        info!("opened database '{}'", config.name);
        Ok(Self::from_parts(config.name.clone(), store))
    }

    /// Private in-memory database
    pub fn in_memory() -> DomainResult<Self> {
        Self::open(&StoreConfig::default())
    }

    /// Wrap an engine constructed by the caller
    pub fn with_store(name: impl Into<String>, store: Arc<dyn TodoStore>) -> Self {
        Self::from_parts(name.into(), store)
    }

    fn from_parts(name: String, store: Arc<dyn TodoStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                store,
                hub: ChangeHub::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn hub(&self) -> &ChangeHub {
        &self.inner.hub
    }

    fn store(&self) -> DomainResult<&dyn TodoStore> {
        if self.is_closed() {
            return Err(DomainError::Closed);
        }
        Ok(self.inner.store.as_ref())
    }

    /// Close the engine and end every live query
    pub async fn close(&self) -> DomainResult<()> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.inner.hub.close();
        self.inner.store.close().await?;
        info!("closed database '{}'", self.inner.name);
        Ok(())
    }

    // ========================
    // Writes
    // ========================

    pub async fn add_list(&self, name: &str) -> DomainResult<ListId> {
        let id = self.store()?.insert_list(name).await?;
        debug!("added list {} '{}'", id, name);
        self.inner.hub.notify(&[Collection::Lists]);
        Ok(id)
    }

    pub async fn add_task(&self, description: &str, list_id: Option<ListId>) -> DomainResult<TaskId> {
        let id = self.store()?.insert_task(&NewTask::new(description, list_id)).await?;
        debug!("added task {} to list {:?}", id, list_id);
        self.inner.hub.notify(&[Collection::Tasks]);
        Ok(id)
    }

    /// Set one task's completion flag; false when the id does not exist
    pub async fn update_task_completion(&self, id: TaskId, completed: bool) -> DomainResult<bool> {
        let changed = self.store()?.set_task_completed(id, completed).await?;
        if changed {
            debug!("task {} completed={}", id, completed);
            self.inner.hub.notify(&[Collection::Tasks]);
        }
        Ok(changed)
    }

    /// Idempotent
    pub async fn delete_task(&self, id: TaskId) -> DomainResult<()> {
        self.store()?.delete_task(id).await?;
        debug!("deleted task {}", id);
        self.inner.hub.notify(&[Collection::Tasks]);
        Ok(())
    }

    /// Remove the list record only; see [`Self::delete_list_with_tasks`]
    pub async fn delete_list(&self, id: ListId) -> DomainResult<()> {
        self.store()?.delete_list(id).await?;
        debug!("deleted list {}", id);
        self.inner.hub.notify(&[Collection::Lists]);
        Ok(())
    }

    pub async fn delete_tasks_in_list(&self, list_id: ListId) -> DomainResult<usize> {
        let removed = self.store()?.delete_tasks_in_list(list_id).await?;
        debug!("deleted {} task(s) of list {}", removed, list_id);
        self.inner.hub.notify(&[Collection::Tasks]);
        Ok(removed)
    }

    /// Delete a list and its tasks in one transaction
    pub async fn delete_list_with_tasks(&self, id: ListId) -> DomainResult<usize> {
        let removed = self.store()?.delete_list_with_tasks(id).await?;
        debug!("deleted list {} with {} task(s)", id, removed);
        self.inner.hub.notify(&[Collection::Lists, Collection::Tasks]);
        Ok(removed)
    }

    // ========================
    // Reads
    // ========================

    pub async fn all_lists(&self) -> DomainResult<Vec<TaskList>> {
        self.store()?.lists().await
    }

    pub async fn all_tasks(&self) -> DomainResult<Vec<Task>> {
        self.store()?.tasks().await
    }

    pub async fn tasks_in_list(&self, list_id: ListId) -> DomainResult<Vec<Task>> {
        self.store()?.tasks_in_list(list_id).await
    }

    pub async fn find_task(&self, id: TaskId) -> DomainResult<Option<Task>> {
        self.store()?.find_task(id).await
    }

    // ========================
    // Live queries
    // ========================

    pub fn live_lists(&self) -> LiveQuery<TaskList> {
        LiveQuery::new(self.clone())
    }

    pub fn live_tasks(&self) -> LiveQuery<Task> {
        LiveQuery::new(self.clone())
    }
}

#[cfg(feature = "sqlite")]
fn open_engine(location: &StoreLocation) -> DomainResult<Arc<dyn TodoStore>> {
    use super::sqlite_store::SqliteStore;

    Ok(match location {
        StoreLocation::InMemory => Arc::new(SqliteStore::open_in_memory()?),
        StoreLocation::File(path) => Arc::new(SqliteStore::open(path)?),
    })
}

#[cfg(not(feature = "sqlite"))]
fn open_engine(location: &StoreLocation) -> DomainResult<Arc<dyn TodoStore>> {
    use super::memory::MemoryStore;

    match location {
        StoreLocation::InMemory => Ok(Arc::new(MemoryStore::new())),
        StoreLocation::File(path) => Err(DomainError::InvalidInput(format!(
            "{}: file stores need the sqlite feature",
            path.display()
        ))),
    }
}
