//! Snapshot-Persisted Store
//!
//! Memory engine that keeps its whole state as one JSON value in a key/value
//! backend (`localStorage` in the browser). Every write is staged on a copy,
//! saved, and only then applied, so a failed save leaves the store unchanged.

use async_trait::async_trait;
use log::{error, info, warn};
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, ListId, NewTask, Task, TaskId, TaskList};
use super::memory::StoreSnapshot;
use super::traits::TodoStore;

/// String key/value storage holding serialized snapshots
pub trait SnapshotBackend: Send + Sync {
    fn read(&self, key: &str) -> DomainResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> DomainResult<()>;
}

/// Key under which an unreadable snapshot is set aside
pub fn backup_key(key: &str) -> String {
    format!("{}:corrupt", key)
}

pub struct SnapshotStore<B: SnapshotBackend> {
    key: String,
    backend: B,
    state: Mutex<Option<StoreSnapshot>>,
}

impl<B: SnapshotBackend> SnapshotStore<B> {
    /// Load the snapshot stored under `key`.
    ///
    /// A missing value starts an empty store. An unreadable one is copied to
    /// [`backup_key`] and the store starts empty as well.
    pub fn open(key: impl Into<String>, backend: B) -> DomainResult<Self> {
        let key = key.into();
        let snapshot = match backend.read(&key)? {
            Some(json) => match StoreSnapshot::from_json(&json) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    error!("discarding unreadable snapshot '{}': {}", key, e);
                    if let Err(e) = backend.write(&backup_key(&key), &json) {
                        warn!("could not back up '{}': {}", key, e);
                    }
                    StoreSnapshot::default()
                }
            },
            None => StoreSnapshot::default(),
        };
        info!(
            "loaded '{}': {} list(s), {} task(s)",
            key,
            snapshot.lists.len(),
            snapshot.tasks.len()
        );
        Ok(Self { key, backend, state: Mutex::new(Some(snapshot)) })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Apply `f` to a copy, persist the copy if it differs, then commit it
    async fn write<T>(&self, f: impl FnOnce(&mut StoreSnapshot) -> DomainResult<T>) -> DomainResult<T> {
        let mut guard = self.state.lock().await;
        let current = guard.as_mut().ok_or(DomainError::Closed)?;
        let mut staged = current.clone();
        let value = f(&mut staged)?;
        if staged != *current {
            self.backend.write(&self.key, &staged.to_json()?)?;
            *current = staged;
        }
        Ok(value)
    }

    async fn read<T>(&self, f: impl FnOnce(&StoreSnapshot) -> T) -> DomainResult<T> {
        let guard = self.state.lock().await;
        Ok(f(guard.as_ref().ok_or(DomainError::Closed)?))
    }
}

#[async_trait]
impl<B: SnapshotBackend> TodoStore for SnapshotStore<B> {
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
        // One saved value covers both deletes
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

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    /// Shared map standing in for `localStorage`
    #[derive(Clone, Default)]
    pub(crate) struct MapBackend {
        values: Arc<StdMutex<HashMap<String, String>>>,
        reject_writes: Arc<AtomicBool>,
    }

    impl MapBackend {
        pub(crate) fn get(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }

        fn put(&self, key: &str, value: &str) {
            self.values.lock().unwrap().insert(key.to_string(), value.to_string());
        }

        fn reject_writes(&self, reject: bool) {
            self.reject_writes.store(reject, Ordering::SeqCst);
        }
    }

    impl SnapshotBackend for MapBackend {
        fn read(&self, key: &str) -> DomainResult<Option<String>> {
            Ok(self.get(key))
        }

        fn write(&self, key: &str, value: &str) -> DomainResult<()> {
            if self.reject_writes.load(Ordering::SeqCst) {
                return Err(DomainError::Internal("QuotaExceededError".into()));
            }
            self.put(key, value);
            Ok(())
        }
    }

    const KEY: &str = "ringlist:todoApp";

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let backend = MapBackend::default();
        let store = SnapshotStore::open(KEY, backend.clone()).unwrap();
        let home = store.insert_list("Home").await.unwrap();
        let milk = store.insert_task(&NewTask::new("Buy milk", Some(home))).await.unwrap();
        store.set_task_completed(milk, true).await.unwrap();
        store.close().await.unwrap();

        let reopened = SnapshotStore::open(KEY, backend).unwrap();
        assert_eq!(reopened.lists().await.unwrap(), vec![TaskList::new(home, "Home")]);
        let tasks = reopened.tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
        assert!(reopened.insert_list("Work").await.unwrap() > home);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_store_unchanged() {
        let backend = MapBackend::default();
        let store = SnapshotStore::open(KEY, backend.clone()).unwrap();
        let home = store.insert_list("Home").await.unwrap();
        let milk = store.insert_task(&NewTask::new("Buy milk", Some(home))).await.unwrap();
        let saved = backend.get(KEY);

        backend.reject_writes(true);
        assert!(store.insert_task(&NewTask::new("Bake bread", Some(home))).await.is_err());
        assert!(store.set_task_completed(milk, true).await.is_err());
        assert!(store.delete_list_with_tasks(home).await.is_err());

        assert_eq!(store.lists().await.unwrap().len(), 1);
        let tasks = store.tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].completed);
        assert_eq!(backend.get(KEY), saved);

        // The rejected task never reaches storage once saving works again
        backend.reject_writes(false);
        store.insert_list("Work").await.unwrap();
        let reopened = SnapshotStore::open(KEY, backend).unwrap();
        assert_eq!(reopened.tasks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_noop_write_skips_save() {
        let backend = MapBackend::default();
        let store = SnapshotStore::open(KEY, backend.clone()).unwrap();
        backend.reject_writes(true);

        assert_eq!(store.set_task_completed(42, true).await, Ok(false));
        assert_eq!(store.delete_task(42).await, Ok(()));
    }

    #[tokio::test]
    async fn test_corrupt_value_is_backed_up_and_store_starts_empty() {
        let backend = MapBackend::default();
        backend.put(KEY, r#"{"lists":[{"id":1,"na"#);

        let store = SnapshotStore::open(KEY, backend.clone()).unwrap();
        assert!(store.lists().await.unwrap().is_empty());
        assert_eq!(backend.get(&backup_key(KEY)).as_deref(), Some(r#"{"lists":[{"id":1,"na"#));

        // The first write replaces the unreadable value
        store.insert_list("Home").await.unwrap();
        let json = backend.get(KEY).unwrap();
        assert_eq!(StoreSnapshot::from_json(&json).unwrap().lists.len(), 1);
    }

    #[tokio::test]
    async fn test_closed_store_rejects_calls() {
        let store = SnapshotStore::open(KEY, MapBackend::default()).unwrap();
        store.close().await.unwrap();
        assert_eq!(store.tasks().await, Err(DomainError::Closed));
        assert_eq!(store.insert_list("Home").await, Err(DomainError::Closed));
    }
}
