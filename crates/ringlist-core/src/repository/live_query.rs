//! Live Queries
//!
//! Every committed write bumps a per-collection version counter. A
//! [`LiveQuery`] waits on the counter of the collection it reads and re-runs
//! its query when the counter moves, so a delivery triggered by a write
//! always observes that write. Writes between two deliveries coalesce.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::watch;

use crate::domain::{DomainResult, Task, TaskList};
use super::database::TodoDb;

/// Record collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Lists,
    Tasks,
}

struct Channels {
    lists: watch::Sender<u64>,
    tasks: watch::Sender<u64>,
}

impl Channels {
    fn get(&self, collection: Collection) -> &watch::Sender<u64> {
        match collection {
            Collection::Lists => &self.lists,
            Collection::Tasks => &self.tasks,
        }
    }
}

/// Change notification fan-out; closing it ends every subscription
pub(crate) struct ChangeHub {
    channels: Mutex<Option<Channels>>,
}

impl ChangeHub {
    pub(crate) fn new() -> Self {
        let (lists, _) = watch::channel(0);
        let (tasks, _) = watch::channel(0);
        Self { channels: Mutex::new(Some(Channels { lists, tasks })) }
    }

    pub(crate) fn subscribe(&self, collection: Collection) -> watch::Receiver<u64> {
        match self.channels.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(channels) => channels.get(collection).subscribe(),
                None => closed_receiver(),
            },
            Err(_) => closed_receiver(),
        }
    }

    /// Signal a committed write to `collections`
    pub(crate) fn notify(&self, collections: &[Collection]) {
        if let Ok(guard) = self.channels.lock() {
            if let Some(channels) = guard.as_ref() {
                for collection in collections {
                    channels.get(*collection).send_modify(|version| *version += 1);
                }
            }
        }
    }

    pub(crate) fn close(&self) {
        if let Ok(mut guard) = self.channels.lock() {
            guard.take();
        }
    }
}

fn closed_receiver() -> watch::Receiver<u64> {
    let (_, rx) = watch::channel(0);
    rx
}

/// A record type a live query can load
#[async_trait]
pub trait LiveRecord: Clone + Send + Sync + Sized + 'static {
    const COLLECTION: Collection;

    async fn load(db: &TodoDb) -> DomainResult<Vec<Self>>;
}

#[async_trait]
impl LiveRecord for TaskList {
    const COLLECTION: Collection = Collection::Lists;

    async fn load(db: &TodoDb) -> DomainResult<Vec<Self>> {
        db.all_lists().await
    }
}

#[async_trait]
impl LiveRecord for Task {
    const COLLECTION: Collection = Collection::Tasks;

    async fn load(db: &TodoDb) -> DomainResult<Vec<Self>> {
        db.all_tasks().await
    }
}

/// Subscription that re-delivers a full-collection read after every write
///
/// Dropping the query releases the subscription.
pub struct LiveQuery<T: LiveRecord> {
    db: TodoDb,
    changes: watch::Receiver<u64>,
    delivered_once: bool,
    latest: Option<Vec<T>>,
}

impl<T: LiveRecord> LiveQuery<T> {
    pub(crate) fn new(db: TodoDb) -> Self {
        let changes = db.hub().subscribe(T::COLLECTION);
        Self {
            db,
            changes,
            delivered_once: false,
            latest: None,
        }
    }

    /// Latest delivered result; `None` while the first result is pending
    pub fn current(&self) -> Option<&[T]> {
        self.latest.as_deref()
    }

    /// Next result: immediately on the first call, then after the next write.
    /// Returns `None` once the database has been closed.
    pub async fn next(&mut self) -> Option<DomainResult<Vec<T>>> {
        if self.delivered_once {
            if self.changes.changed().await.is_err() {
                return None;
            }
        } else {
            self.delivered_once = true;
            let _ = self.changes.borrow_and_update();
            if self.db.is_closed() {
                return None;
            }
        }

        let result = T::load(&self.db).await;
        if let Ok(records) = &result {
            self.latest = Some(records.clone());
        }
        Some(result)
    }
}
