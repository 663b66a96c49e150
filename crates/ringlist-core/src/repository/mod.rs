//! Repository Layer
//!
//! Storage engines, the database handle and live queries.

mod traits;
mod memory;
mod snapshot_store;
mod database;
mod live_query;
#[cfg(feature = "sqlite")]
mod db;
#[cfg(feature = "sqlite")]
mod sqlite_store;


pub use traits::TodoStore;
pub use memory::{MemoryStore, StoreSnapshot};
pub use snapshot_store::{backup_key, SnapshotBackend, SnapshotStore};
pub use database::TodoDb;
pub use live_query::{Collection, LiveQuery, LiveRecord};
#[cfg(feature = "sqlite")]
pub use sqlite_store::SqliteStore;
