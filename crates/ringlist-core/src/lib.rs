//! ringlist core
//!
//! Layered architecture:
//! - domain: Core entities and derived progress
//! - repository: Storage engines, the database handle and live queries
//! - controller: User actions and the board render model
//! - config: Where a database lives

pub mod config;
pub mod domain;
pub mod repository;
pub mod controller;

pub use config::{StoreConfig, StoreLocation, BOARD_DB_NAME, SINGLE_LIST_DB_NAME};
pub use domain::{DomainError, DomainResult, Entity, ListId, NewTask, Progress, Task, TaskId, TaskList};
pub use repository::{
    LiveQuery, MemoryStore, SnapshotBackend, SnapshotStore, StoreSnapshot, TodoDb, TodoStore,
};
#[cfg(feature = "sqlite")]
pub use repository::SqliteStore;
pub use controller::{
    BoardController, BoardView, Confirm, Confirmation, ListCard, Notice, Outcome,
    SingleListController, SkipReason, ADD_LIST_PROMPT,
};
