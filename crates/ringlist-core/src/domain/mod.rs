//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (only serde and chrono for serialization).

mod entity;
mod task;
mod task_list;
mod progress;

pub use entity::{Entity, DomainError, DomainResult};
pub use task::{Task, TaskId, NewTask};
pub use task_list::{TaskList, ListId};
pub use progress::Progress;
