//! Controller Layer
//!
//! Validates user gestures, asks for confirmation and dispatches store
//! operations. Also derives the render model from query results.

mod interaction;
mod view;
mod tasks;
mod board;
mod single_list;

pub use interaction::{Confirm, Confirmation, Notice, Outcome, SkipReason, ADD_LIST_PROMPT};
pub use view::{BoardView, ListCard};
pub use board::BoardController;
pub use single_list::SingleListController;
