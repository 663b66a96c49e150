//! UI Components
//!
//! Reusable Leptos components.

mod progress_ring;
mod new_task_form;
mod task_row;
mod todo_list_card;

pub use progress_ring::ProgressRing;
pub use new_task_form::NewTaskForm;
pub use task_row::TaskRow;
pub use todo_list_card::TodoListCard;
