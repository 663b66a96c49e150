//! User Interaction Contracts
//!
//! Controllers never talk to dialogs. They ask an injected [`Confirm`]
//! policy before destructive or completion changes and return [`Notice`]s
//! for the view to display.

use crate::domain::TaskId;

pub const ADD_LIST_PROMPT: &str = "Enter the name of the new To-Do list:";

/// A question put to the user before a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteList,
    DeleteTask,
    ToggleTask { id: TaskId, completed: bool },
}

impl Confirmation {
    pub fn message(&self) -> &'static str {
        match self {
            Confirmation::DeleteList => "Are you sure you want to delete this list?",
            Confirmation::DeleteTask => "Are you sure you want to delete this task?",
            Confirmation::ToggleTask { completed: true, .. } => {
                "Are you sure you want to mark this task as completed?"
            }
            Confirmation::ToggleTask { completed: false, .. } => {
                "Are you sure you want to mark this task as not completed?"
            }
        }
    }
}

/// Answers confirmations
pub trait Confirm {
    fn confirm(&self, request: &Confirmation) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&Confirmation) -> bool,
{
    fn confirm(&self, request: &Confirmation) -> bool {
        self(request)
    }
}

/// Fixed answer
impl Confirm for bool {
    fn confirm(&self, _request: &Confirmation) -> bool {
        *self
    }
}

/// Feedback shown after a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TaskAdded { id: TaskId, description: String },
    TaskCompleted { id: TaskId },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::TaskAdded { id, description } => {
                format!("ToDo '{}' successfully added. Got id {}", description, id)
            }
            Notice::TaskCompleted { .. } => "Task marked as completed!".to_string(),
        }
    }
}

/// Why an action was silently not performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyInput,
    NoListSelected,
    LastList,
}

/// Result of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Option<Notice>),
    /// The user answered "no"
    Declined,
    Skipped(SkipReason),
}

impl Outcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Applied(notice) => notice.as_ref(),
            _ => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_and_bool_policies() {
        let only_deletes = |c: &Confirmation| matches!(c, Confirmation::DeleteTask);
        assert!(only_deletes.confirm(&Confirmation::DeleteTask));
        assert!(!only_deletes.confirm(&Confirmation::DeleteList));
        assert!(true.confirm(&Confirmation::DeleteList));
        assert!(!false.confirm(&Confirmation::DeleteTask));
    }

    #[test]
    fn test_notice_messages() {
        let added = Notice::TaskAdded { id: 7, description: "Buy milk".into() };
        assert_eq!(added.message(), "ToDo 'Buy milk' successfully added. Got id 7");
        assert_eq!(Notice::TaskCompleted { id: 7 }.message(), "Task marked as completed!");
    }

    #[test]
    fn test_toggle_message_names_direction() {
        let done = Confirmation::ToggleTask { id: 1, completed: true };
        let undone = Confirmation::ToggleTask { id: 1, completed: false };
        assert!(done.message().ends_with("as completed?"));
        assert!(undone.message().ends_with("as not completed?"));
    }
}
