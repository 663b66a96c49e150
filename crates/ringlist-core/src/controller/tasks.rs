//! Task actions shared by both controllers

use crate::domain::{DomainResult, ListId, TaskId};
use crate::repository::TodoDb;
use super::interaction::{Confirm, Confirmation, Notice, Outcome};

/// Insert a validated task and report its id
pub(super) async fn add(db: &TodoDb, description: &str, list_id: Option<ListId>) -> DomainResult<Outcome> {
    let id = db.add_task(description, list_id).await?;
    Ok(Outcome::Applied(Some(Notice::TaskAdded {
        id,
        description: description.to_string(),
    })))
}

/// Ask before any completion change, including un-completing
pub(super) async fn toggle(
    db: &TodoDb,
    id: TaskId,
    completed: bool,
    confirm: &impl Confirm,
) -> DomainResult<Outcome> {
    if !confirm.confirm(&Confirmation::ToggleTask { id, completed }) {
        return Ok(Outcome::Declined);
    }
    db.update_task_completion(id, completed).await?;
    let notice = completed.then_some(Notice::TaskCompleted { id });
    Ok(Outcome::Applied(notice))
}

pub(super) async fn delete(db: &TodoDb, id: TaskId, confirm: &impl Confirm) -> DomainResult<Outcome> {
    if !confirm.confirm(&Confirmation::DeleteTask) {
        return Ok(Outcome::Declined);
    }
    db.delete_task(id).await?;
    Ok(Outcome::Applied(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_asks_in_both_directions() {
        let db = TodoDb::in_memory().unwrap();
        let id = db.add_task("Buy milk", None).await.unwrap();
        let asked = std::cell::RefCell::new(Vec::new());
        let confirm = |c: &Confirmation| {
            asked.borrow_mut().push(c.clone());
            true
        };

        let done = toggle(&db, id, true, &confirm).await.unwrap();
        let undone = toggle(&db, id, false, &confirm).await.unwrap();

        assert_eq!(done, Outcome::Applied(Some(Notice::TaskCompleted { id })));
        assert_eq!(undone, Outcome::Applied(None));
        assert_eq!(
            *asked.borrow(),
            vec![
                Confirmation::ToggleTask { id, completed: true },
                Confirmation::ToggleTask { id, completed: false },
            ]
        );
        assert!(!db.find_task(id).await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_declined_toggle_keeps_state() {
        let db = TodoDb::in_memory().unwrap();
        let id = db.add_task("Buy milk", None).await.unwrap();

        assert_eq!(toggle(&db, id, true, &false).await.unwrap(), Outcome::Declined);
        assert!(!db.find_task(id).await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = TodoDb::in_memory().unwrap();
        let id = db.add_task("Buy milk", None).await.unwrap();

        assert!(delete(&db, id, &true).await.unwrap().is_applied());
        assert!(delete(&db, id, &true).await.unwrap().is_applied());
        assert!(db.all_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_keeps_task() {
        let db = TodoDb::in_memory().unwrap();
        let id = db.add_task("Buy milk", None).await.unwrap();

        assert_eq!(delete(&db, id, &false).await.unwrap(), Outcome::Declined);
        assert!(db.find_task(id).await.unwrap().is_some());
    }
}
