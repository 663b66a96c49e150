//! Multi-list Board Controller
//!
//! Translates board gestures into store operations. The only state it owns
//! is the transient list selection.

use log::warn;
use std::sync::Mutex;

use crate::domain::{DomainResult, ListId, TaskId, TaskList};
use crate::repository::TodoDb;
use super::interaction::{Confirm, Confirmation, Outcome, SkipReason};
use super::tasks;

pub struct BoardController {
    db: TodoDb,
    selected: Mutex<Option<ListId>>,
}

impl BoardController {
    pub fn new(db: TodoDb) -> Self {
        Self { db, selected: Mutex::new(None) }
    }

    pub fn db(&self) -> &TodoDb {
        &self.db
    }

    pub fn selected(&self) -> Option<ListId> {
        self.selected.lock().map(|guard| *guard).unwrap_or(None)
    }

    fn set_selected(&self, id: Option<ListId>) {
        if let Ok(mut guard) = self.selected.lock() {
            *guard = id;
        }
    }

    /// Select a list; never touches the store
    pub fn select_list(&self, id: ListId) {
        self.set_selected(Some(id));
    }

    /// Align the selection with freshly delivered lists: keep it while it
    /// exists, otherwise fall back to the first list (or none)
    pub fn reconcile_selection(&self, lists: &[TaskList]) -> Option<ListId> {
        let current = self.selected();
        let next = match current {
            Some(id) if lists.iter().any(|l| l.id == id) => Some(id),
            _ => lists.first().map(|l| l.id),
        };
        if next != current {
            self.set_selected(next);
        }
        next
    }

    /// Create a list from a prompt response and select it
    pub async fn add_list(&self, response: Option<&str>) -> DomainResult<Outcome> {
        let Some(name) = response.filter(|name| !name.trim().is_empty()) else {
            return Ok(Outcome::Skipped(SkipReason::EmptyInput));
        };
        let id = self.db.add_list(name).await?;
        self.set_selected(Some(id));
        Ok(Outcome::Applied(None))
    }

    /// Delete a list and its tasks, unless it is the last one
    pub async fn delete_list(&self, id: ListId, confirm: &impl Confirm) -> DomainResult<Outcome> {
        let lists = self.db.all_lists().await?;
        if lists.len() <= 1 {
            warn!("refusing to delete list {}: last remaining list", id);
            return Ok(Outcome::Skipped(SkipReason::LastList));
        }
        if !confirm.confirm(&Confirmation::DeleteList) {
            return Ok(Outcome::Declined);
        }

        self.db.delete_list_with_tasks(id).await?;

        let remaining = self.db.all_lists().await?;
        self.set_selected(remaining.first().map(|l| l.id));
        Ok(Outcome::Applied(None))
    }

    /// Add a task to the selected list
    pub async fn add_task(&self, description: &str) -> DomainResult<Outcome> {
        if description.trim().is_empty() {
            return Ok(Outcome::Skipped(SkipReason::EmptyInput));
        }
        let Some(list_id) = self.selected() else {
            return Ok(Outcome::Skipped(SkipReason::NoListSelected));
        };
        tasks::add(&self.db, description, Some(list_id)).await
    }

    pub async fn toggle_task(
        &self,
        id: TaskId,
        completed: bool,
        confirm: &impl Confirm,
    ) -> DomainResult<Outcome> {
        tasks::toggle(&self.db, id, completed, confirm).await
    }

    pub async fn delete_task(&self, id: TaskId, confirm: &impl Confirm) -> DomainResult<Outcome> {
        tasks::delete(&self.db, id, confirm).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{BoardView, Notice};

    fn setup() -> BoardController {
        BoardController::new(TodoDb::in_memory().expect("Failed to init test DB"))
    }

    #[tokio::test]
    async fn test_add_list_selects_it() {
        let board = setup();
        let outcome = board.add_list(Some("Home")).await.unwrap();
        assert!(outcome.is_applied());

        let lists = board.db().all_lists().await.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(board.selected(), Some(lists[0].id));
    }

    #[tokio::test]
    async fn test_blank_or_cancelled_prompt_is_skipped() {
        let board = setup();
        for response in [None, Some(""), Some("   ")] {
            let outcome = board.add_list(response).await.unwrap();
            assert_eq!(outcome, Outcome::Skipped(SkipReason::EmptyInput));
        }
        assert!(board.db().all_lists().await.unwrap().is_empty());
        assert_eq!(board.selected(), None);
    }

    #[tokio::test]
    async fn test_add_task_needs_description_and_selection() {
        let board = setup();
        assert_eq!(
            board.add_task("Buy milk").await.unwrap(),
            Outcome::Skipped(SkipReason::NoListSelected)
        );

        board.add_list(Some("Home")).await.unwrap();
        assert_eq!(board.add_task("  ").await.unwrap(), Outcome::Skipped(SkipReason::EmptyInput));
        assert!(board.db().all_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_home_scenario() {
        let board = setup();
        board.add_list(Some("Home")).await.unwrap();
        let home = board.selected().unwrap();

        let outcome = board.add_task("Buy milk").await.unwrap();
        let tasks = board.db().tasks_in_list(home).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task, "Buy milk");
        assert!(!tasks[0].completed);
        assert_eq!(
            outcome.notice(),
            Some(&Notice::TaskAdded { id: tasks[0].id, description: "Buy milk".into() })
        );
    }

    #[tokio::test]
    async fn test_half_done_progress() {
        let board = setup();
        board.add_list(Some("Home")).await.unwrap();
        board.add_task("Buy milk").await.unwrap();
        board.add_task("Bake bread").await.unwrap();
        let first = board.db().all_tasks().await.unwrap()[0].id;
        board.toggle_task(first, true, &true).await.unwrap();

        let lists = board.db().all_lists().await.unwrap();
        let tasks = board.db().all_tasks().await.unwrap();
        let view = BoardView::build(&lists, &tasks, board.selected());
        let card = view.selected_card().unwrap();
        assert_eq!(card.progress.label(), "1/2");
        assert_eq!(card.progress.percent(), 50.0);
    }

    #[tokio::test]
    async fn test_last_list_cannot_be_deleted() {
        let board = setup();
        board.add_list(Some("Home")).await.unwrap();
        let home = board.selected().unwrap();
        board.add_task("Buy milk").await.unwrap();

        let asked = std::cell::Cell::new(false);
        let confirm = |_: &Confirmation| {
            asked.set(true);
            true
        };
        let outcome = board.delete_list(home, &confirm).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::LastList));
        assert!(!asked.get());
        assert_eq!(board.db().all_lists().await.unwrap().len(), 1);
        assert_eq!(board.db().tasks_in_list(home).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_list_cascades_and_reselects() {
        let board = setup();
        board.add_list(Some("Home")).await.unwrap();
        let home = board.selected().unwrap();
        board.add_task("Buy milk").await.unwrap();
        board.add_list(Some("Work")).await.unwrap();
        let work = board.selected().unwrap();
        board.add_task("Report").await.unwrap();

        let outcome = board.delete_list(work, &true).await.unwrap();

        assert!(outcome.is_applied());
        assert_eq!(board.selected(), Some(home));
        let tasks = board.db().all_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task, "Buy milk");
    }

    #[tokio::test]
    async fn test_declined_list_delete_changes_nothing() {
        let board = setup();
        board.add_list(Some("Home")).await.unwrap();
        board.add_list(Some("Work")).await.unwrap();
        let work = board.selected().unwrap();

        let outcome = board.delete_list(work, &false).await.unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(board.db().all_lists().await.unwrap().len(), 2);
        assert_eq!(board.selected(), Some(work));
    }

    #[tokio::test]
    async fn test_reconcile_selection() {
        let board = setup();
        assert_eq!(board.reconcile_selection(&[]), None);

        let lists = vec![TaskList::new(3, "Home"), TaskList::new(5, "Work")];
        assert_eq!(board.reconcile_selection(&lists), Some(3));

        board.select_list(5);
        assert_eq!(board.reconcile_selection(&lists), Some(5));

        // Selected list vanished (deleted elsewhere)
        assert_eq!(board.reconcile_selection(&lists[..1]), Some(3));
        assert_eq!(board.reconcile_selection(&[]), None);
        assert_eq!(board.selected(), None);
    }
}
