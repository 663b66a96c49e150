//! Single-list Controller
//!
//! Same task actions as the board, over one implicit list.

use crate::domain::{DomainResult, Progress, Task, TaskId};
use crate::repository::TodoDb;
use super::interaction::{Confirm, Outcome, SkipReason};
use super::tasks;

pub struct SingleListController {
    db: TodoDb,
}

impl SingleListController {
    pub fn new(db: TodoDb) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &TodoDb {
        &self.db
    }

    pub async fn add_task(&self, description: &str) -> DomainResult<Outcome> {
        if description.trim().is_empty() {
            return Ok(Outcome::Skipped(SkipReason::EmptyInput));
        }
        tasks::add(&self.db, description, None).await
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

    /// Progress over every task
    pub fn progress(tasks: &[Task]) -> Progress {
        Progress::of(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Notice;

    fn setup() -> SingleListController {
        SingleListController::new(TodoDb::in_memory().expect("Failed to init test DB"))
    }

    #[tokio::test]
    async fn test_add_task_without_lists() {
        let single = setup();
        let outcome = single.add_task("Water plants").await.unwrap();

        let tasks = single.db().all_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].list_id, None);
        assert_eq!(
            outcome.notice().map(Notice::message),
            Some(format!("ToDo 'Water plants' successfully added. Got id {}", tasks[0].id))
        );
        assert!(single.db().all_lists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_task_skipped() {
        let single = setup();
        assert_eq!(single.add_task("\t").await.unwrap(), Outcome::Skipped(SkipReason::EmptyInput));
        assert!(single.db().all_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_progress_over_all_tasks() {
        let single = setup();
        single.add_task("one").await.unwrap();
        single.add_task("two").await.unwrap();
        single.add_task("three").await.unwrap();
        single.add_task("four").await.unwrap();

        let tasks = single.db().all_tasks().await.unwrap();
        for task in &tasks[..3] {
            single.toggle_task(task.id, true, &true).await.unwrap();
        }
        let tasks = single.db().all_tasks().await.unwrap();
        let progress = SingleListController::progress(&tasks);
        assert_eq!(progress.label(), "3/4");
        assert_eq!(progress.percent(), 75.0);

        for task in &tasks {
            single.toggle_task(task.id, true, &true).await.unwrap();
        }
        let tasks = single.db().all_tasks().await.unwrap();
        assert_eq!(SingleListController::progress(&tasks).percent(), 100.0);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let single = setup();
        single.add_task("one").await.unwrap();
        let id = single.db().all_tasks().await.unwrap()[0].id;

        assert_eq!(single.delete_task(id, &false).await.unwrap(), Outcome::Declined);
        assert!(single.delete_task(id, &true).await.unwrap().is_applied());
        assert!(single.db().all_tasks().await.unwrap().is_empty());
    }
}
