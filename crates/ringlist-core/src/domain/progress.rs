//! Completion progress derived from a set of tasks

use serde::{Deserialize, Serialize};
use super::task::Task;

/// Completed/total counts for the progress ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Count the completed tasks among `tasks`
    pub fn of<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Progress::default(), |acc, task| Progress {
            completed: acc.completed + usize::from(task.completed),
            total: acc.total + 1,
        })
    }

    /// Completion percentage; 0 when there are no tasks
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Ring caption, e.g. "1/2"
    pub fn label(&self) -> String {
        format!("{}/{}", self.completed, self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;

    fn task(id: u32, completed: bool) -> Task {
        let mut task = NewTask::new(format!("task {}", id), Some(1)).into_task(id);
        task.completed = completed;
        task
    }

    #[test]
    fn test_empty_is_zero_percent() {
        let tasks: Vec<Task> = Vec::new();
        let progress = Progress::of(&tasks);
        assert_eq!(progress.percent(), 0.0);
        assert_eq!(progress.label(), "0/0");
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_half_done() {
        let tasks = vec![task(1, true), task(2, false)];
        let progress = Progress::of(&tasks);
        assert_eq!(progress, Progress { completed: 1, total: 2 });
        assert_eq!(progress.percent(), 50.0);
        assert_eq!(progress.label(), "1/2");
    }

    #[test]
    fn test_all_done_is_hundred() {
        let tasks = vec![task(1, true), task(2, true), task(3, true)];
        let progress = Progress::of(&tasks);
        assert_eq!(progress.percent(), 100.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_fractional_percent() {
        let tasks = vec![task(1, true), task(2, false), task(3, false)];
        let expected = 100.0 * 1.0 / 3.0;
        assert!((Progress::of(&tasks).percent() - expected).abs() < 1e-9);
    }
}
