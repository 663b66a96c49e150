//! Derived View State
//!
//! Everything the board renders is recomputed from raw query results.

use crate::domain::{ListId, Progress, Task, TaskList};

/// One list as rendered on the board
#[derive(Debug, Clone, PartialEq)]
pub struct ListCard {
    pub list: TaskList,
    pub tasks: Vec<Task>,
    pub progress: Progress,
    pub selected: bool,
    /// False for the last remaining list
    pub deletable: bool,
}

/// Render model of the multi-list board
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardView {
    pub cards: Vec<ListCard>,
}

impl BoardView {
    pub fn build(lists: &[TaskList], tasks: &[Task], selected: Option<ListId>) -> Self {
        let deletable = lists.len() > 1;
        let cards = lists
            .iter()
            .map(|list| {
                let tasks: Vec<Task> = tasks.iter().filter(|t| t.belongs_to(list.id)).cloned().collect();
                ListCard {
                    progress: Progress::of(&tasks),
                    list: list.clone(),
                    tasks,
                    selected: selected == Some(list.id),
                    deletable,
                }
            })
            .collect();
        Self { cards }
    }

    pub fn selected_card(&self) -> Option<&ListCard> {
        self.cards.iter().find(|card| card.selected)
    }
}
