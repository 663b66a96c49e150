//! Todo List Card Component
//!
//! One list on the board: title, delete icon, progress ring and, for the
//! selected list, the add form and its tasks.

use leptos::prelude::*;
use leptos::task::spawn_local;

use ringlist_core::ListCard;

use crate::context::use_app_context;
use crate::dialogs::{self, BrowserConfirm};
use super::{NewTaskForm, ProgressRing, TaskRow};

#[component]
pub fn TodoListCard(card: ListCard) -> impl IntoView {
    let ctx = use_app_context();
    let ListCard { list, tasks, progress, selected, deletable } = card;
    let list_id = list.id;
    let card_class = match (selected, progress.is_complete()) {
        (true, true) => "todo-list selected complete",
        (true, false) => "todo-list selected",
        (false, true) => "todo-list complete",
        (false, false) => "todo-list",
    };

    let on_delete_list = move |_| {
        let board = ctx.board();
        spawn_local(async move {
            match board.delete_list(list_id, &BrowserConfirm).await {
                Ok(_) => ctx.sync_selection(),
                Err(e) => log::error!("delete list {} failed: {}", list_id, e),
            }
        });
    };

    let on_add_task = Callback::new(move |text: String| {
        let board = ctx.board();
        spawn_local(async move {
            dialogs::report("add task", board.add_task(&text).await);
        });
    });

    let task_rows = tasks
        .into_iter()
        .map(|task| {
            let id = task.id;
            let on_toggle = Callback::new(move |completed: bool| {
                let board = ctx.board();
                spawn_local(async move {
                    dialogs::report("toggle task", board.toggle_task(id, completed, &BrowserConfirm).await);
                });
            });
            let on_delete = Callback::new(move |_: ()| {
                let board = ctx.board();
                spawn_local(async move {
                    dialogs::report("delete task", board.delete_task(id, &BrowserConfirm).await);
                });
            });
            view! { <TaskRow task=task on_toggle=on_toggle on_delete=on_delete /> }
        })
        .collect_view();

    view! {
        <div class=card_class style="text-align: center;">
            <h3 style="cursor: pointer;" on:click=move |_| ctx.select(list_id)>
                {list.name}
            </h3>
            {deletable.then(|| view! {
                <button
                    class="material-icons delete-button"
                    title="Delete list"
                    on:click=on_delete_list
                >
                    "delete"
                </button>
            })}
            <ProgressRing progress=progress />
            {selected.then(move || view! {
                <NewTaskForm on_add=on_add_task />
                <div class="card-content">{task_rows}</div>
            })}
        </div>
    }
}
