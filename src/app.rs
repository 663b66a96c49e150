//! ringlist Frontend App
//!
//! Opens the browser database and mounts the board (default) or the
//! single-list variant (`single-list` feature).

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use ringlist_core::{
    BoardController, BoardView, ListId, Progress, SingleListController, Task, TaskList, TodoDb,
    ADD_LIST_PROMPT,
};

use crate::components::{NewTaskForm, ProgressRing, TaskRow, TodoListCard};
use crate::context::AppContext;
use crate::dialogs::{self, BrowserConfirm};
use crate::web_store;

#[cfg(not(feature = "single-list"))]
const DB_NAME: &str = ringlist_core::BOARD_DB_NAME;
#[cfg(feature = "single-list")]
const DB_NAME: &str = ringlist_core::SINGLE_LIST_DB_NAME;

#[component]
pub fn App() -> impl IntoView {
    let db = match web_store::open_db(DB_NAME) {
        Ok(db) => db,
        Err(e) => {
            log::error!("could not open '{}': {}", DB_NAME, e);
            return view! {
                <p class="error">{format!("Could not open the to-do database: {}", e)}</p>
            }
            .into_any();
        }
    };

    let closing = db.clone();
    on_cleanup(move || {
        spawn_local(async move {
            if let Err(e) = closing.close().await {
                log::warn!("closing database failed: {}", e);
            }
        });
    });

    mount_variant(db)
}

#[cfg(not(feature = "single-list"))]
fn mount_variant(db: TodoDb) -> AnyView {
    view! { <BoardApp db=db /> }.into_any()
}

#[cfg(feature = "single-list")]
fn mount_variant(db: TodoDb) -> AnyView {
    view! { <SingleListApp db=db /> }.into_any()
}

/// Multi-list board
#[component]
pub fn BoardApp(db: TodoDb) -> impl IntoView {
    let board = Arc::new(BoardController::new(db.clone()));

    // Live query results; None until the first delivery
    let (lists, set_lists) = signal(None::<Vec<TaskList>>);
    let (tasks, set_tasks) = signal(None::<Vec<Task>>);
    let (selected, set_selected) = signal(None::<ListId>);

    let ctx = AppContext::new(board.clone(), (selected, set_selected));
    provide_context(ctx);

    // Lists: every delivery re-aligns the selection
    let mut lists_query = db.live_lists();
    let lists_board = board.clone();
    spawn_local(async move {
        while let Some(result) = lists_query.next().await {
            match result {
                Ok(delivered) => {
                    lists_board.reconcile_selection(&delivered);
                    if set_lists.try_set(Some(delivered)).is_some() {
                        // Unmounted: drop the subscription
                        break;
                    }
                    ctx.sync_selection();
                }
                Err(e) => log::error!("lists query failed: {}", e),
            }
        }
    });

    let mut tasks_query = db.live_tasks();
    spawn_local(async move {
        while let Some(result) = tasks_query.next().await {
            match result {
                Ok(delivered) => {
                    if set_tasks.try_set(Some(delivered)).is_some() {
                        break;
                    }
                }
                Err(e) => log::error!("tasks query failed: {}", e),
            }
        }
    });

    let board_view = Memo::new(move |_| match (lists.get(), tasks.get()) {
        (Some(lists), Some(tasks)) => Some(BoardView::build(&lists, &tasks, selected.get())),
        _ => None,
    });

    let on_add_list = move |_| {
        let response = dialogs::prompt(ADD_LIST_PROMPT);
        let board = ctx.board();
        spawn_local(async move {
            match board.add_list(response.as_deref()).await {
                Ok(_) => ctx.sync_selection(),
                Err(e) => log::error!("add list failed: {}", e),
            }
        });
    };

    view! {
        <div
            class="task-tracker-container"
            style="display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh;"
        >
            <button class="waves-effect btn teal" on:click=on_add_list>"Add Another List"</button>
            {move || match board_view.get() {
                Some(board) => board
                    .cards
                    .into_iter()
                    .map(|card| view! { <TodoListCard card=card /> })
                    .collect_view()
                    .into_any(),
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
            }}
        </div>
    }
}

/// One implicit list of tasks
#[component]
pub fn SingleListApp(db: TodoDb) -> impl IntoView {
    let single = StoredValue::new(Arc::new(SingleListController::new(db.clone())));
    let (tasks, set_tasks) = signal(None::<Vec<Task>>);

    let mut tasks_query = db.live_tasks();
    spawn_local(async move {
        while let Some(result) = tasks_query.next().await {
            match result {
                Ok(delivered) => {
                    if set_tasks.try_set(Some(delivered)).is_some() {
                        break;
                    }
                }
                Err(e) => log::error!("tasks query failed: {}", e),
            }
        }
    });

    let on_add_task = Callback::new(move |text: String| {
        let single = single.get_value();
        spawn_local(async move {
            dialogs::report("add task", single.add_task(&text).await);
        });
    });

    let task_rows = move || {
        tasks
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|task| {
                let id = task.id;
                let on_toggle = Callback::new(move |completed: bool| {
                    let single = single.get_value();
                    spawn_local(async move {
                        dialogs::report("toggle task", single.toggle_task(id, completed, &BrowserConfirm).await);
                    });
                });
                let on_delete = Callback::new(move |_: ()| {
                    let single = single.get_value();
                    spawn_local(async move {
                        dialogs::report("delete task", single.delete_task(id, &BrowserConfirm).await);
                    });
                });
                view! { <TaskRow task=task on_toggle=on_toggle on_delete=on_delete /> }
            })
            .collect_view()
    };

    view! {
        <div
            class="task-tracker-container"
            style="display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh;"
        >
            <div class="todo-list" style="text-align: center;">
                <h3>"To-Do"</h3>
                {move || tasks.get().map(|tasks| {
                    let progress = Progress::of(&tasks);
                    view! { <ProgressRing progress=progress /> }
                })}
                <NewTaskForm on_add=on_add_task />
                <div class="card-content">{task_rows}</div>
            </div>
        </div>
    }
}
