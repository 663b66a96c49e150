//! Task Row Component
//!
//! Checkbox, description and delete icon for one task.

use leptos::prelude::*;
use ringlist_core::Task;

/// A single task row
///
/// The checkbox does not flip on its own: the click is cancelled and the
/// requested state goes through `on_toggle`, so a declined confirmation
/// leaves the box as it was.
#[component]
pub fn TaskRow(
    task: Task,
    #[prop(into)] on_toggle: Callback<bool>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let completed = task.completed;
    let text_class = if completed { "black-text strike-text" } else { "black-text" };

    view! {
        <div class="task-row">
            <label>
                <input
                    type="checkbox"
                    prop:checked=completed
                    on:click=move |ev| {
                        ev.prevent_default();
                        on_toggle.run(!completed);
                    }
                />
                <span class=text_class>
                    {task.task}
                </span>
            </label>
            <button
                class="material-icons delete-button"
                title="Delete task"
                on:click=move |_| on_delete.run(())
            >
                "delete"
            </button>
        </div>
    }
}
