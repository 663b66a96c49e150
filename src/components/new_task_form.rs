//! New Task Form Component
//!
//! Text input plus "Add" button. Clears itself after submitting.

use leptos::prelude::*;

#[component]
pub fn NewTaskForm(#[prop(into)] on_add: Callback<String>) -> impl IntoView {
    let (new_text, set_new_text) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get();
        if text.trim().is_empty() { return; }
        on_add.run(text);
        set_new_text.set(String::new());
    };

    view! {
        <form class="add-item-form" on:submit=submit>
            <input
                type="text"
                placeholder="Add todo item..."
                required=true
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
            <button type="submit" class="waves-effect btn teal">"Add"</button>
        </form>
    }
}
