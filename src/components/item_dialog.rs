//! Item Dialog Component
//!
//! Add/edit dialog bound to the reconciler's editor.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ItemDialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let title = move || {
        let is_new = store.editor().with(|editor| editor.as_ref().map_or(true, |e| e.is_new()));
        if is_new { "Add New Todo" } else { "Edit Todo" }
    };
    let draft = move || store.editor().with(|editor| editor.as_ref().map(|e| e.draft.clone()).unwrap_or_default());
    let save = move || {
        if !store.pending().get_untracked() {
            ctx.dispatch(|r| async move { r.save().await });
        }
    };
    let cancel = move || ctx.apply(|r| {
        r.cancel_edit();
        Ok(())
    });

    view! {
        <Show when=move || store.editor().with(|editor| editor.is_some())>
            <div class="dialog-backdrop">
                <div class="dialog" role="dialog">
                    <h2 class="dialog-title">{title}</h2>
                    <input
                        type="text"
                        placeholder="Name"
                        autofocus=true
                        prop:value=draft
                        on:input=move |ev| ctx.set_draft(event_target_value(&ev))
                        on:keydown=move |ev| {
                            match ev.key().as_str() {
                                "Enter" => save(),
                                "Escape" => cancel(),
                                _ => {}
                            }
                        }
                    />
                    <div class="dialog-actions">
                        <button class="cancel-btn" on:click=move |_| cancel()>"Cancel"</button>
                        <button
                            class="save-btn"
                            disabled=move || store.pending().get()
                            on:click=move |_| save()
                        >
                            "Save"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
