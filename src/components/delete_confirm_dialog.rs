//! Delete Confirm Dialog Component
//!
//! Shown while an item awaits delete confirmation.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DeleteConfirmDialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    view! {
        <Show when=move || store.pending_delete().get().is_some()>
            <div class="dialog-backdrop">
                <div class="dialog" role="alertdialog">
                    <h2 class="dialog-title">"Confirm Delete"</h2>
                    <p>"Are you sure you want to delete this todo?"</p>
                    <div class="dialog-actions">
                        <button
                            class="cancel-btn"
                            on:click=move |_| ctx.apply(|r| {
                                r.cancel_delete();
                                Ok(())
                            })
                        >
                            "Cancel"
                        </button>
                        <button
                            class="confirm-btn"
                            disabled=move || store.pending().get()
                            on:click=move |_| ctx.dispatch(|r| async move { r.confirm_delete().await })
                        >
                            "Delete"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
