//! Error Banner Component
//!
//! Shows the last failed intent. Unreadable stored data gets an explicit
//! discard action; nothing is thrown away without it.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    move || {
        store.error().get().map(|err| {
            let corrupt = err.is_corrupt_state();
            view! {
                <div class="error-banner" role="alert">
                    <span>{err.to_string()}</span>
                    {corrupt.then(|| view! {
                        <button
                            class="reset-btn"
                            on:click=move |_| ctx.dispatch(|r| async move { r.reset().await })
                        >
                            "Discard unreadable data"
                        </button>
                    })}
                </div>
            }
        })
    }
}
