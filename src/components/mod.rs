//! UI Components
//!
//! Leptos components rendering the app store.

mod item_list;
mod item_row;
mod item_dialog;
mod delete_confirm_dialog;
mod error_banner;

pub use item_list::ItemList;
pub use item_row::ItemRow;
pub use item_dialog::ItemDialog;
pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use error_banner::ErrorBanner;
