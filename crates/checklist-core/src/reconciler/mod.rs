//! View Reconciler Layer
//!
//! Intent handling and snapshot ownership for the presentation layer.

mod state;
mod validation;
mod view;


pub use state::{EditTarget, Editor, IntentKind, Phase, ViewState};
pub use validation::validate_text;
pub use view::ViewReconciler;
