//! View Reconciler
//!
//! Turns user intents into store calls and owns the snapshot the
//! presentation layer renders. Store calls are single-flight: each one holds
//! a FIFO lock for its whole duration, so an intent raised while another is
//! pending waits and then runs against the refreshed state.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{RefreshStrategy, ViewConfig};
use crate::domain::{DomainError, DomainResult, Item, ItemId, ItemPatch};
use crate::repository::{ItemStore, Repository};
use super::state::{EditTarget, Editor, IntentKind, Mutation, Phase, ViewState};
use super::validation::validate_text;

pub struct ViewReconciler<S> {
    store: Arc<S>,
    config: ViewConfig,
    state: Mutex<ViewState>,
    flight: tokio::sync::Mutex<()>,
}

impl<S: ItemStore> ViewReconciler<S> {
    pub fn new(store: Arc<S>, config: ViewConfig) -> Self {
        Self {
            store,
            config,
            state: Mutex::new(ViewState::default()),
            flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    // Never held across an await.
    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current view state
    pub fn view(&self) -> ViewState {
        self.state().clone()
    }

    /// Copy of the current snapshot
    pub fn items(&self) -> Vec<Item> {
        self.state().items.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    fn fail(&self, err: DomainError) -> DomainError {
        self.state().last_error = Some(err.clone());
        err
    }

    /// Replace the snapshot with what the store holds
    ///
    /// An unreadable payload empties the snapshot and reports `CorruptState`;
    /// any other failure leaves the snapshot as it was.
    pub async fn load(&self) -> DomainResult<Vec<Item>> {
        let _flight = self.flight.lock().await;
        self.state().phase = Phase::Pending(IntentKind::Load);

        let result = self.store.list().await;

        let mut state = self.state();
        state.phase = Phase::Idle;
        match result {
            Ok(items) => {
                state.items = items.clone();
                state.last_error = None;
                Ok(items)
            }
            Err(err) => {
                if err.is_corrupt_state() {
                    log::warn!("Stored items are unreadable, showing an empty list: {}", err);
                    state.items.clear();
                } else {
                    log::warn!("Loading items failed: {}", err);
                }
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    // ========================
    // Editor intents
    // ========================

    /// Open the editor for a new item
    ///
    /// Refused while the stored payload is known to be unreadable: `reset`
    /// is the only way to discard it.
    pub fn open_create(&self) -> DomainResult<()> {
        let mut state = self.state();
        ensure_readable(&state)?;
        state.editor = Some(Editor {
            target: EditTarget::New,
            draft: String::new(),
        });
        Ok(())
    }

    /// Open the editor on an existing item, pre-filled with its text
    pub fn open_edit(&self, id: ItemId) -> DomainResult<()> {
        let mut state = self.state();
        let item = match state.item(id) {
            Some(item) => item.clone(),
            None => return Err(DomainError::NotFound(format!("item {}", id))),
        };
        if item.checked && !self.config.allow_edit_checked {
            return Err(DomainError::InvalidInput("checked items cannot be edited".to_string()));
        }
        state.editor = Some(Editor {
            target: EditTarget::Existing(id),
            draft: item.text,
        });
        Ok(())
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        if let Some(editor) = self.state().editor.as_mut() {
            editor.draft = text.into();
        }
    }

    pub fn cancel_edit(&self) {
        self.state().editor = None;
    }

    /// Save the open editor
    ///
    /// New items start unchecked; edits replace the text and keep `checked`.
    /// The editor closes only when the store call succeeds. The editor is read
    /// after the flight gate is taken, so a save queued behind another one
    /// finds the editor already closed and creates nothing.
    pub async fn save(&self) -> DomainResult<Vec<Item>> {
        let _flight = self.flight.lock().await;
        let editor = self
            .state()
            .editor
            .clone()
            .ok_or_else(|| DomainError::InvalidInput("no item is being edited".to_string()))?;
        if editor.is_new() {
            ensure_readable(&self.state())?;
        }
        let text = validate_text(&editor.draft, self.config.max_text_len).map_err(|e| self.fail(e))?;

        let target = editor.target;
        let items = self
            .mutate(IntentKind::Save, move |store| async move {
                match target {
                    EditTarget::New => store.create(&Item::new(0, text)).await.map(Mutation::Created),
                    EditTarget::Existing(id) => {
                        store.patch(id, &ItemPatch::text(text)).await.map(Mutation::Replaced)
                    }
                }
            })
            .await?;

        let mut state = self.state();
        if state.editor.as_ref().map(|e| e.target) == Some(target) {
            state.editor = None;
        }
        Ok(items)
    }

    // ========================
    // Item intents
    // ========================

    /// Flip `checked` on one item
    pub async fn toggle(&self, id: ItemId) -> DomainResult<Vec<Item>> {
        self.run(IntentKind::Toggle, move |store| async move {
            store.toggle(id).await.map(Mutation::Replaced)
        })
        .await
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&self, id: ItemId) -> DomainResult<()> {
        let mut state = self.state();
        if state.item(id).is_none() {
            return Err(DomainError::NotFound(format!("item {}", id)));
        }
        state.pending_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&self) {
        self.state().pending_delete = None;
    }

    /// Delete the item awaiting confirmation
    ///
    /// On failure the confirmation stays open.
    pub async fn confirm_delete(&self) -> DomainResult<Vec<Item>> {
        let _flight = self.flight.lock().await;
        let id = self
            .state()
            .pending_delete
            .ok_or_else(|| DomainError::InvalidInput("no delete awaiting confirmation".to_string()))?;

        let items = self
            .mutate(IntentKind::Delete, move |store| async move {
                store.delete(id).await.map(|()| Mutation::Deleted(id))
            })
            .await?;

        let mut state = self.state();
        if state.pending_delete == Some(id) {
            state.pending_delete = None;
        }
        Ok(items)
    }

    /// Discard the stored payload, readable or not
    pub async fn reset(&self) -> DomainResult<Vec<Item>> {
        self.run(IntentKind::Reset, |store| async move {
            store.reset().await.map(|()| Mutation::Cleared)
        })
        .await
    }

    /// Run one store mutation and refresh the snapshot
    async fn run<F, Fut>(&self, kind: IntentKind, op: F) -> DomainResult<Vec<Item>>
    where
        F: FnOnce(Arc<S>) -> Fut,
        Fut: Future<Output = DomainResult<Mutation>>,
    {
        let _flight = self.flight.lock().await;
        self.mutate(kind, op).await
    }

    /// Body of `run`; the caller holds the flight gate
    async fn mutate<F, Fut>(&self, kind: IntentKind, op: F) -> DomainResult<Vec<Item>>
    where
        F: FnOnce(Arc<S>) -> Fut,
        Fut: Future<Output = DomainResult<Mutation>>,
    {
        self.state().phase = Phase::Pending(kind);
        log::debug!("{:?} started", kind);

        let mutation = match op(Arc::clone(&self.store)).await {
            Ok(mutation) => mutation,
            Err(err) => {
                log::warn!("{:?} failed: {}", kind, err);
                let mut state = self.state();
                state.phase = Phase::Idle;
                state.last_error = Some(err.clone());
                return Err(err);
            }
        };

        let reloaded = match self.config.refresh {
            RefreshStrategy::Reload => match self.store.list().await {
                Ok(items) => Some(items),
                Err(err) => {
                    log::warn!("Reload after {:?} failed, projecting locally: {}", kind, err);
                    None
                }
            },
            RefreshStrategy::Project => None,
        };

        let mut state = self.state();
        let items = match reloaded {
            Some(items) => items,
            None => {
                let mut items = state.items.clone();
                mutation.project(&mut items, self.store.order());
                items
            }
        };
        state.items = items.clone();
        state.phase = Phase::Idle;
        state.last_error = None;
        log::debug!("{:?} done, {} items", kind, items.len());
        Ok(items)
    }
}

fn ensure_readable(state: &ViewState) -> DomainResult<()> {
    match &state.last_error {
        Some(err) if err.is_corrupt_state() => Err(DomainError::InvalidInput(
            "stored items are unreadable; discard them before adding new ones".to_string(),
        )),
        _ => Ok(()),
    }
}
