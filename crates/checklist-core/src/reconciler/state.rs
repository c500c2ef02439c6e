//! Presentation-facing view state

use crate::config::ListOrder;
use crate::domain::{DomainError, Item, ItemId};

/// User intents that reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Load,
    Save,
    Toggle,
    Delete,
    Reset,
}

/// Whether a store call is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending(IntentKind),
}

/// What the open editor will save to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(ItemId),
}

/// An open add/edit dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub target: EditTarget,
    /// Text as typed, untrimmed
    pub draft: String,
}

impl Editor {
    pub fn is_new(&self) -> bool {
        self.target == EditTarget::New
    }
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Snapshot of the stored items, in store order
    pub items: Vec<Item>,
    pub phase: Phase,
    pub editor: Option<Editor>,
    /// Item awaiting delete confirmation
    pub pending_delete: Option<ItemId>,
    pub last_error: Option<DomainError>,
}

impl ViewState {
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending(_))
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// A completed store mutation, replayable onto a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mutation {
    Created(Item),
    Replaced(Item),
    Deleted(ItemId),
    Cleared,
}

impl Mutation {
    /// Apply to `items` the way the store applied it to the payload
    pub(crate) fn project(self, items: &mut Vec<Item>, order: ListOrder) {
        match self {
            Mutation::Created(item) => match order {
                ListOrder::NewestFirst => items.insert(0, item),
                ListOrder::InsertionOrder => items.push(item),
            },
            Mutation::Replaced(item) => {
                if let Some(slot) = items.iter_mut().find(|slot| slot.id == item.id) {
                    *slot = item;
                }
            }
            Mutation::Deleted(id) => items.retain(|item| item.id != id),
            Mutation::Cleared => items.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![Item::new(2, "b"), Item::new(1, "a")]
    }

    #[test]
    fn project_created_respects_order() {
        let mut newest = items();
        Mutation::Created(Item::new(3, "c")).project(&mut newest, ListOrder::NewestFirst);
        assert_eq!(newest[0].id, 3);

        let mut inserted = items();
        Mutation::Created(Item::new(3, "c")).project(&mut inserted, ListOrder::InsertionOrder);
        assert_eq!(inserted[2].id, 3);
    }

    #[test]
    fn project_replaced_and_deleted() {
        let mut list = items();
        Mutation::Replaced(Item::new(1, "a").toggled()).project(&mut list, ListOrder::NewestFirst);
        assert!(list[1].checked);

        Mutation::Deleted(2).project(&mut list, ListOrder::NewestFirst);
        assert_eq!(list.len(), 1);
        Mutation::Deleted(2).project(&mut list, ListOrder::NewestFirst);
        assert_eq!(list.len(), 1);

        Mutation::Cleared.project(&mut list, ListOrder::NewestFirst);
        assert!(list.is_empty());
    }

    #[test]
    fn default_state_is_idle_and_empty() {
        let state = ViewState::default();
        assert!(!state.is_pending());
        assert!(state.items.is_empty());
        assert!(state.editor.is_none());
        assert!(state.item(1).is_none());
    }
}
