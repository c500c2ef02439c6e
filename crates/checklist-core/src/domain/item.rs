//! Item Entity
//!
//! A single list entry with identity, text, and completion flag.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Item identifier
///
/// Signed 64-bit so clock-derived ids (milliseconds) fit alongside the small
/// positional ids handed out by legacy migration.
pub type ItemId = i64;

/// A checklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned by the store
    pub id: ItemId,
    /// Item text content
    pub text: String,
    /// Completion status
    pub checked: bool,
}

impl Item {
    /// Create a new unchecked item
    ///
    /// The id is a placeholder until the store assigns one on create.
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            checked: false,
        }
    }

    /// Return a copy with `checked` flipped
    pub fn toggled(&self) -> Self {
        Self {
            checked: !self.checked,
            ..self.clone()
        }
    }

    /// Apply a partial update, keeping fields the patch omits
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(checked) = patch.checked {
            self.checked = checked;
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Partial update for an item; `None` leaves the stored value as is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl ItemPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            checked: None,
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            text: None,
            checked: Some(checked),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.checked.is_none()
    }
}
