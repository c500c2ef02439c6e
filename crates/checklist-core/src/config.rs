//! Store and view configuration
//!
//! Both halves deserialize with per-field defaults, so a partial JSON document
//! (or none at all) yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::repository::KeyValueStorage;

/// Storage key the app has always used for its items
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Upper bound on item text, in characters
pub const DEFAULT_MAX_TEXT_LEN: usize = 100;

/// Where newly created items land in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// New items are prepended
    #[default]
    NewestFirst,
    /// New items are appended
    InsertionOrder,
}

/// How new item ids are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Wall-clock milliseconds, bumped past anything already issued
    #[default]
    Timestamp,
    /// One past the highest id seen
    Sequential,
}

/// How the reconciler refreshes its snapshot after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStrategy {
    /// Re-read the store; fall back to local projection if the read fails
    #[default]
    Reload,
    /// Apply the mutation to the prior snapshot without re-reading
    Project,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_max_text_len() -> usize {
    DEFAULT_MAX_TEXT_LEN
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    pub order: ListOrder,
    pub id_strategy: IdStrategy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            order: ListOrder::default(),
            id_strategy: IdStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Upper bound on item text, in characters, after trimming
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
    /// Whether checked items may be opened for editing
    pub allow_edit_checked: bool,
    pub refresh: RefreshStrategy,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_text_len: default_max_text_len(),
            allow_edit_checked: false,
            refresh: RefreshStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistConfig {
    pub store: StoreConfig,
    pub view: ViewConfig,
}

impl ChecklistConfig {
    /// Storage key under which the config itself is persisted
    pub fn config_key(storage_key: &str) -> String {
        format!("{}.config", storage_key)
    }

    /// Load the persisted config, falling back to defaults
    ///
    /// A missing, unreadable or malformed config is never fatal.
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Self {
        let key = Self::config_key(DEFAULT_STORAGE_KEY);
        match storage.get_item(&key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring malformed config under '{}': {}", key, e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not read config under '{}': {}", key, e);
                Self::default()
            }
        }
    }
}
