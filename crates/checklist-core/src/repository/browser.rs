//! Browser localStorage Backend

use wasm_bindgen::JsCast;

use super::storage::{KeyValueStorage, StorageError};

/// `window.localStorage`
///
/// Looked up on every call; holds no JS handles, so it is `Send + Sync` and
/// degrades to `StorageError::Unavailable` outside a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        if !cfg!(target_arch = "wasm32") {
            return Err(StorageError::Unavailable("not running in a browser".to_string()));
        }
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

/// Map a thrown DOMException to a storage error
fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(dom) if dom.name() == "QuotaExceededError" => StorageError::QuotaExceeded(dom.message()),
        Some(dom) => StorageError::Unavailable(format!("{}: {}", dom.name(), dom.message())),
        None => StorageError::Unavailable(format!("{:?}", err)),
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::local_storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::local_storage()?.remove_item(key).map_err(js_error)
    }
}
