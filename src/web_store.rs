//! Browser Store
//!
//! `window.localStorage` as the backend of a snapshot-persisted engine.

use std::sync::Arc;
use wasm_bindgen::JsValue;

use ringlist_core::{DomainError, DomainResult, SnapshotBackend, SnapshotStore, StoreConfig, TodoDb};

/// Stateless handle; the `Storage` object is looked up per call
pub struct LocalStorage;

impl SnapshotBackend for LocalStorage {
    fn read(&self, key: &str) -> DomainResult<Option<String>> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn write(&self, key: &str, value: &str) -> DomainResult<()> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }
}

/// Open the named database on top of `localStorage`
pub fn open_db(name: &str) -> DomainResult<TodoDb> {
    let config = StoreConfig::in_memory(name);
    config.validate()?;
    let store = SnapshotStore::open(config.storage_key(), LocalStorage)?;
    Ok(TodoDb::with_store(name, Arc::new(store)))
}

fn local_storage() -> DomainResult<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| DomainError::Internal("no window".into()))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| DomainError::Internal("localStorage unavailable".into()))
}

fn js_error(e: JsValue) -> DomainError {
    DomainError::Internal(format!("{:?}", e))
}
