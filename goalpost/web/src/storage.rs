//! Browser `localStorage` backend for the board.

use gloo_storage::{LocalStorage, Storage};
use goalpost_core::{Board, KeyValueStore, StorageError};
use wasm_bindgen::JsValue;

/// Raw string access to `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

fn backend_error(err: JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

impl KeyValueStore for BrowserStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw().get_item(key).map_err(backend_error)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(backend_error)
    }
}

/// Loads the board; a list that cannot be read starts empty on its own.
pub fn open_board() -> Board<BrowserStore> {
    Board::open_lenient(BrowserStore)
}
