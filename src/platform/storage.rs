//! LocalStorage helpers (wasm only)

use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read and parse a JSON value; `None` if missing, unavailable or corrupt
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt '{}' in LocalStorage: {}", key, e);
            None
        }
    }
}

/// Serialize and store a value. Returns false if storage is unavailable.
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = local_storage() else {
        log::warn!("LocalStorage unavailable, '{}' not saved", key);
        return false;
    };
    match serde_json::to_string(value) {
        Ok(json) => storage.set_item(key, &json).is_ok(),
        Err(e) => {
            log::error!("Failed to serialize '{}': {}", key, e);
            false
        }
    }
}
