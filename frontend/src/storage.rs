use shared::error::WheelError;
use shared::play_history::{KeyValueStore, MemoryStore};
use web_sys::{window, Storage};

/// `localStorage`, or an in-memory map when the browser refuses access
/// (private mode, storage disabled). The memory fallback lasts for the page.
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn new() -> Self {
        match window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => BrowserStore::Local(storage),
            None => {
                log::warn!("localStorage unavailable, play history will not survive a reload");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl Default for BrowserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, WheelError> {
        match self {
            BrowserStore::Local(storage) => storage
                .get_item(key)
                .map_err(|e| WheelError::Storage(format!("read {} failed: {:?}", key, e))),
            BrowserStore::Memory(memory) => memory.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WheelError> {
        match self {
            BrowserStore::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| WheelError::Storage(format!("write {} failed: {:?}", key, e))),
            BrowserStore::Memory(memory) => memory.set_item(key, value),
        }
    }
}
