use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Storage, StorageEvent, Window};

use crate::{KeyValueStore, StoreError};

fn js_error(e: JsValue) -> StoreError {
    StoreError::Operation(format!("{e:?}"))
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.remove_item(key).map_err(js_error)
    }
}

/// The window's `localStorage`. Fails outside a window context or when storage is disabled.
pub fn local_storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .ok_or(StoreError::Unavailable)?
        .local_storage()
        .map_err(js_error)?
        .ok_or(StoreError::Unavailable)
}

/// Keeps a `storage` event listener installed on the window for as long as it lives.
///
/// The browser only fires `storage` in tabs other than the one that made the write.
pub struct StorageEventSubscription {
    window: Window,
    closure: Closure<dyn FnMut(StorageEvent)>,
}

impl StorageEventSubscription {
    /// `on_change` receives the changed key (`None` for `clear()`) and the new value
    /// (`None` when the entry was removed).
    pub fn new(
        mut on_change: impl FnMut(Option<String>, Option<String>) + 'static,
    ) -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        let closure = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
            on_change(event.key(), event.new_value());
        });
        window
            .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self { window, closure })
    }
}

impl Drop for StorageEventSubscription {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("storage", self.closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to remove storage listener: {e:?}");
        }
    }
}
