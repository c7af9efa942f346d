use persisted::{KeyValueStore, ListenerKey, Persisted, StoreError};
use std::cell::RefCell;

/// `localStorage` key holding the current player's id.
pub const USER_ID_KEY: &str = "userId";

/// The current user id, mirrored into `store` under [`USER_ID_KEY`].
///
/// An empty string means nobody is logged in.
pub struct UserId<S> {
    // never hold this borrow while listeners run; they're allowed to read the id again
    inner: RefCell<Persisted<S>>,
}

impl<S: KeyValueStore> UserId<S> {
    pub fn load(store: S) -> Result<Self, StoreError> {
        Ok(Self {
            inner: RefCell::new(Persisted::load(store, USER_ID_KEY)?),
        })
    }

    pub fn get(&self) -> String {
        self.inner.borrow().get().to_string()
    }

    /// Whitespace is trimmed; a blank id logs the user out and clears storage.
    pub fn set(&self, id: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().set(id)?;
        log::info!("User id set (logged in: {})", !self.get().is_empty());
        self.flush_notifications();
        Ok(())
    }

    /// Feeds a `storage` event from another tab.
    pub fn apply_storage_change(&self, key: Option<&str>, new_value: Option<&str>) {
        let applied = self
            .inner
            .borrow_mut()
            .apply_storage_change(key, new_value);
        if applied {
            log::debug!("User id changed in another tab");
            self.flush_notifications();
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&str) + 'static) -> ListenerKey {
        self.inner.borrow_mut().register_listener(listener)
    }

    pub fn unsubscribe(&self, key: ListenerKey) {
        self.inner.borrow_mut().unregister_listener(key)
    }

    fn flush_notifications(&self) {
        // do it like this to avoid holding the borrow while we call the listeners
        let due = self.inner.borrow_mut().drain_due_notifications();
        if let Some(notification) = due {
            notification.dispatch();
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::UserId;
    use persisted::ListenerKey;
    use persisted::web::{StorageEventSubscription, local_storage};
    use std::cell::OnceCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::Storage;

    fn to_js(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// The user id backed by `localStorage`, kept current when other tabs change it.
    #[wasm_bindgen]
    pub struct UserIdStore {
        user_id: Rc<UserId<Storage>>,
        _subscription: StorageEventSubscription,
    }

    #[wasm_bindgen]
    impl UserIdStore {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<UserIdStore, JsValue> {
            crate::init_logging();

            let storage = local_storage().map_err(to_js)?;
            let user_id = Rc::new(UserId::load(storage).map_err(to_js)?);

            let weak = Rc::downgrade(&user_id);
            let subscription = StorageEventSubscription::new(move |key, new_value| {
                if let Some(user_id) = weak.upgrade() {
                    user_id.apply_storage_change(key.as_deref(), new_value.as_deref());
                }
            })
            .map_err(to_js)?;

            Ok(Self {
                user_id,
                _subscription: subscription,
            })
        }

        pub fn get_user_id(&self) -> String {
            self.user_id.get()
        }

        pub fn set_user_id(&self, id: Option<String>) -> Result<(), JsValue> {
            self.user_id
                .set(id.as_deref().unwrap_or_default())
                .map_err(to_js)
        }

        /// `callback` receives the new id (empty when logged out) after every change.
        pub fn subscribe(&self, callback: js_sys::Function) -> ListenerKey {
            self.user_id.subscribe(move |id| {
                let _ = callback.call1(&JsValue::null(), &JsValue::from_str(id));
            })
        }

        pub fn unsubscribe(&self, key: ListenerKey) {
            self.user_id.unsubscribe(key)
        }
    }

    thread_local! {
        static SHARED: OnceCell<UserIdStore> = const { OnceCell::new() };
    }

    fn with_shared<R>(f: impl FnOnce(&UserIdStore) -> R) -> Result<R, JsValue> {
        SHARED.with(|cell| {
            if cell.get().is_none() {
                let _ = cell.set(UserIdStore::new()?);
            }
            cell.get()
                .map(f)
                .ok_or_else(|| JsValue::from_str("user id store is unavailable"))
        })
    }

    #[wasm_bindgen(js_name = getUserId)]
    pub fn get_user_id() -> Result<String, JsValue> {
        with_shared(|store| store.get_user_id())
    }

    #[wasm_bindgen(js_name = setUserId)]
    pub fn set_user_id(id: Option<String>) -> Result<(), JsValue> {
        with_shared(|store| store.set_user_id(id))?
    }

    #[wasm_bindgen(js_name = subscribeUserId)]
    pub fn subscribe_user_id(callback: js_sys::Function) -> Result<ListenerKey, JsValue> {
        with_shared(|store| store.subscribe(callback))
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::UserIdStore;
