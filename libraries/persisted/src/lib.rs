//! A single string value mirrored into a key-value store.
//!
//! The in-memory copy is what readers see. Writes go to the store first and then to memory,
//! so after any write made through [`Persisted::set`] the two agree. Writes made elsewhere
//! (another browser tab, for example) reach us as storage-change notifications, which are fed
//! to [`Persisted::apply_storage_change`]. The last change observed wins.
//!
//! Listeners are never called from inside `Persisted`. Instead, changes mark the value dirty
//! and the owner drains the pending notification with [`Persisted::drain_due_notifications`]
//! once it no longer holds a borrow, so a listener is free to read the value again.

mod store;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use store::*;

use slotmap::{DefaultKey, SlotMap};
use std::rc::Rc;

pub type Listener = Rc<dyn Fn(&str)>;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen::prelude::wasm_bindgen)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ListenerKey(pub(crate) DefaultKey);

pub struct Persisted<S> {
    store: S,
    key: String,
    value: String,
    listeners: SlotMap<DefaultKey, Listener>,
    dirty: bool,
}

/// A change that listeners have not been told about yet.
pub struct Notification {
    pub value: String,
    listeners: Vec<Listener>,
}

impl Notification {
    pub fn dispatch(self) {
        for listener in self.listeners {
            listener(&self.value);
        }
    }
}

impl<S: KeyValueStore> Persisted<S> {
    /// Reads the current value for `key`. A missing entry reads as the empty string.
    pub fn load(store: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let value = store.get(&key)?.unwrap_or_default();
        log::debug!("Loaded {key:?} from storage (present: {})", !value.is_empty());
        Ok(Self {
            store,
            key,
            value,
            listeners: SlotMap::new(),
            dirty: false,
        })
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Trims `value` and stores it. An empty result removes the entry instead.
    ///
    /// If the store rejects the write, the in-memory value is left as it was.
    pub fn set(&mut self, value: &str) -> Result<(), StoreError> {
        let next = value.trim();
        if next.is_empty() {
            self.store.remove(&self.key)?;
        } else {
            self.store.set(&self.key, next)?;
        }
        self.replace(next.to_string());
        Ok(())
    }

    /// Applies a change made to the store by someone else.
    ///
    /// `key` is `None` when the whole store was cleared; like any other key that isn't ours,
    /// that is ignored. Returns whether the change was for our key.
    pub fn apply_storage_change(&mut self, key: Option<&str>, new_value: Option<&str>) -> bool {
        if key != Some(self.key.as_str()) {
            return false;
        }
        self.replace(new_value.unwrap_or_default().to_string());
        true
    }

    fn replace(&mut self, next: String) {
        if self.value != next {
            self.value = next;
            self.dirty = true;
        }
    }
}

impl<S> Persisted<S> {
    pub fn register_listener(&mut self, listener: impl Fn(&str) + 'static) -> ListenerKey {
        ListenerKey(self.listeners.insert(Rc::new(listener)))
    }

    pub fn unregister_listener(&mut self, key: ListenerKey) {
        self.listeners.remove(key.0);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Takes the pending notification, if the value changed since the last drain.
    pub fn drain_due_notifications(&mut self) -> Option<Notification> {
        if !std::mem::take(&mut self.dirty) {
            return None;
        }
        Some(Notification {
            value: self.value.clone(),
            listeners: self.listeners.values().cloned().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const KEY: &str = "userId";

    fn load(store: &MemoryStore) -> Persisted<MemoryStore> {
        Persisted::load(store.clone(), KEY).unwrap()
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = MemoryStore::default();
        let persisted = load(&store);
        assert_eq!(persisted.get(), "");
        assert!(!persisted.is_dirty());
    }

    #[test]
    fn test_load_existing() {
        let store = MemoryStore::default();
        store.set(KEY, "alice").unwrap();
        assert_eq!(load(&store).get(), "alice");
    }

    #[test]
    fn test_set_trims_before_storing() {
        let store = MemoryStore::default();
        let mut persisted = load(&store);
        persisted.set("  bob \n").unwrap();
        assert_eq!(persisted.get(), "bob");
        assert_eq!(store.get(KEY).unwrap(), Some("bob".to_string()));
    }

    #[test]
    fn test_set_blank_clears_storage() {
        let store = MemoryStore::default();
        let mut persisted = load(&store);
        persisted.set("carol").unwrap();

        persisted.set("   ").unwrap();
        assert_eq!(persisted.get(), "");
        assert_eq!(store.get(KEY).unwrap(), None);

        persisted.set("carol").unwrap();
        persisted.set("").unwrap();
        assert_eq!(store.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_memory_and_storage_in_agreement() {
        let store = MemoryStore::default();
        let mut persisted = load(&store);
        persisted.set("dave").unwrap();

        store.set_read_only(true);
        assert!(persisted.set("erin").is_err());
        assert_eq!(persisted.get(), "dave");
        assert_eq!(store.get(KEY).unwrap(), Some("dave".to_string()));
    }

    #[test]
    fn test_storage_change_for_our_key() {
        let store = MemoryStore::default();
        let mut persisted = load(&store);

        assert!(persisted.apply_storage_change(Some(KEY), Some("frank")));
        assert_eq!(persisted.get(), "frank");

        assert!(persisted.apply_storage_change(Some(KEY), None));
        assert_eq!(persisted.get(), "");
    }

    #[test]
    fn test_storage_change_for_other_keys_is_ignored() {
        let store = MemoryStore::default();
        let mut persisted = load(&store);
        persisted.set("grace").unwrap();
        persisted.drain_due_notifications();

        assert!(!persisted.apply_storage_change(Some("theme"), Some("dark")));
        assert!(!persisted.apply_storage_change(None, None));
        assert_eq!(persisted.get(), "grace");
        assert!(persisted.drain_due_notifications().is_none());
    }

    #[test]
    fn test_two_tabs_last_write_wins() {
        let shared = MemoryStore::default();
        let mut tab_a = load(&shared);
        let mut tab_b = load(&shared);

        tab_a.set("heidi").unwrap();
        tab_b.apply_storage_change(Some(KEY), shared.get(KEY).unwrap().as_deref());
        tab_b.set("ivan").unwrap();
        tab_a.apply_storage_change(Some(KEY), shared.get(KEY).unwrap().as_deref());

        assert_eq!(tab_a.get(), "ivan");
        assert_eq!(tab_b.get(), "ivan");
        assert_eq!(shared.get(KEY).unwrap(), Some("ivan".to_string()));
    }

    #[test]
    fn test_listeners_are_notified_once_per_drain() {
        let store = MemoryStore::default();
        let mut persisted = load(&store);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        persisted.register_listener(move |value| seen_clone.borrow_mut().push(value.to_string()));

        persisted.set("judy").unwrap();
        persisted.set("judy ").unwrap();
        persisted.drain_due_notifications().unwrap().dispatch();
        assert!(persisted.drain_due_notifications().is_none());

        assert_eq!(*seen.borrow(), vec!["judy".to_string()]);
    }

    #[test]
    fn test_unchanged_value_is_not_dirty() {
        let store = MemoryStore::default();
        store.set(KEY, "mallory").unwrap();
        let mut persisted = load(&store);
        persisted.set("mallory").unwrap();
        assert!(!persisted.is_dirty());
    }

    #[test]
    fn test_unregistered_listener_is_not_called() {
        let store = MemoryStore::default();
        let mut persisted = load(&store);
        let calls = Rc::new(RefCell::new(0));

        let calls_clone = calls.clone();
        let key = persisted.register_listener(move |_| *calls_clone.borrow_mut() += 1);
        persisted.unregister_listener(key);

        persisted.set("oscar").unwrap();
        persisted.drain_due_notifications().unwrap().dispatch();
        assert_eq!(*calls.borrow(), 0);
    }
}
