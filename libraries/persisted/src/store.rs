use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// String-to-string storage with the shape of the browser's `Storage` interface.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same map, which is how two "tabs" share one storage
/// area in tests and in non-browser builds.
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
}

impl MemoryStore {
    /// Makes every subsequent write fail, like a browser with a full quota.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only.get() {
            return Err(StoreError::Operation("store is read-only".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
