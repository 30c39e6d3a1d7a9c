use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::r#trait::{CollectionStore, StoreError};

/// In-memory collection for tests/dev.
///
/// Writes can be switched off to simulate a failing backend.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    inner: RwLock<Vec<T>>,
    reject_writes: AtomicBool,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            inner: RwLock::new(items),
            reject_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `replace_all` fail (or succeed again).
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CollectionStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync,
{
    fn load_all(&self) -> Result<Vec<T>, StoreError> {
        self.inner
            .read()
            .map(|items| items.clone())
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn replace_all(&self, items: &[T]) -> Result<(), StoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes rejected".to_string()));
        }
        let mut guard = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))?;
        *guard = items.to_vec();
        Ok(())
    }
}
