use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// A durable collection of flat records.
///
/// Implementations must make `replace_all` atomic with respect to `load_all`:
/// a concurrent reader observes either the previous or the new collection,
/// never a mix.
pub trait CollectionStore<T>: Send + Sync {
    /// Load the full collection. A collection that was never written is empty.
    fn load_all(&self) -> Result<Vec<T>, StoreError>;

    /// Replace the full collection.
    fn replace_all(&self, items: &[T]) -> Result<(), StoreError>;
}

impl<T, S> CollectionStore<T> for Arc<S>
where
    S: CollectionStore<T> + ?Sized,
{
    fn load_all(&self) -> Result<Vec<T>, StoreError> {
        (**self).load_all()
    }

    fn replace_all(&self, items: &[T]) -> Result<(), StoreError> {
        (**self).replace_all(items)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed collection {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode collection {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Backend refused the operation (poisoned lock, writes disabled, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
