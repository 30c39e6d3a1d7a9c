//! Whole-collection storage boundary (the ledger store).
//!
//! Every collection is read in full and replaced in full. There is no
//! partial-record API, so a reader always sees one consistent snapshot.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use r#trait::{CollectionStore, StoreError};
