//! JSON-file collection store.
//!
//! One pretty-printed UTF-8 JSON array per collection. Writes go to a
//! uniquely named sibling temp file which is then renamed over the target, so
//! readers never observe a partial file.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::r#trait::{CollectionStore, StoreError};

#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }
}

impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn replace_all(&self, items: &[T]) -> Result<(), StoreError> {
        write_json_atomic(&self.path, items)?;
        debug!(path = %self.path.display(), records = items.len(), "collection replaced");
        Ok(())
    }
}

/// Serialize `value` next to `path` and rename it into place.
///
/// On failure the temp file is removed (best effort) and the original file is
/// left as it was.
pub(crate) fn write_json_atomic<V>(path: &Path, value: &V) -> Result<(), StoreError>
where
    V: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| StoreError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(format!(".tmp.{}", Uuid::new_v4()));
    let tmp_path = PathBuf::from(tmp_name);

    let result = fs::write(&tmp_path, &bytes).and_then(|()| fs::rename(&tmp_path, path));

    if let Err(source) = result {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            if cleanup.kind() != ErrorKind::NotFound {
                warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove temp file");
            }
        }
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}
