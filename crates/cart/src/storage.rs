//! Local-storage mirror for the cart.
//!
//! [`CartStorage`] follows the browser local-storage surface: string values
//! addressed by string keys. The cart lives under [`CART_STORAGE_KEY`] as a
//! JSON array of [`CartItem`]s.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use rocketshoes_core::CartItem;
use thiserror::Error;
use tracing::{debug, warn};

/// Key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("Corrupt storage file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key/value string storage with local-storage semantics.
pub trait CartStorage: Send + Sync {
    /// Get the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Cart Helpers
// =============================================================================

/// Read the persisted cart.
///
/// A missing key, the literal `null`, an unreadable store, or a value that is
/// not a cart all yield an empty cart. The stored value is not touched.
pub fn load_cart(storage: &impl CartStorage) -> Vec<CartItem> {
    let raw = match storage.get_item(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read cart from storage, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<CartItem>>>(&raw) {
        Ok(items) => {
            let items = items.unwrap_or_default();
            debug!(items = items.len(), "Loaded cart from storage");
            items
        }
        Err(e) => {
            warn!(error = %e, "Stored cart is not valid JSON, starting empty");
            Vec::new()
        }
    }
}

/// Persist the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be serialized or written.
pub fn save_cart(storage: &impl CartStorage, items: &[CartItem]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(items)?;
    storage.set_item(CART_STORAGE_KEY, &raw)
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-process storage.
///
/// Clones share the same map, so a handle kept outside the cart observes its
/// writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStorage
// =============================================================================

/// Storage backed by a single JSON file holding an object of string values.
///
/// The file is created on first write. Every write replaces the file by
/// renaming a freshly written sibling over it.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the map for modification. A corrupt file is replaced rather than
    /// locking every later write out.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_map() {
            Err(e @ StorageError::Corrupt { .. }) => {
                warn!(error = %e, "Discarding corrupt storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let raw = serde_json::to_string_pretty(map)?;
        fs::write(&tmp, raw).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl CartStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_core::{Price, Product, ProductId};

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem {
            product: Product {
                id: ProductId::new(id),
                title: format!("Tênis {id}"),
                price: Price::from_cents(13990),
                image: format!("https://example.com/{id}.jpg"),
            },
            amount,
        }
    }

    #[test]
    fn test_load_cart_missing_key_is_empty() {
        let storage = MemoryStorage::new();
        assert!(load_cart(&storage).is_empty());
    }

    #[test]
    fn test_load_cart_null_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_STORAGE_KEY, "null").expect("set");
        assert!(load_cart(&storage).is_empty());
    }

    #[test]
    fn test_load_cart_garbage_is_empty_and_left_in_place() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_STORAGE_KEY, "{not json").expect("set");

        assert!(load_cart(&storage).is_empty());
        assert_eq!(
            storage.get_item(CART_STORAGE_KEY).expect("get").as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let storage = MemoryStorage::new();
        let items = vec![item(3, 1), item(1, 2)];

        save_cart(&storage, &items).expect("save");
        assert_eq!(load_cart(&storage), items);
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set_item("k", "v").expect("set");
        assert_eq!(handle.get_item("k").expect("get").as_deref(), Some("v"));

        handle.remove_item("k").expect("remove");
        assert_eq!(storage.get_item("k").expect("get"), None);
    }

    #[test]
    fn test_file_storage_created_on_first_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("local-storage.json");
        let storage = FileStorage::new(&path);

        assert_eq!(storage.get_item(CART_STORAGE_KEY).expect("get"), None);
        assert!(!path.exists());

        save_cart(&storage, &[item(1, 1)]).expect("save");
        assert!(path.exists());

        let reopened = FileStorage::new(&path);
        assert_eq!(load_cart(&reopened), vec![item(1, 1)]);
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("storage.json"));

        storage.set_item("@RocketShoes:theme", "dark").expect("set");
        save_cart(&storage, &[item(2, 4)]).expect("save");
        storage.remove_item(CART_STORAGE_KEY).expect("remove");

        assert_eq!(
            storage.get_item("@RocketShoes:theme").expect("get").as_deref(),
            Some("dark")
        );
        assert_eq!(storage.get_item(CART_STORAGE_KEY).expect("get"), None);
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").expect("write");
        let storage = FileStorage::new(&path);

        assert!(matches!(
            storage.get_item(CART_STORAGE_KEY),
            Err(StorageError::Corrupt { .. })
        ));
        assert!(load_cart(&storage).is_empty());

        save_cart(&storage, &[item(5, 1)]).expect("save over corrupt file");
        assert_eq!(load_cart(&storage), vec![item(5, 1)]);
    }
}
