//! # Local value store
//!
//! A small key/value string store standing in for browser local storage,
//! plus the typed adapter the widgets use.
//!
//! - [`Storage`] is the raw backend: string values under string keys, with
//!   [`MemoryStorage`] and the directory-backed [`FileStorage`].
//! - [`ValueStore`] serializes values as JSON. `load` never fails: a missing
//!   key or undecodable text yields the fallback. `save` swallows backend
//!   errors after logging them; the in-memory state stays authoritative.
//! - [`use_local_storage`] builds a [`StoredSignal`]: a signal seeded from the
//!   store whose every committed write is mirrored back to it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Signal;
use crate::error::StorageError;

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend. An optional byte quota (keys plus values) makes writes
/// fail the way a full browser store does.
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// A backend whose every operation fails, like storage disabled by the user.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        if let Some(limit) = self.quota
            && self.used_without(key) + key.len() + value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                limit,
            });
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// One file per key under a directory: `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Typed JSON adapter over a [`Storage`] backend.
#[derive(Clone)]
pub struct ValueStore {
    backend: Rc<dyn Storage>,
}

impl ValueStore {
    pub fn new(backend: Rc<dyn Storage>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    pub fn backend(&self) -> &Rc<dyn Storage> {
        &self.backend
    }

    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(text) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Stored value under `key`, or `fallback` if absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(v)) => v,
            Ok(None) => fallback,
            Err(err) => {
                log::warn!("falling back to default for '{key}': {err}");
                fallback
            }
        }
    }

    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &text)
    }

    /// Persists `value`; failures are logged and otherwise ignored.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_save(key, value) {
            log::warn!("could not persist '{key}': {err}");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove_item(key) {
            log::warn!("could not remove '{key}': {err}");
        }
    }
}

/// A signal mirrored to the value store under a fixed key.
pub struct StoredSignal<T: 'static> {
    signal: Signal<T>,
    key: String,
}

impl<T> StoredSignal<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn signal(&self) -> &Signal<T> {
        &self.signal
    }
}

impl<T> Clone for StoredSignal<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
            key: self.key.clone(),
        }
    }
}

impl<T> Deref for StoredSignal<T> {
    type Target = Signal<T>;

    fn deref(&self) -> &Signal<T> {
        &self.signal
    }
}

/// Loads `key` (or `fallback`) into a new signal and mirrors every committed
/// write of that signal back to `store`.
pub fn use_local_storage<T>(store: &ValueStore, key: impl Into<String>, fallback: T) -> StoredSignal<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    let key = key.into();
    let signal = Signal::new(store.load(&key, fallback));
    signal.subscribe({
        let store = store.clone();
        let key = key.clone();
        move |value: &T| store.save(&key, value)
    });
    StoredSignal { signal, key }
}
