//! Key-value persistence slots.
//!
//! A [`Storage`] holds string blobs under string keys, the same contract a
//! browser's local storage offers. [`FileStorage`] keeps one JSON file per key
//! on disk; [`MemoryStorage`] keeps everything in memory and can simulate a
//! size quota.

use std::{
    cell::RefCell,
    collections::HashMap,
    fs, io,
    path::PathBuf,
};

use crate::{EngineError, ResultEngine};

pub trait Storage {
    /// Returns the blob stored under `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> ResultEngine<Option<String>>;

    /// Overwrites the slot. On error the previous blob must be left intact.
    fn set(&self, key: &str, value: &str) -> ResultEngine<()>;

    /// Empties the slot. Removing an empty slot is not an error.
    fn remove(&self, key: &str) -> ResultEngine<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ResultEngine<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> ResultEngine<()> {
        (**self).remove(key)
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> ResultEngine<()> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let staging = self.dir.join(format!("{key}.json.tmp"));
        // Write aside and rename so a failed write never truncates the slot.
        if let Err(err) = fs::write(&staging, value) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        fs::rename(&staging, &target)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> ResultEngine<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory slots, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any single value larger than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: RefCell::default(),
            quota: Some(quota),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ResultEngine<()> {
        if let Some(quota) = self.quota
            && value.len() > quota
        {
            return Err(EngineError::QuotaExceeded {
                needed: value.len(),
                quota,
            });
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ResultEngine<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_roundtrip_and_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "[]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[]"));
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn memory_quota_keeps_previous_value() {
        let storage = MemoryStorage::with_quota(4);
        storage.set("k", "[]").unwrap();
        let err = storage.set("k", "[1,2,3]").unwrap_err();
        assert_eq!(err, EngineError::QuotaExceeded { needed: 7, quota: 4 });
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_storage_uses_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("financeEntries").unwrap(), None);

        storage.set("financeEntries", "[]").unwrap();
        let path = storage.path_for("financeEntries");
        assert!(path.ends_with("nested/financeEntries.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!dir.path().join("nested/financeEntries.json.tmp").exists());

        storage.set("financeEntries", "[1]").unwrap();
        assert_eq!(storage.get("financeEntries").unwrap().as_deref(), Some("[1]"));

        storage.remove("financeEntries").unwrap();
        storage.remove("financeEntries").unwrap();
        assert!(!path.exists());
    }
}
