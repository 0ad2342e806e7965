use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::Result;

/// String key-value storage holding the session.
///
/// Stands in for browser `localStorage`: values survive for as long as the
/// implementation keeps them, and every component reads the same keys.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// In-process storage, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

/// Storage persisted as a JSON object on disk.
///
/// Reads are served from memory; every mutation rewrites the file. A `set`
/// that fails to reach disk leaves memory untouched. A `remove` or `clear`
/// applies in memory even when the write fails, so a dropped key is never
/// readable again in this process.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => HashMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut HashMap<String, String>),
        keep_on_failure: bool,
    ) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        apply(&mut next);

        let written = self.persist(&next);
        if written.is_ok() || keep_on_failure {
            *entries = next;
        }
        written
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(entries)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(
            |entries| {
                entries.insert(key.to_string(), value.to_string());
            },
            false,
        )
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(
            |entries| {
                entries.remove(key);
            },
            true,
        )
    }

    fn clear(&self) -> Result<()> {
        self.update(|entries| entries.clear(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("checkmate-storage-{}-{}", std::process::id(), n))
            .join(name)
    }

    #[test]
    fn test_memory_get_set_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("authToken"), None);

        storage.set("authToken", "abc123").unwrap();
        assert_eq!(storage.get("authToken").as_deref(), Some("abc123"));

        storage.remove("authToken").unwrap();
        storage.remove("authToken").unwrap();
        assert_eq!(storage.get("authToken"), None);
    }

    #[test]
    fn test_memory_clear() {
        let storage = MemoryStorage::with_entries([("authToken", "a"), ("token", "b")]);
        assert_eq!(storage.len(), 2);

        storage.clear().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let path = scratch_path("session.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("authToken", "abc123").unwrap();
        storage.set("userName", "demo").unwrap();
        storage.remove("userName").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("authToken").as_deref(), Some("abc123"));
        assert_eq!(reopened.get("userName"), None);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let path = scratch_path("absent.json");
        let storage = FileStorage::open(&path).unwrap();

        assert_eq!(storage.get("authToken"), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_failed_write() {
        let path = scratch_path("session.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set("authToken", "abc123").unwrap();

        // a directory where the temp file goes makes every write fail
        fs::create_dir_all(path.with_extension("tmp")).unwrap();

        assert!(storage.set("userName", "demo").is_err());
        assert_eq!(storage.get("userName"), None);

        assert!(storage.remove("authToken").is_err());
        assert_eq!(storage.get("authToken"), None);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let path = scratch_path("garbage.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let result = FileStorage::open(&path);
        assert!(matches!(result, Err(crate::ClientError::Json(_))));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
