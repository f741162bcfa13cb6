use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{Result, StudioError};

/// Flat key/value file store the studio saves captures and projects into.
///
/// Calls never block the frame loop for long and report failure through their
/// return value; the caller decides how to surface it.
pub trait Storage {
    /// Writes `bytes` under `name`. Without `overwrite` an existing entry is
    /// kept and the call fails.
    fn save(&mut self, name: &str, bytes: &[u8], overwrite: bool) -> bool;
    fn exists(&self, name: &str) -> bool;
    fn load(&self, name: &str) -> Option<Vec<u8>>;
    /// Host path of `name`, used to reveal saved files.
    fn path(&self, name: &str) -> PathBuf;
    /// Modification time of `name` in seconds since the epoch, 0 if unknown.
    fn modified(&self, _name: &str) -> u64 {
        0
    }
}

/// Storage rooted at a directory on the host filesystem.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Opens `root`, which must already exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StudioError::MissingFolder(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for DirStorage {
    fn save(&mut self, name: &str, bytes: &[u8], overwrite: bool) -> bool {
        let path = self.path(name);
        if !overwrite && path.exists() {
            tracing::warn!(?path, "refusing to overwrite existing file");
            return false;
        }

        match std::fs::write(&path, bytes) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(?path, %err, "failed to save file");
                false
            }
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    fn load(&self, name: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path(name)).ok()
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn modified(&self, name: &str) -> u64 {
        std::fs::metadata(self.path(name))
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}

/// In-memory storage, handy for headless sessions and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    files: HashMap<String, Vec<u8>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, name: &str, bytes: &[u8], overwrite: bool) -> bool {
        if self.read_only || (!overwrite && self.files.contains_key(name)) {
            return false;
        }
        self.files.insert(name.to_string(), bytes.to_vec());
        true
    }

    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn load(&self, name: &str) -> Option<Vec<u8>> {
        self.files.get(name).cloned()
    }

    fn path(&self, name: &str) -> PathBuf {
        PathBuf::from(name)
    }
}

/// Finds the first unused name produced by substituting 1, 2, 3... for `%i`
/// in `pattern`.
pub fn free_name(storage: &dyn Storage, pattern: &str) -> String {
    (1u32..)
        .map(|index| pattern.replacen("%i", &index.to_string(), 1))
        .find(|name| !storage.exists(name))
        .unwrap_or_else(|| pattern.replacen("%i", "0", 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_storage_does_not_overwrite_without_permission() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::open(dir.path()).unwrap();

        assert!(storage.save("cart.bin", b"one", false));
        assert!(!storage.save("cart.bin", b"two", false));
        assert_eq!(storage.load("cart.bin").unwrap(), b"one");

        assert!(storage.save("cart.bin", b"two", true));
        assert_eq!(storage.load("cart.bin").unwrap(), b"two");
        assert!(storage.modified("cart.bin") > 0);
    }

    #[test]
    fn dir_storage_requires_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirStorage::open(dir.path().join("missing")).unwrap_err();
        assert!(format!("{err}").contains("doesn't exist"));
    }

    #[test]
    fn free_name_skips_taken_names() {
        let mut storage = MemoryStorage::new();
        assert_eq!(free_name(&storage, "screen%i.gif"), "screen1.gif");

        storage.save("screen1.gif", b"", false);
        storage.save("screen2.gif", b"", false);
        assert_eq!(free_name(&storage, "screen%i.gif"), "screen3.gif");
    }

    #[test]
    fn read_only_memory_storage_rejects_writes() {
        let mut storage = MemoryStorage::read_only();
        assert!(!storage.save("a", b"x", true));
        assert!(!storage.exists("a"));
    }
}
