//! File-Backed Storage for native hosts
//!
//! One file per key inside a directory. Writes go to a temp file in the same
//! directory and are renamed over the target, so a crash never leaves a
//! half-written payload behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::storage::{KeyValueStorage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are app-chosen, but keep them from escaping the directory.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        atomic_write(&self.path_for(key), value.as_bytes())?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set_item("todos", r#"[{"id":1,"text":"a","checked":false}]"#).unwrap();
        assert_eq!(
            storage.get_item("todos").unwrap().as_deref(),
            Some(r#"[{"id":1,"text":"a","checked":false}]"#)
        );
        assert!(dir.path().join("todos.json").exists());
    }

    #[test]
    fn read_missing_key_returns_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(storage.get_item("todos").unwrap().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set_item("todos", "[]").unwrap();
        storage.remove_item("todos").unwrap();
        storage.remove_item("todos").unwrap();
        assert!(storage.get_item("todos").unwrap().is_none());
    }

    #[test]
    fn keys_stay_inside_directory() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set_item("../escape", "x").unwrap();
        assert!(storage.path_for("../escape").starts_with(dir.path()));
        assert_eq!(storage.get_item("../escape").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        assert_eq!(storage.dir(), nested.as_path());
        assert!(nested.is_dir());
    }
}
