use goalpost_core::{KeyValueStore, StorageError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Keeps each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn backend_error(path: &Path, err: io::Error) -> StorageError {
    StorageError::Backend(format!("{}: {err}", path.display()))
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(backend_error(&path, err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| backend_error(&self.dir, err))?;
        let path = self.path(key);
        fs::write(&path, value).map_err(|err| backend_error(&path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.read("todos-v2-advanced").unwrap(), None);
    }

    #[test]
    fn write_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.write("annual-goals-v1", "[]").unwrap();

        dir.child("nested/annual-goals-v1.json").assert("[]");
        assert_eq!(store.read("annual-goals-v1").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn write_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());

        store.write("k", "[1,2,3]").unwrap();
        store.write("k", "[]").unwrap();

        dir.child("k.json").assert("[]");
    }

    #[test]
    fn unreadable_path_is_backend_error() {
        let dir = TempDir::new().unwrap();
        dir.child("k.json").create_dir_all().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.read("k").unwrap_err();

        assert!(matches!(err, StorageError::Backend(_)));
    }
}
