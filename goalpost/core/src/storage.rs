//! Whole-list snapshots in a string key-value store.
//!
//! Each store owns one slot. Loading an absent slot yields an empty list and
//! every save overwrites the full snapshot; there is no patching or
//! versioning beyond the key name.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::marker::PhantomData;
use thiserror::Error;
use tracing::debug;

use crate::goal::Goal;
use crate::task::Task;

/// Slot key for tasks.
pub const TASKS_KEY: &str = "todos-v2-advanced";
/// Slot key for annual goals.
pub const GOALS_KEY: &str = "annual-goals-v1";

pub const TASKS: Slot<Task> = Slot::new(TASKS_KEY);
pub const GOALS: Slot<Goal> = Slot::new(GOALS_KEY);

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend failed: {0}")]
    Backend(String),
    #[error("Snapshot under `{key}` is not a valid list")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Snapshot for `{key}` could not be encoded")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable string storage, such as browser `localStorage` or a directory of
/// files.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Reads the raw value under `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Replaces the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A typed view over one key holding a JSON array.
#[derive(Debug)]
pub struct Slot<T> {
    key: &'static str,
    _items: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    pub const fn new(key: &'static str) -> Self {
        Slot {
            key,
            _items: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl<T: Serialize + DeserializeOwned> Slot<T> {
    /// Reads the snapshot, treating an absent or empty value as an empty list.
    pub fn load(&self, store: &impl KeyValueStore) -> Result<Vec<T>, StorageError> {
        let Some(raw) = store.read(self.key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: self.key.to_string(),
            source,
        })
    }

    /// Overwrites the snapshot with `items`.
    pub fn save(&self, store: &mut impl KeyValueStore, items: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items).map_err(|source| StorageError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        store.write(self.key, &json)?;
        debug!(key = self.key, items = items.len(), "saved snapshot");
        Ok(())
    }
}

/// Store kept entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, for inspection.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskList;

    #[test]
    fn absent_slot_loads_as_empty() {
        let store = MemoryStore::new();

        assert_eq!(TASKS.load(&store).unwrap(), Vec::<Task>::new());
    }

    #[test]
    fn empty_string_loads_as_empty() {
        let mut store = MemoryStore::new();
        store.write(GOALS_KEY, "").unwrap();

        assert!(GOALS.load(&store).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_reproduces_list() {
        let mut store = MemoryStore::new();
        let mut list = TaskList::new();
        list.add("first", Some("2025-01-01T10:00".parse().unwrap()));
        let second = list.add("second", None).unwrap();
        list.toggle(second).unwrap();

        TASKS.save(&mut store, list.as_slice()).unwrap();
        let loaded = TASKS.load(&store).unwrap();

        assert_eq!(loaded.as_slice(), list.as_slice());
    }

    #[test]
    fn save_overwrites_whole_snapshot() {
        let mut store = MemoryStore::new();
        let goal = Goal {
            text: "one".to_string(),
            done: false,
            id: 1,
        };
        GOALS.save(&mut store, &[goal.clone(), goal.clone()]).unwrap();

        GOALS.save(&mut store, &[goal]).unwrap();

        assert_eq!(
            store.get(GOALS_KEY),
            Some(r#"[{"text":"one","done":false,"id":1}]"#)
        );
    }

    #[test]
    fn slots_do_not_share_keys() {
        let mut store = MemoryStore::new();
        GOALS
            .save(
                &mut store,
                &[Goal {
                    text: "g".to_string(),
                    done: false,
                    id: 1,
                }],
            )
            .unwrap();

        assert!(TASKS.load(&store).unwrap().is_empty());
        assert_eq!(store.get(TASKS_KEY), None);
    }

    #[test]
    fn loads_snapshot_written_by_browser_app() {
        let mut store = MemoryStore::new();
        store
            .write(
                TASKS_KEY,
                r#"[{"text":"a","deadline":"2025-02-03T04:05","done":true,"id":1},{"text":"b","deadline":null,"done":false,"id":2}]"#,
            )
            .unwrap();

        let tasks = TASKS.load(&store).unwrap();

        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].done);
        assert_eq!(tasks[1].deadline, None);
    }

    #[test]
    fn malformed_snapshot_is_reported_as_corrupt() {
        let mut store = MemoryStore::new();
        store.write(TASKS_KEY, "{not json").unwrap();

        let err = TASKS.load(&store).unwrap_err();

        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == TASKS_KEY));
    }

    #[test]
    fn backend_read_failure_propagates() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_read()
            .returning(|_| Err(StorageError::Backend("quota".to_string())));

        let err = GOALS.load(&store).unwrap_err();

        assert!(matches!(err, StorageError::Backend(message) if message == "quota"));
    }

    #[test]
    fn save_writes_to_its_own_key() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_write()
            .times(1)
            .returning(|key, value| {
                assert_eq!(key, TASKS_KEY);
                assert_eq!(value, "[]");
                Ok(())
            });

        TASKS.save(&mut store, &[]).unwrap();
    }
}
