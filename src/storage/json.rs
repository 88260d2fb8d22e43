use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{StorageError, COLLECTIONS};

type Document = BTreeMap<String, BTreeMap<String, Value>>;
type RecordKey = (String, String);

/// A single JSON document of `collection -> key -> value`, kept in memory and written back
/// to disk after every mutation.
///
/// Records are locked individually while they are modified; the file itself is replaced
/// atomically (write to `<path>.tmp`, then rename) under a flush lock.
#[derive(Clone)]
pub struct JsonStore {
    path: Arc<PathBuf>,
    records: Arc<DashMap<RecordKey, Value>>,
    flush_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let records = DashMap::new();

        let exists = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let document: Document = serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;

                for (collection, entries) in document {
                    for (key, value) in entries {
                        records.insert((collection.clone(), key), value);
                    }
                }
                info!("Loaded {} records from {}", records.len(), path.display());
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No database at {}, starting empty", path.display());
                false
            }
            Err(e) => return Err(e.into()),
        };

        let store = Self {
            path: Arc::new(path),
            records: Arc::new(records),
            flush_lock: Arc::new(Mutex::new(())),
        };

        if !exists {
            store.flush().await?;
        }

        Ok(store)
    }

    pub fn get<T: DeserializeOwned>(&self, collection: &str, key: &str) -> Result<Option<T>, StorageError> {
        match self.records.get(&(collection.to_string(), key.to_string())) {
            Some(value) if !value.is_null() => Ok(Some(serde_json::from_value(value.value().clone())?)),
            _ => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(&self, collection: &str, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        self.records.insert((collection.to_string(), key.to_string()), value);
        self.flush().await
    }

    /// Read-modify-write of one record under its lock. A missing record starts from `T::default()`.
    pub async fn update<T, F>(&self, collection: &str, key: &str, f: F) -> Result<T, StorageError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        let updated = {
            let mut entry = self
                .records
                .entry((collection.to_string(), key.to_string()))
                .or_insert(Value::Null);

            let mut value: T = if entry.is_null() {
                T::default()
            } else {
                serde_json::from_value(entry.value().clone())?
            };

            f(&mut value);
            *entry = serde_json::to_value(&value)?;
            value
        };

        self.flush().await?;
        Ok(updated)
    }

    pub fn keys(&self, collection: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.key().0 == collection && !record.value().is_null())
            .map(|record| record.key().1.clone())
            .collect()
    }

    pub async fn flush(&self) -> Result<(), StorageError> {
        let _guard = self.flush_lock.lock().await;

        let mut document: Document = COLLECTIONS
            .iter()
            .map(|collection| (collection.to_string(), BTreeMap::new()))
            .collect();

        for record in self.records.iter() {
            if record.value().is_null() {
                continue;
            }
            let (collection, key) = record.key();
            document
                .entry(collection.clone())
                .or_default()
                .insert(key.clone(), record.value().clone());
        }

        let content = serde_json::to_vec_pretty(&document)?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, self.path.as_ref()).await?;

        debug!("Database flushed to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::{prelude::*, TempDir};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[tokio::test]
    async fn test_open_creates_empty_document() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("db.json");

        let store = JsonStore::open(file.path()).await.unwrap();
        assert!(store.keys("users").is_empty());

        let content: Value = serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        for collection in COLLECTIONS {
            assert!(content[collection].is_object(), "missing {collection}");
        }
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("db.json");

        let store = JsonStore::open(file.path()).await.unwrap();
        store.set("users", "42", &Counter { count: 7 }).await.unwrap();
        store
            .update::<Counter, _>("users", "43", |c| c.count += 1)
            .await
            .unwrap();

        let reopened = JsonStore::open(file.path()).await.unwrap();
        assert_eq!(reopened.get::<Counter>("users", "42").unwrap(), Some(Counter { count: 7 }));
        assert_eq!(reopened.get::<Counter>("users", "43").unwrap(), Some(Counter { count: 1 }));

        let mut keys = reopened.keys("users");
        keys.sort();
        assert_eq!(keys, vec!["42".to_string(), "43".to_string()]);
        assert!(reopened.keys("tasks").is_empty());
    }

    #[tokio::test]
    async fn test_update_starts_from_default() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::open(temp.child("db.json").path()).await.unwrap();

        let first = store
            .update::<Vec<String>, _>("tasks", "1", |tasks| tasks.push("a".into()))
            .await
            .unwrap();
        let second = store
            .update::<Vec<String>, _>("tasks", "1", |tasks| tasks.push("b".into()))
            .await
            .unwrap();

        assert_eq!(first, vec!["a".to_string()]);
        assert_eq!(second, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::open(temp.child("db.json").path()).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update::<Counter, _>("users", "1", |c| c.count += 1)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get::<Counter>("users", "1").unwrap(), Some(Counter { count: 20 }));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("db.json");
        file.write_str("{ not json").unwrap();

        let result = JsonStore::open(file.path()).await;
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_unicode_is_written_unescaped() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("db.json");
        let store = JsonStore::open(file.path()).await.unwrap();

        store.set("users", "1", &"Маня".to_string()).await.unwrap();
        assert!(std::fs::read_to_string(file.path()).unwrap().contains("Маня"));
    }
}
