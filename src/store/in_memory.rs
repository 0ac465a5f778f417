//! InMemoryStore - HashMap-backed row store for the demo and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::trace;
use uuid::Uuid;

use super::{Row, Store, StoreError, Versioned};

struct StoredRow {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory row store backed by a HashMap.
///
/// Storage key is `"TABLE:id"`. Clone-friendly via Arc: clones share rows.
#[derive(Clone)]
pub struct InMemoryStore {
    name: Arc<str>,
    storage: Arc<RwLock<HashMap<String, StoredRow>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::named("games")
    }

    /// Create an empty store with a name used in traces.
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn make_key(table: &str, id: Uuid) -> String {
        format!("{}:{}", table, id)
    }

    fn write_row<R: Row>(
        storage: &mut HashMap<String, StoredRow>,
        key: String,
        row: R,
    ) -> Result<Versioned<R>, StoreError> {
        let bytes = serde_json::to_vec(&row)?;
        let version = storage.get(&key).map(|s| s.version + 1).unwrap_or(1);
        storage.insert(key, StoredRow { bytes, version });
        Ok(Versioned { data: row, version })
    }
}

impl Store for InMemoryStore {
    fn get<R: Row>(&self, id: Uuid) -> Result<Option<Versioned<R>>, StoreError> {
        let key = Self::make_key(R::TABLE, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        match storage.get(&key) {
            Some(stored) => Ok(Some(Versioned {
                data: serde_json::from_slice(&stored.bytes)?,
                version: stored.version,
            })),
            None => Ok(None),
        }
    }

    fn insert<R: Row>(&self, mut row: R) -> Result<Versioned<R>, StoreError> {
        if row.id().is_nil() {
            row.set_id(Uuid::new_v4());
        }
        let id = row.id();
        let key = Self::make_key(R::TABLE, id);

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("insert"))?;

        if storage.contains_key(&key) {
            return Err(StoreError::Conflict {
                table: R::TABLE,
                id,
            });
        }

        trace!(store = %self.name, table = R::TABLE, %id, "insert");
        Self::write_row(&mut storage, key, row)
    }

    fn upsert<R: Row>(&self, row: R) -> Result<Versioned<R>, StoreError> {
        if row.id().is_nil() {
            return self.insert(row);
        }
        let id = row.id();
        let key = Self::make_key(R::TABLE, id);

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("upsert"))?;

        trace!(store = %self.name, table = R::TABLE, %id, "upsert");
        Self::write_row(&mut storage, key, row)
    }

    fn update<R: Row>(&self, row: R, expected_version: u64) -> Result<Versioned<R>, StoreError> {
        let id = row.id();
        let key = Self::make_key(R::TABLE, id);

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("update"))?;

        let actual = storage
            .get(&key)
            .map(|s| s.version)
            .ok_or(StoreError::Missing {
                table: R::TABLE,
                id,
            })?;

        if actual != expected_version {
            return Err(StoreError::ConcurrentWrite {
                table: R::TABLE,
                id,
                expected: expected_version,
                actual,
            });
        }

        trace!(store = %self.name, table = R::TABLE, %id, version = actual, "update");
        Self::write_row(&mut storage, key, row)
    }

    fn remove<R: Row>(&self, id: Uuid) -> Result<Versioned<R>, StoreError> {
        let key = Self::make_key(R::TABLE, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("remove"))?;

        let stored = storage.remove(&key).ok_or(StoreError::Missing {
            table: R::TABLE,
            id,
        })?;

        trace!(store = %self.name, table = R::TABLE, %id, "remove");
        Ok(Versioned {
            data: serde_json::from_slice(&stored.bytes)?,
            version: stored.version,
        })
    }

    fn list<R: Row>(&self) -> Result<Vec<Versioned<R>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("list"))?;

        let prefix = format!("{}:", R::TABLE);
        storage
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, stored)| -> Result<Versioned<R>, StoreError> {
                Ok(Versioned {
                    data: serde_json::from_slice(&stored.bytes)?,
                    version: stored.version,
                })
            })
            .collect()
    }
}
