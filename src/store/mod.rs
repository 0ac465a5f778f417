//! Store - key-value persistence for rows.
//!
//! Rows are grouped into tables and keyed by a UUID. Every write bumps a
//! per-row version so callers can tell two snapshots of the same row apart.
//!
//! ## Example
//!
//! ```ignore
//! use games_cqrs::{GameRow, InMemoryStore, Store};
//!
//! let store = InMemoryStore::new();
//! let saved = store.insert(row)?;          // nil id -> fresh id
//! let loaded = store.get::<GameRow>(saved.data.id)?;
//! store.update(loaded.data, loaded.version)?; // stale version -> ConcurrentWrite
//! store.remove::<GameRow>(saved.data.id)?;
//! ```

mod in_memory;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use in_memory::InMemoryStore;

/// A type that can be stored as a row.
pub trait Row: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Table the rows live in. Maps to a key prefix in the in-memory store.
    const TABLE: &'static str;

    /// The row key. Nil means "not assigned yet".
    fn id(&self) -> Uuid;

    /// Assign the row key.
    fn set_id(&mut self, id: Uuid);
}

/// A row together with its write version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Errors raised by a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// An insert raced another writer for the same key.
    #[error("row {table}:{id} already exists")]
    Conflict { table: &'static str, id: Uuid },
    /// A versioned update was based on a stale read.
    #[error("concurrent write on {table}:{id} (expected version {expected}, actual {actual})")]
    ConcurrentWrite {
        table: &'static str,
        id: Uuid,
        expected: u64,
        actual: u64,
    },
    #[error("row {table}:{id} not found")]
    Missing { table: &'static str, id: Uuid },
    #[error("row serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Abstract key-value storage for rows.
///
/// Each call is a single atomic operation against the backing table.
pub trait Store: Send + Sync {
    /// Get a row by key. Returns `None` if not found.
    fn get<R: Row>(&self, id: Uuid) -> Result<Option<Versioned<R>>, StoreError>;

    /// Insert a new row. A nil key is replaced by a fresh one; an existing
    /// key is a `Conflict`.
    fn insert<R: Row>(&self, row: R) -> Result<Versioned<R>, StoreError>;

    /// Replace the row stored under the row's key, creating it if absent.
    fn upsert<R: Row>(&self, row: R) -> Result<Versioned<R>, StoreError>;

    /// Replace an existing row only if its stored version is still
    /// `expected_version`. A missing key is `Missing`; a newer stored version
    /// is `ConcurrentWrite`.
    fn update<R: Row>(&self, row: R, expected_version: u64) -> Result<Versioned<R>, StoreError>;

    /// Remove a row by key, returning what was stored. Removing a missing
    /// key is an error.
    fn remove<R: Row>(&self, id: Uuid) -> Result<Versioned<R>, StoreError>;

    /// Snapshot of every row in the table, in no particular order.
    fn list<R: Row>(&self) -> Result<Vec<Versioned<R>>, StoreError>;
}
