//! Persistent key/value store contracts and implementations.
//!
//! # Responsibility
//! - Define the string-keyed storage contract used by the board driver.
//! - Name the fixed keys under which each collection is persisted.
//! - Encode/decode stored values with validation.
//!
//! # Invariants
//! - Each collection is written whole under its own key; no diffs.
//! - There is no atomicity across keys.

mod codec;
mod memory;
mod sqlite;

pub use codec::{
    decode_lists, decode_tasks, encode_lists, encode_tasks, DecodedTasks, RejectReason,
    RejectedTask,
};
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Fixed storage keys, one per persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Tasks,
    Lists,
    CurrentList,
    AccentColor,
    DarkMode,
}

impl StorageKey {
    /// All keys in load order.
    pub const ALL: [StorageKey; 5] = [
        Self::Tasks,
        Self::Lists,
        Self::CurrentList,
        Self::AccentColor,
        Self::DarkMode,
    ];

    /// Stable key string written to the store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "TODOS",
            Self::Lists => "LISTS",
            Self::CurrentList => "CURRENT_LIST",
            Self::AccentColor => "ACCENT_COLOR",
            Self::DarkMode => "DARK_MODE",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage-layer error.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Stored value could not be encoded or decoded.
    Codec {
        key: StorageKey,
        message: String,
    },
    /// Host-provided backend reported a failure.
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec { key, message } => write!(f, "invalid value under `{key}`: {message}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec { .. } | Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed durable storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
