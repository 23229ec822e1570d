//! Backend-agnostic access to ordered key-value stores.
//!
//! A [`Store`] hands out [`Cursor`]s over a [`KeyRange`]. Cursors are
//! forward-only and must be closed explicitly, since closing can fail.

mod memory;
mod redb_store;
mod registry;

pub use memory::MemStore;
pub use redb_store::{RedbStore, DEFAULT_TABLE};
pub use registry::{BackendInfo, BackendRegistry, OpenFn, StoreOptions};

use std::ops::Bound;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No backend is registered under the requested name.
    #[error("unknown backend {name:?} (available: {available})")]
    UnknownBackend {
        /// Requested backend name.
        name: String,
        /// Comma-separated registered names.
        available: String,
    },

    /// The store could not be opened.
    #[error("failed to open store at {}: {message}", path.display())]
    Open {
        /// Location of the store.
        path: PathBuf,
        /// Backend-specific reason.
        message: String,
    },

    /// A cursor could not be created.
    #[error("failed to create iterator: {0}")]
    Iterator(String),

    /// Reading the next entry failed mid-scan.
    #[error("failed to read entry: {0}")]
    Read(String),

    /// Releasing the cursor failed.
    #[error("failed to close iterator: {0}")]
    Close(String),
}

/// Optional bounds for a scan. `start` is inclusive, `end` exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRange {
    /// First key to include, or unbounded.
    pub start: Option<Vec<u8>>,
    /// First key to exclude, or unbounded.
    pub end: Option<Vec<u8>>,
}

impl KeyRange {
    /// The whole keyspace.
    pub fn full() -> Self {
        Self::default()
    }

    /// Range between two optional bounds.
    pub fn new(start: Option<Vec<u8>>, end: Option<Vec<u8>>) -> Self {
        Self { start, end }
    }

    /// Whether the range selects every key.
    pub fn is_full(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `key` falls inside the range.
    pub fn contains(&self, key: &[u8]) -> bool {
        let after_start = self.start.as_deref().map_or(true, |s| key >= s);
        let before_end = self.end.as_deref().map_or(true, |e| key < e);
        after_start && before_end
    }

    /// Whether no key can ever fall inside the range.
    pub fn is_empty(&self) -> bool {
        matches!((&self.start, &self.end), (Some(s), Some(e)) if s >= e)
    }

    pub(crate) fn bounds(&self) -> (Bound<&[u8]>, Bound<&[u8]>) {
        let lower = self
            .start
            .as_deref()
            .map_or(Bound::Unbounded, Bound::Included);
        let upper = self.end.as_deref().map_or(Bound::Unbounded, Bound::Excluded);
        (lower, upper)
    }
}

/// Ordered, forward-only traversal over key/value pairs.
///
/// `key` and `value` may only be called while `valid` returns true.
pub trait Cursor {
    /// Whether the cursor is positioned on an entry.
    fn valid(&self) -> bool;

    /// Key at the current position.
    fn key(&self) -> &[u8];

    /// Value at the current position.
    fn value(&self) -> &[u8];

    /// Move to the next entry. Moving past the last entry invalidates the cursor.
    fn advance(&mut self) -> Result<(), StoreError>;

    /// Release the cursor. Called exactly once per cursor.
    fn close(&mut self) -> Result<(), StoreError>;
}

/// A store that can be scanned.
pub trait Store {
    /// Backend name, as registered.
    fn backend(&self) -> &'static str;

    /// Open a cursor over `range`.
    fn iterator<'a>(&'a self, range: &KeyRange) -> Result<Box<dyn Cursor + 'a>, StoreError>;
}
