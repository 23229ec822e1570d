use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::{MemStore, RedbStore, Store, StoreError, DEFAULT_TABLE};

/// Backend-independent settings passed to every opener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Table (or bucket) to scan, for backends that have several.
    pub table: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

/// Function that opens a store of one backend at a path.
pub type OpenFn = fn(&Path, &StoreOptions) -> Result<Box<dyn Store>, StoreError>;

/// Metadata describing a registered backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    /// Name used in `backend:path`.
    pub name: String,
    /// One-line description.
    pub description: String,
}

struct BackendEntry {
    open: OpenFn,
    description: String,
}

impl fmt::Debug for BackendEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendEntry")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Registry of store backends, keyed by the name used in `backend:path`.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    entries: BTreeMap<String, BackendEntry>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry holding every backend this crate ships.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            "memdb",
            "In-memory ordered map; the path is ignored and the store starts empty.",
            open_memdb,
        );
        registry.register(
            "redb",
            "Existing redb database file, one table scanned read-only.",
            open_redb,
        );
        registry
    }

    /// Register a backend, replacing any previous entry with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        open: OpenFn,
    ) {
        self.entries.insert(
            name.into(),
            BackendEntry {
                open,
                description: description.into(),
            },
        );
    }

    /// Whether a backend is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Open a store with the named backend.
    pub fn open(
        &self,
        name: &str,
        path: &Path,
        options: &StoreOptions,
    ) -> Result<Box<dyn Store>, StoreError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| StoreError::UnknownBackend {
                name: name.to_string(),
                available: self.names().join(", "),
            })?;
        (entry.open)(path, options)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// List all registered backends.
    pub fn list(&self) -> Vec<BackendInfo> {
        self.entries
            .iter()
            .map(|(name, entry)| BackendInfo {
                name: name.clone(),
                description: entry.description.clone(),
            })
            .collect()
    }
}

fn open_memdb(_path: &Path, _options: &StoreOptions) -> Result<Box<dyn Store>, StoreError> {
    Ok(Box::new(MemStore::new()))
}

fn open_redb(path: &Path, options: &StoreOptions) -> Result<Box<dyn Store>, StoreError> {
    Ok(Box::new(RedbStore::open(path, &options.table)?))
}
